// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 rendez contributors
//
// Multi-way select over a mix of send and receive cases against channels of
// the same payload type. Subscribes a private wake handle to every case's
// registry, then repeatedly scans all cases in ascending index order with
// the non-blocking form of the underlying operation, parking on the wake
// handle whenever a full pass makes no progress. The scan order means an
// earlier case can starve a later one under sustained traffic on both —
// this is the same first-fit-by-index behaviour the algorithm it is ported
// from has, not an oversight.
//
// A losing or not-yet-tried `Send` case never hands its payload to the
// channel, so its value is handed back to the caller in `SelectResult::unsent`
// rather than being dropped; a `Send` case that loses specifically because
// its channel is closed gets its payload back the same way, since the send
// never actually took place.

use std::sync::Arc;

use crate::channel::Channel;
use crate::error::{SelectOutcome, SelectStatus, TryRecvError, TrySendError};
use crate::semaphore::Semaphore;

/// One arm of a `select` call: either a send of `payload`, or a receive.
pub enum SelectCase<'a, T> {
    Send(&'a Channel<T>, T),
    Receive(&'a Channel<T>),
}

/// Direction a case subscribed under; used to unsubscribe the same wake
/// handle once `select` is done, independent of which case won.
enum Direction<'a, T> {
    Send(&'a Channel<T>),
    Receive(&'a Channel<T>),
}

/// A case still carrying its original index, threaded through retry passes
/// so a payload can be traced back to its slot in `SelectResult::unsent`.
struct IndexedCase<'a, T> {
    index: usize,
    case: SelectCase<'a, T>,
}

/// Result of a resolved `select` call.
pub struct SelectResult<T> {
    pub outcome: SelectOutcome,
    /// The payload pulled out, if the winning case was a `Receive`.
    pub payload: Option<T>,
    /// Payloads of `Send` cases that were never handed to their channel,
    /// indexed by their position in the original `cases` list. A `Receive`
    /// case, and a `Send` case that won, always have `None` here.
    pub unsent: Vec<Option<T>>,
}

/// Block until one of `cases` can proceed, perform it, and return which
/// case won and how. Cases are tried in order on every pass; if none can
/// proceed, the caller parks until some channel in `cases` changes state.
pub fn select<T: Send>(cases: Vec<SelectCase<T>>) -> SelectResult<T> {
    let case_count = cases.len();
    let directions: Vec<Direction<T>> = cases
        .iter()
        .map(|case| match case {
            SelectCase::Send(chan, _) => Direction::Send(*chan),
            SelectCase::Receive(chan) => Direction::Receive(*chan),
        })
        .collect();

    let waiter = Arc::new(Semaphore::new(0).expect("failed to create select wake handle"));
    for direction in &directions {
        match direction {
            Direction::Send(chan) => chan.register_send_waiter(Arc::clone(&waiter)),
            Direction::Receive(chan) => chan.register_receive_waiter(Arc::clone(&waiter)),
        }
    }

    let mut pending: Vec<IndexedCase<T>> = cases
        .into_iter()
        .enumerate()
        .map(|(index, case)| IndexedCase { index, case })
        .collect();

    let (outcome, payload, mut unsent_by_index) = loop {
        match try_once(pending, case_count) {
            Ok(resolved) => break resolved,
            Err(remaining) => {
                waiter.wait();
                pending = remaining;
            }
        }
    };

    for direction in &directions {
        match direction {
            Direction::Send(chan) => chan.unregister_send_waiter(&waiter),
            Direction::Receive(chan) => chan.unregister_receive_waiter(&waiter),
        }
    }

    let mut unsent: Vec<Option<T>> = std::iter::repeat_with(|| None).take(case_count).collect();
    for (index, payload) in unsent_by_index.drain(..) {
        unsent[index] = Some(payload);
    }

    SelectResult {
        outcome,
        payload,
        unsent,
    }
}

type ResolvedPass<T> = (SelectOutcome, Option<T>, Vec<(usize, T)>);

/// Attempt every case in order without blocking; on the first that isn't
/// full/empty, perform it and return its outcome along with the unsent
/// payload of every other `Send` case from this pass. On a pass that makes
/// no progress, the untried cases are handed back so the caller can retry
/// them after parking.
fn try_once<T: Send>(
    cases: Vec<IndexedCase<T>>,
    case_count: usize,
) -> Result<ResolvedPass<T>, Vec<IndexedCase<T>>> {
    let mut remaining = Vec::with_capacity(cases.len());
    let mut winner: Option<(SelectOutcome, Option<T>)> = None;
    let mut unsent = Vec::with_capacity(case_count);

    for indexed in cases {
        let IndexedCase { index, case } = indexed;
        if winner.is_some() {
            remaining.push(IndexedCase { index, case });
            continue;
        }
        match case {
            SelectCase::Send(chan, payload) => match chan.try_send(payload) {
                Ok(()) => {
                    winner = Some((
                        SelectOutcome {
                            index,
                            status: SelectStatus::Success,
                        },
                        None,
                    ));
                }
                Err(TrySendError::Closed(payload)) => {
                    unsent.push((index, payload));
                    winner = Some((
                        SelectOutcome {
                            index,
                            status: SelectStatus::Closed,
                        },
                        None,
                    ));
                }
                Err(TrySendError::Full(payload)) => {
                    remaining.push(IndexedCase {
                        index,
                        case: SelectCase::Send(chan, payload),
                    });
                }
            },
            SelectCase::Receive(chan) => match chan.try_receive() {
                Ok(payload) => {
                    winner = Some((
                        SelectOutcome {
                            index,
                            status: SelectStatus::Success,
                        },
                        Some(payload),
                    ));
                }
                Err(TryRecvError::Closed) => {
                    winner = Some((
                        SelectOutcome {
                            index,
                            status: SelectStatus::Closed,
                        },
                        None,
                    ));
                }
                Err(TryRecvError::Empty) => {
                    remaining.push(IndexedCase {
                        index,
                        case: SelectCase::Receive(chan),
                    });
                }
            },
        }
    }

    match winner {
        Some((outcome, payload)) => {
            for indexed in remaining {
                if let SelectCase::Send(_, payload) = indexed.case {
                    unsent.push((indexed.index, payload));
                }
            }
            Ok((outcome, payload, unsent))
        }
        None => Err(remaining),
    }
}
