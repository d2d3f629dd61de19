// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 rendez contributors
//
// The channel core: a bounded buffer guarded by a mutex, with sender-credit
// and receiver-credit semaphores gating access to it, plus a pair of waiter
// registries so `select` can park on either direction. Capacity 0 is backed
// internally as capacity 1 ("shadow slot") so a solitary send can complete
// before any receiver is waiting, while `capacity()` still reports 0 to the
// caller; see DESIGN.md's Open Question decisions for the reasoning.
//
// `send`/`receive` acquire credit first, then the state lock, then re-check
// `closed` before touching the buffer. If the channel closed in the window
// between acquiring credit and taking the lock, the credit is reposted
// before returning an error — this is how a single `close()` call chain-wakes
// every blocked sender or receiver: each one wakes, observes `closed`, and
// reposts the same unit of credit for the next waiter in line.

use std::io;
use std::sync::{Arc, Mutex};

use crate::buffer::BoundedBuffer;
use crate::error::{CloseError, DestroyError, RecvError, SendError, TryRecvError, TrySendError};
use crate::registry::WaiterRegistry;
use crate::semaphore::Semaphore;

struct State<T> {
    buffer: BoundedBuffer<T>,
    closed: bool,
}

struct Inner<T> {
    capacity: usize,
    state: Mutex<State<T>>,
    sender_credit: Semaphore,
    receiver_credit: Semaphore,
    send_waiters: Mutex<WaiterRegistry>,
    receive_waiters: Mutex<WaiterRegistry>,
}

/// A bounded, synchronous, multi-producer multi-consumer channel handle.
///
/// Cheap to clone (`Arc`-backed); any number of threads may hold a clone and
/// call `send`, `receive`, or `close` on it concurrently.
pub struct Channel<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send> Channel<T> {
    /// Create a channel with the given capacity. Capacity 0 requests a
    /// rendezvous channel; see the module documentation for how that is
    /// backed internally.
    pub fn create(capacity: usize) -> io::Result<Self> {
        let effective_capacity = capacity.max(1);
        let inner = Inner {
            capacity,
            state: Mutex::new(State {
                buffer: BoundedBuffer::new(effective_capacity),
                closed: false,
            }),
            sender_credit: Semaphore::new(effective_capacity as u32)?,
            receiver_credit: Semaphore::new(0)?,
            send_waiters: Mutex::new(WaiterRegistry::new()),
            receive_waiters: Mutex::new(WaiterRegistry::new()),
        };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// The capacity this channel was created with (0 for a rendezvous
    /// channel, even though it is backed by one shadow slot internally).
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    fn wake_receivers(&self) {
        self.inner.receive_waiters.lock().unwrap().signal_all();
    }

    fn wake_senders(&self) {
        self.inner.send_waiters.lock().unwrap().signal_all();
    }

    /// Send `payload`, blocking until buffer space is available or the
    /// channel closes.
    pub fn send(&self, payload: T) -> Result<(), SendError<T>> {
        self.inner.sender_credit.wait();
        {
            let mut state = self.inner.state.lock().unwrap();
            if state.closed {
                drop(state);
                self.inner.sender_credit.post();
                return Err(SendError(payload));
            }
            state.buffer.add(payload);
        }
        self.inner.receiver_credit.post();
        self.wake_receivers();
        Ok(())
    }

    /// Send `payload` without blocking. Fails with `Full` if the buffer has
    /// no free slot right now, or `Closed` if the channel is closed.
    pub fn try_send(&self, payload: T) -> Result<(), TrySendError<T>> {
        if self.inner.sender_credit.try_wait() {
            let mut state = self.inner.state.lock().unwrap();
            if state.closed {
                drop(state);
                self.inner.sender_credit.post();
                return Err(TrySendError::Closed(payload));
            }
            state.buffer.add(payload);
            drop(state);
            self.inner.receiver_credit.post();
            self.wake_receivers();
            Ok(())
        } else {
            let state = self.inner.state.lock().unwrap();
            if state.closed {
                return Err(TrySendError::Closed(payload));
            }
            Err(TrySendError::Full(payload))
        }
    }

    /// Receive a payload, blocking until one is available or the channel
    /// closes.
    pub fn receive(&self) -> Result<T, RecvError> {
        self.inner.receiver_credit.wait();
        let payload;
        {
            let mut state = self.inner.state.lock().unwrap();
            if state.closed {
                drop(state);
                self.inner.receiver_credit.post();
                return Err(RecvError);
            }
            payload = state.buffer.remove();
        }
        self.inner.sender_credit.post();
        self.wake_senders();
        Ok(payload)
    }

    /// Receive a payload without blocking. Fails with `Empty` if nothing is
    /// ready right now, or `Closed` if the channel is closed.
    pub fn try_receive(&self) -> Result<T, TryRecvError> {
        if self.inner.receiver_credit.try_wait() {
            let mut state = self.inner.state.lock().unwrap();
            if state.closed {
                drop(state);
                self.inner.receiver_credit.post();
                return Err(TryRecvError::Closed);
            }
            let payload = state.buffer.remove();
            drop(state);
            self.inner.sender_credit.post();
            self.wake_senders();
            Ok(payload)
        } else {
            let state = self.inner.state.lock().unwrap();
            if state.closed {
                return Err(TryRecvError::Closed);
            }
            Err(TryRecvError::Empty)
        }
    }

    /// Close the channel, waking every blocked sender, receiver, and
    /// `select` call parked on it. Each wakes in turn, observes the
    /// channel is closed, and reposts its credit so the next waiter in
    /// line wakes too ("chain wake").
    pub fn close(&self) -> Result<(), CloseError> {
        {
            let mut state = self.inner.state.lock().unwrap();
            if state.closed {
                return Err(CloseError);
            }
            state.closed = true;
        }
        self.inner.sender_credit.post();
        self.wake_senders();
        self.inner.receiver_credit.post();
        self.wake_receivers();
        Ok(())
    }

    /// Precondition check that the channel has been closed. Does not free
    /// any resources itself — the last `Channel<T>` handle going out of
    /// scope does that — but documents, and enforces, "close before you
    /// let this go."
    pub fn destroy(&self) -> Result<(), DestroyError> {
        let state = self.inner.state.lock().unwrap();
        if state.closed {
            Ok(())
        } else {
            Err(DestroyError)
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().unwrap().closed
    }

    /// Number of payloads currently buffered.
    pub fn len(&self) -> usize {
        self.inner.state.lock().unwrap().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn register_send_waiter(&self, waiter: Arc<Semaphore>) {
        self.inner.send_waiters.lock().unwrap().insert(waiter);
    }

    pub(crate) fn unregister_send_waiter(&self, waiter: &Arc<Semaphore>) {
        self.inner.send_waiters.lock().unwrap().remove(waiter);
    }

    pub(crate) fn register_receive_waiter(&self, waiter: Arc<Semaphore>) {
        self.inner.receive_waiters.lock().unwrap().insert(waiter);
    }

    pub(crate) fn unregister_receive_waiter(&self, waiter: &Arc<Semaphore>) {
        self.inner.receive_waiters.lock().unwrap().remove(waiter);
    }
}
