// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 rendez contributors
//
// A synchronous, CSP-style channel: a bounded buffer gated by a pair of
// counting semaphores (sender-credit, receiver-credit), with blocking and
// non-blocking send/receive, explicit close with broadcast-on-close wake
// semantics, and a multi-way `select` across channels of the same payload
// type.

mod platform;

mod semaphore;

pub mod buffer;
pub mod registry;

pub mod channel;
pub use channel::Channel;

pub mod select;
pub use select::{select, SelectCase, SelectResult};

pub mod error;
pub use error::{
    CloseError, DestroyError, RecvError, SelectOutcome, SelectStatus, SendError, TryRecvError,
    TrySendError,
};
