// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 rendez contributors
//
// Per-operation error types, one family per channel operation, following
// `std::sync::mpsc`'s convention of carrying the rejected payload back to
// the caller rather than a single shared status code.

use std::error::Error;
use std::fmt;

/// A blocking `send` failed because the channel is closed.
pub struct SendError<T>(pub T);

impl<T> SendError<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SendError(..)")
    }
}

impl<T> fmt::Display for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("send on a closed channel")
    }
}

impl<T> Error for SendError<T> {}

/// A non-blocking `try_send` either could not proceed immediately or the
/// channel is closed.
pub enum TrySendError<T> {
    Full(T),
    Closed(T),
}

impl<T> TrySendError<T> {
    pub fn into_inner(self) -> T {
        match self {
            TrySendError::Full(v) | TrySendError::Closed(v) => v,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, TrySendError::Full(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, TrySendError::Closed(_))
    }
}

impl<T> fmt::Debug for TrySendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrySendError::Full(_) => f.write_str("TrySendError::Full(..)"),
            TrySendError::Closed(_) => f.write_str("TrySendError::Closed(..)"),
        }
    }
}

impl<T> fmt::Display for TrySendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrySendError::Full(_) => f.write_str("send would block"),
            TrySendError::Closed(_) => f.write_str("send on a closed channel"),
        }
    }
}

impl<T> Error for TrySendError<T> {}

/// A blocking `receive` failed because the channel is closed and drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecvError;

impl fmt::Display for RecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("receive on a closed, empty channel")
    }
}

impl Error for RecvError {}

/// A non-blocking `try_receive` either had nothing ready or the channel is
/// closed and drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
    Empty,
    Closed,
}

impl fmt::Display for TryRecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryRecvError::Empty => f.write_str("receive would block"),
            TryRecvError::Closed => f.write_str("receive on a closed, empty channel"),
        }
    }
}

impl Error for TryRecvError {}

/// `close` was called on a channel that was already closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseError;

impl fmt::Display for CloseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("channel already closed")
    }
}

impl Error for CloseError {}

/// `destroy` was called on a channel that has not been closed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestroyError;

impl fmt::Display for DestroyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("destroy called before close")
    }
}

impl Error for DestroyError {}

/// Outcome of a completed `select` call: which case won and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOutcome {
    pub index: usize,
    pub status: SelectStatus,
}

/// A `select` case resolves the same way its single-channel equivalent
/// would: either the operation completed, or it completed against a closed
/// channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectStatus {
    Success,
    Closed,
}
