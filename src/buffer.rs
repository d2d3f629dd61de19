// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 rendez contributors
//
// Bounded FIFO storage for a channel's in-flight payloads. Capacity is
// fixed at construction (the channel's effective capacity — see
// `channel.rs` for how a capacity-0 channel is backed by a one-slot buffer).
// Credit accounting in `channel.rs` guarantees `add` is never called against
// a full buffer and `remove` is never called against an empty one; this type
// enforces neither and simply panics if that invariant is ever violated,
// since a violation would mean the credit semaphores themselves are wrong.

use std::collections::VecDeque;

pub struct BoundedBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn add(&mut self, payload: T) {
        debug_assert!(self.items.len() < self.capacity, "buffer overfull");
        self.items.push_back(payload);
    }

    pub fn remove(&mut self) -> T {
        self.items.pop_front().expect("buffer underflow")
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order_is_preserved() {
        let mut buf = BoundedBuffer::new(3);
        buf.add(1);
        buf.add(2);
        buf.add(3);
        assert_eq!(buf.remove(), 1);
        assert_eq!(buf.remove(), 2);
        assert_eq!(buf.remove(), 3);
    }

    #[test]
    fn len_tracks_pending_payloads() {
        let mut buf = BoundedBuffer::new(2);
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        buf.add("a");
        assert_eq!(buf.len(), 1);
        buf.add("b");
        assert_eq!(buf.len(), 2);
        buf.remove();
        assert_eq!(buf.len(), 1);
    }

    #[test]
    #[should_panic(expected = "buffer underflow")]
    fn remove_from_empty_buffer_panics() {
        let mut buf: BoundedBuffer<i32> = BoundedBuffer::new(1);
        buf.remove();
    }
}
