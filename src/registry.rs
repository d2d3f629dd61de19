// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 rendez contributors
//
// Waiter registry: the set of private wake handles `select` calls have
// parked on this channel's send side or receive side. A channel operation
// that changes state (a completed send/receive, or close) walks its
// registry and signals every entry so parked `select` calls re-scan.
//
// The source keeps this as an intrusive doubly-linked list (`linked_list.c`)
// so a waiter can remove itself in O(1) given only its own node pointer.
// Nothing here is large enough (one entry per thread concurrently
// `select`-ing on this channel and direction) for that to matter, and a flat
// `Vec` avoids self-referential nodes, so removal is identity-based instead.

use std::sync::Arc;

use crate::semaphore::Semaphore;

#[derive(Default)]
pub struct WaiterRegistry {
    waiters: Vec<Arc<Semaphore>>,
}

impl WaiterRegistry {
    pub fn new() -> Self {
        Self { waiters: Vec::new() }
    }

    /// Register a wake handle. Call while holding the channel's state lock.
    pub fn insert(&mut self, waiter: Arc<Semaphore>) {
        self.waiters.push(waiter);
    }

    /// Unregister a previously-inserted wake handle. No-op if it was never
    /// present or was already removed (e.g. by a racing `select` retry).
    pub fn remove(&mut self, waiter: &Arc<Semaphore>) {
        if let Some(pos) = self.waiters.iter().position(|w| Arc::ptr_eq(w, waiter)) {
            self.waiters.remove(pos);
        }
    }

    /// Wake every registered waiter. Does not clear the registry: a waiter
    /// removes itself once its `select` call returns.
    pub fn signal_all(&self) {
        for waiter in &self.waiters {
            waiter.post();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_all_posts_every_registered_waiter() {
        let mut registry = WaiterRegistry::new();
        let a = Arc::new(Semaphore::new(0).unwrap());
        let b = Arc::new(Semaphore::new(0).unwrap());
        registry.insert(Arc::clone(&a));
        registry.insert(Arc::clone(&b));

        registry.signal_all();

        assert!(a.try_wait());
        assert!(b.try_wait());
    }

    #[test]
    fn remove_drops_only_the_matching_entry() {
        let mut registry = WaiterRegistry::new();
        let a = Arc::new(Semaphore::new(0).unwrap());
        let b = Arc::new(Semaphore::new(0).unwrap());
        registry.insert(Arc::clone(&a));
        registry.insert(Arc::clone(&b));

        registry.remove(&a);
        registry.signal_all();

        assert!(!a.try_wait());
        assert!(b.try_wait());
    }

    #[test]
    fn remove_of_absent_waiter_is_a_no_op() {
        let mut registry = WaiterRegistry::new();
        let a = Arc::new(Semaphore::new(0).unwrap());
        registry.remove(&a);
        assert!(registry.is_empty());
    }
}
