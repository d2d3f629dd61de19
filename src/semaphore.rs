// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 rendez contributors
//
// Counting signal used as sender-credit, receiver-credit, and the private
// wake handle a `select` call parks on. Thin wrapper over the per-platform
// primitive in `platform`; exists so the rest of the crate never names
// `platform::PlatformSemaphore` directly.

use std::io;

use crate::platform::PlatformSemaphore;

pub struct Semaphore {
    inner: PlatformSemaphore,
}

impl Semaphore {
    pub fn new(initial: u32) -> io::Result<Self> {
        Ok(Self {
            inner: PlatformSemaphore::new(initial)?,
        })
    }

    /// Block the calling thread until a unit is available, consuming it.
    pub fn wait(&self) {
        self.inner.wait();
    }

    /// Consume a unit without blocking. Returns `false` if none is available.
    pub fn try_wait(&self) -> bool {
        self.inner.try_wait()
    }

    /// Make one unit available, waking a single waiter if one is parked.
    pub fn post(&self) {
        self.inner.post();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn try_wait_fails_on_empty_semaphore() {
        let sem = Semaphore::new(0).unwrap();
        assert!(!sem.try_wait());
    }

    #[test]
    fn try_wait_succeeds_after_post() {
        let sem = Semaphore::new(0).unwrap();
        sem.post();
        assert!(sem.try_wait());
        assert!(!sem.try_wait());
    }

    #[test]
    fn wait_blocks_until_posted() {
        let sem = Arc::new(Semaphore::new(0).unwrap());
        let sem2 = Arc::clone(&sem);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            sem2.post();
        });
        sem.wait();
        handle.join().unwrap();
    }

    #[test]
    fn initial_count_is_available_immediately() {
        let sem = Semaphore::new(2).unwrap();
        assert!(sem.try_wait());
        assert!(sem.try_wait());
        assert!(!sem.try_wait());
    }
}
