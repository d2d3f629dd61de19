// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 rendez contributors
//
// POSIX counting semaphore, process-local (pshared = 0). This backs
// sender-credit, receiver-credit, and select's private wake handle; unlike
// the donor library's named primitives, nothing here crosses a process
// boundary, so there is no shared-memory segment to open — just a
// heap-allocated `sem_t`.
//
// macOS does not implement unnamed (`pshared = 0`) semaphores; `sem_init`
// there returns `ENOSYS`. This mirrors the donor's own platform carve-outs
// (it disables robust-mutex recovery on macOS for the same kind of gap) and
// is left as a known limitation rather than routed through a named
// `sem_open`, which would reintroduce the kernel-namespace cleanup this
// crate's in-process design avoids.

use std::io;

pub struct PlatformSemaphore {
    sem: Box<libc::sem_t>,
}

// Safety: `sem_t` is designed for concurrent access from multiple threads.
unsafe impl Send for PlatformSemaphore {}
unsafe impl Sync for PlatformSemaphore {}

impl PlatformSemaphore {
    pub fn new(initial: u32) -> io::Result<Self> {
        let mut sem: Box<libc::sem_t> = unsafe { Box::new(std::mem::zeroed()) };
        let ret = unsafe { libc::sem_init(&mut *sem as *mut libc::sem_t, 0, initial) };
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Self { sem })
    }

    fn ptr(&self) -> *mut libc::sem_t {
        &*self.sem as *const libc::sem_t as *mut libc::sem_t
    }

    /// Block until a unit is available. Retries on `EINTR`.
    pub fn wait(&self) {
        loop {
            let ret = unsafe { libc::sem_wait(self.ptr()) };
            if ret == 0 {
                return;
            }
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                // `sem_wait` cannot otherwise fail on a correctly
                // initialised, non-destroyed semaphore.
                panic!("sem_wait failed: {err}");
            }
        }
    }

    /// Attempt to acquire a unit without blocking. Returns `true` on success.
    pub fn try_wait(&self) -> bool {
        loop {
            let ret = unsafe { libc::sem_trywait(self.ptr()) };
            if ret == 0 {
                return true;
            }
            let err = io::Error::last_os_error();
            match err.kind() {
                io::ErrorKind::Interrupted => continue,
                _ => return false, // EAGAIN: no unit available
            }
        }
    }

    /// Release one unit.
    pub fn post(&self) {
        let ret = unsafe { libc::sem_post(self.ptr()) };
        if ret != 0 {
            panic!("sem_post failed: {}", io::Error::last_os_error());
        }
    }
}

impl Drop for PlatformSemaphore {
    fn drop(&mut self) {
        unsafe { libc::sem_destroy(self.ptr()) };
    }
}
