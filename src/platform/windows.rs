// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 rendez contributors
//
// Win32 kernel counting semaphore, unnamed (no `lpName`). Mirrors
// `posix.rs`: this backs sender-credit, receiver-credit, and select's
// private wake handle, all process-local, so there is no file mapping or
// named-object cleanup to worry about, unlike the donor's named Windows
// mutex/condition primitives.

use std::io;
use std::ptr;

use windows_sys::Win32::Foundation::{CloseHandle, HANDLE, WAIT_FAILED, WAIT_OBJECT_0};
use windows_sys::Win32::System::Threading::{
    CreateSemaphoreW, ReleaseSemaphore, WaitForSingleObject, INFINITE,
};

pub struct PlatformSemaphore {
    handle: HANDLE,
}

// Safety: a Win32 semaphore handle may be waited on and released from any
// thread.
unsafe impl Send for PlatformSemaphore {}
unsafe impl Sync for PlatformSemaphore {}

impl PlatformSemaphore {
    pub fn new(initial: u32) -> io::Result<Self> {
        // i32::MAX is the largest count Windows will accept as a maximum.
        let handle =
            unsafe { CreateSemaphoreW(ptr::null(), initial as i32, i32::MAX, ptr::null()) };
        if handle.is_null() {
            return Err(io::Error::last_os_error());
        }
        Ok(Self { handle })
    }

    /// Block until a unit is available.
    pub fn wait(&self) {
        let ret = unsafe { WaitForSingleObject(self.handle, INFINITE) };
        if ret != WAIT_OBJECT_0 {
            panic!("WaitForSingleObject failed: {}", io::Error::last_os_error());
        }
    }

    /// Attempt to acquire a unit without blocking. Returns `true` on success.
    pub fn try_wait(&self) -> bool {
        let ret = unsafe { WaitForSingleObject(self.handle, 0) };
        match ret {
            WAIT_OBJECT_0 => true,
            WAIT_FAILED => panic!("WaitForSingleObject failed: {}", io::Error::last_os_error()),
            _ => false, // WAIT_TIMEOUT: no unit available
        }
    }

    /// Release one unit.
    pub fn post(&self) {
        let ret = unsafe { ReleaseSemaphore(self.handle, 1, ptr::null_mut()) };
        if ret == 0 {
            panic!("ReleaseSemaphore failed: {}", io::Error::last_os_error());
        }
    }
}

impl Drop for PlatformSemaphore {
    fn drop(&mut self) {
        unsafe { CloseHandle(self.handle) };
    }
}
