// Tue Jan 13 2026 - Alex

use libc::{c_int, c_void};

/// Owning handle for memory handed out by the C allocator.
///
/// The pointer is released with `free(3)` when the handle is dropped or reset.
pub struct CMem<T> {
    ptr: *mut T,
}

impl<T> CMem<T> {
    pub fn null() -> Self {
        Self { ptr: std::ptr::null_mut() }
    }

    /// # Safety
    ///
    /// `ptr` must be null or come from `malloc`/`calloc`/`realloc` and must
    /// not be freed by anyone else.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self { ptr }
    }

    /// # Safety
    ///
    /// Same contract as [`CMem::from_raw`].
    pub unsafe fn reset(&mut self, ptr: *mut T) {
        self.release();
        self.ptr = ptr;
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    pub fn as_ptr(&self) -> *mut T {
        self.ptr
    }

    fn release(&mut self) {
        if !self.ptr.is_null() {
            unsafe { libc::free(self.ptr as *mut c_void) };
            self.ptr = std::ptr::null_mut();
        }
    }
}

impl<T> Default for CMem<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> Drop for CMem<T> {
    fn drop(&mut self) {
        self.release();
    }
}

const PROBE_LEN: usize = 128;

/// Checks that `PROBE_LEN` bytes starting at `ptr` can be read, without
/// touching them from this process: the kernel copies them into a pipe and
/// reports `EFAULT` instead of raising a signal.
pub fn is_address_valid(ptr: *const u8) -> bool {
    let mut fds: [c_int; 2] = [-1, -1];
    if unsafe { libc::pipe(fds.as_mut_ptr()) } < 0 {
        return false;
    }

    let written = unsafe { libc::write(fds[1], ptr as *const c_void, PROBE_LEN) };

    unsafe {
        libc::close(fds[0]);
        libc::close(fds[1]);
    }

    written > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmem_frees_allocation() {
        let raw = unsafe { libc::calloc(4, std::mem::size_of::<u32>()) } as *mut u32;
        assert!(!raw.is_null());

        let mut handle = unsafe { CMem::from_raw(raw) };
        assert!(!handle.is_null());
        assert_eq!(unsafe { *handle.as_ptr() }, 0);

        unsafe { handle.reset(std::ptr::null_mut()) };
        assert!(handle.is_null());
    }

    #[test]
    fn test_cmem_null_default() {
        let handle: CMem<u8> = CMem::default();
        assert!(handle.is_null());
    }

    #[test]
    fn test_is_address_valid() {
        let buffer = [0u8; PROBE_LEN * 2];
        assert!(is_address_valid(buffer.as_ptr()));
        assert!(!is_address_valid(std::ptr::null()));
    }
}
