//! Owned output buffers handed to foreign callers.
//!
//! Memory crossing the boundary comes from the C allocator linked into this
//! library and is returned to it only through [`zipffi_free_buffer`]. Inside
//! the library an [`OwnedBuffer`] frees itself on drop, so an early return on
//! any failure path releases whatever the call had already allocated.

use std::ffi::CStr;
use std::ptr;
use std::ptr::NonNull;

use libc::c_void;

use crate::status::Status;

/// Heap memory owned by the library until [`OwnedBuffer::into_raw`] hands it
/// to the caller.
#[derive(Debug)]
pub struct OwnedBuffer {
    ptr: NonNull<u8>,
    len: usize,
}

impl OwnedBuffer {
    /// Allocates a buffer and copies `bytes` into it.
    ///
    /// A zero-length request still allocates one byte so the pointer is
    /// unique and freeable.
    ///
    /// # Errors
    ///
    /// Returns [`Status::Alloc`] if the allocator returns null.
    pub fn copy_from(bytes: &[u8]) -> Result<Self, Status> {
        // SAFETY: malloc has no preconditions; a null result is handled below.
        let raw = unsafe { libc::malloc(bytes.len().max(1)) }.cast::<u8>();
        let ptr = NonNull::new(raw).ok_or(Status::Alloc)?;

        // SAFETY: `ptr` is a fresh allocation of at least `bytes.len()` bytes
        // and cannot overlap the borrowed input.
        unsafe { ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.as_ptr(), bytes.len()) };

        Ok(Self {
            ptr,
            len: bytes.len(),
        })
    }

    /// Allocates a NUL-terminated copy of `text`.
    ///
    /// The reported length excludes the terminator.
    ///
    /// # Errors
    ///
    /// Returns [`Status::Alloc`] if the allocator returns null.
    pub fn copy_c_str(text: &CStr) -> Result<Self, Status> {
        let mut buffer = Self::copy_from(text.to_bytes_with_nul())?;
        buffer.len -= 1;
        Ok(buffer)
    }

    /// Number of meaningful bytes in the buffer.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Transfers ownership to the caller, returning the pointer and length.
    ///
    /// The caller must release the pointer exactly once with
    /// [`zipffi_free_buffer`].
    #[must_use]
    pub fn into_raw(self) -> (*mut u8, usize) {
        let this = std::mem::ManuallyDrop::new(self);
        (this.ptr.as_ptr(), this.len)
    }
}

impl Drop for OwnedBuffer {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from `libc::malloc` and ownership was never
        // transferred, otherwise `into_raw` would have suppressed this drop.
        unsafe { libc::free(self.ptr.as_ptr().cast::<c_void>()) };
    }
}

/// Releases a data buffer or name string returned by this library.
///
/// Passing null is a no-op.
///
/// # Safety
///
/// `ptr` must be null or a pointer previously returned through an
/// out-parameter of this library that has not been released yet. It must not
/// be used after this call. Memory from any other allocator must never be
/// passed here, and pointers from this library must never be passed to a
/// different `free`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn zipffi_free_buffer(ptr: *mut c_void) {
    if ptr.is_null() {
        return;
    }
    // SAFETY: guaranteed by the caller contract above.
    unsafe { libc::free(ptr) };
}
