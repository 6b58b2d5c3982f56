//! Boundary validation of caller-supplied pointers and names.

use std::ffi::CStr;
use std::ffi::CString;

use libc::c_char;
use tracing::debug;

use crate::status::Status;

/// Maximum entry name length in bytes.
pub const MAX_NAME_LENGTH: usize = zipffi_core::MAX_ENTRY_NAME_LENGTH;

/// Borrows a caller buffer, rejecting null pointers and empty lengths.
///
/// # Safety
///
/// When `data` is non-null it must be valid for reads of `len` bytes for the
/// returned lifetime.
pub unsafe fn input_slice<'a>(data: *const u8, len: usize) -> Result<&'a [u8], Status> {
    if data.is_null() || len == 0 {
        debug!(null = data.is_null(), len, "rejected input buffer");
        return Err(Status::InvalidInput);
    }
    // SAFETY: non-null, and the caller guarantees `len` readable bytes.
    Ok(unsafe { std::slice::from_raw_parts(data, len) })
}

/// Borrows a NUL-terminated entry name.
///
/// # Safety
///
/// When `name` is non-null it must point to a NUL-terminated string that
/// stays valid for the returned lifetime.
pub unsafe fn c_name<'a>(name: *const c_char) -> Result<&'a str, Status> {
    if name.is_null() {
        debug!("rejected null entry name");
        return Err(Status::InvalidInput);
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    let bytes = unsafe { CStr::from_ptr(name) }.to_bytes();
    validate_name(bytes)
}

/// Borrows a length-delimited entry name.
///
/// # Safety
///
/// When `name` is non-null it must be valid for reads of `len` bytes for the
/// returned lifetime.
pub unsafe fn sized_name<'a>(name: *const u8, len: usize) -> Result<&'a str, Status> {
    if name.is_null() {
        debug!("rejected null entry name");
        return Err(Status::InvalidInput);
    }
    // SAFETY: non-null, and the caller guarantees `len` readable bytes.
    let bytes = unsafe { std::slice::from_raw_parts(name, len) };
    validate_name(bytes)
}

/// Checks that an entry name is usable as both a ZIP name and C text.
///
/// The empty name is accepted. Rejects:
/// - Names longer than [`MAX_NAME_LENGTH`] bytes
/// - Names containing NUL bytes
/// - Names that are not valid UTF-8
pub fn validate_name(bytes: &[u8]) -> Result<&str, Status> {
    if bytes.len() > MAX_NAME_LENGTH || bytes.contains(&0) {
        debug!(len = bytes.len(), "rejected entry name");
        return Err(Status::InvalidInput);
    }
    std::str::from_utf8(bytes).map_err(|err| {
        debug!(error = %err, "rejected non-UTF-8 entry name");
        Status::InvalidInput
    })
}

/// Converts a decoded entry name to C text.
///
/// Returns `None` when the name holds a NUL byte and therefore cannot be
/// represented; that is not a failure of the call.
pub fn output_name(name: String) -> Option<CString> {
    CString::new(name)
        .inspect_err(|err| debug!(position = err.nul_position(), "entry name has interior NUL"))
        .ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_input_slice_rejects_null_and_empty() {
        // SAFETY: null pointers are never dereferenced.
        assert_eq!(
            unsafe { input_slice(ptr::null(), 4) },
            Err(Status::InvalidInput)
        );
        let data = [1u8, 2, 3];
        // SAFETY: `data` is valid for zero bytes.
        assert_eq!(
            unsafe { input_slice(data.as_ptr(), 0) },
            Err(Status::InvalidInput)
        );
        // SAFETY: `data` is valid for three bytes.
        assert_eq!(unsafe { input_slice(data.as_ptr(), 3) }, Ok(&data[..]));
    }

    #[test]
    fn test_c_name() {
        // SAFETY: literal is NUL-terminated and static.
        assert_eq!(unsafe { c_name(c"a.txt".as_ptr()) }, Ok("a.txt"));
        // SAFETY: null pointers are never dereferenced.
        assert_eq!(unsafe { c_name(ptr::null()) }, Err(Status::InvalidInput));
        // SAFETY: literal is NUL-terminated and static.
        assert_eq!(unsafe { c_name(c"".as_ptr()) }, Ok(""));
    }

    #[test]
    fn test_sized_name_does_not_need_terminator() {
        let name = b"entry.binXXXX";
        // SAFETY: `name` is valid for nine bytes.
        assert_eq!(unsafe { sized_name(name.as_ptr(), 9) }, Ok("entry.bin"));
        // SAFETY: zero bytes are read.
        assert_eq!(unsafe { sized_name(name.as_ptr(), 0) }, Ok(""));
    }

    #[test]
    fn test_validate_name_rejects_nul() {
        assert_eq!(validate_name(b"bad\0name"), Err(Status::InvalidInput));
    }

    #[test]
    fn test_validate_name_rejects_invalid_utf8() {
        assert_eq!(validate_name(&[0x66, 0xFF, 0x6F]), Err(Status::InvalidInput));
    }

    #[test]
    fn test_validate_name_length_limit() {
        let max = "n".repeat(MAX_NAME_LENGTH);
        assert!(validate_name(max.as_bytes()).is_ok());

        let over = "n".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(validate_name(over.as_bytes()), Err(Status::InvalidInput));
    }

    #[test]
    fn test_output_name() {
        let name = output_name("ok.txt".to_string()).unwrap();
        assert_eq!(name.as_bytes(), b"ok.txt");
        assert!(output_name("bad\0name".to_string()).is_none());
    }
}
