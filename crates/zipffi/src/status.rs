//! Status codes returned across the C boundary.
//!
//! Every exported function returns `0` on success and a nonzero code on
//! failure. Callers may treat any nonzero code as an opaque failure; the
//! specific codes only narrow down the cause.

use std::ffi::CStr;
use std::fmt;

use libc::c_char;
use libc::c_int;
use zipffi_core::CodecError;

/// Success.
pub const ZIPFFI_OK: c_int = 0;
/// Null or empty input, null out-parameter, or an unusable entry name.
pub const ZIPFFI_ERR_NULL: c_int = 1;
/// I/O failure while moving entry bytes.
pub const ZIPFFI_ERR_IO: c_int = 2;
/// Malformed, truncated, or corrupt archive, or a ZIP library fault.
pub const ZIPFFI_ERR_ZIP: c_int = 3;
/// Owned output could not be allocated.
pub const ZIPFFI_ERR_ALLOC: c_int = 4;
/// Well-formed archive with no entries.
pub const ZIPFFI_ERR_EMPTY_ARCHIVE: c_int = 5;

/// Failure categories reported to foreign callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// See [`ZIPFFI_ERR_NULL`].
    InvalidInput,
    /// See [`ZIPFFI_ERR_IO`].
    Io,
    /// See [`ZIPFFI_ERR_ZIP`].
    Codec,
    /// See [`ZIPFFI_ERR_ALLOC`].
    Alloc,
    /// See [`ZIPFFI_ERR_EMPTY_ARCHIVE`].
    EmptyArchive,
}

impl Status {
    /// Returns the numeric code passed across the boundary.
    #[must_use]
    pub const fn code(self) -> c_int {
        match self {
            Self::InvalidInput => ZIPFFI_ERR_NULL,
            Self::Io => ZIPFFI_ERR_IO,
            Self::Codec => ZIPFFI_ERR_ZIP,
            Self::Alloc => ZIPFFI_ERR_ALLOC,
            Self::EmptyArchive => ZIPFFI_ERR_EMPTY_ARCHIVE,
        }
    }
}

impl From<&CodecError> for Status {
    fn from(err: &CodecError) -> Self {
        match err {
            CodecError::EmptyInput | CodecError::InvalidEntryName(_) => Self::InvalidInput,
            CodecError::EmptyArchive => Self::EmptyArchive,
            CodecError::Io(_) => Self::Io,
            CodecError::InvalidArchive(_)
            | CodecError::EntryTooLarge { .. }
            | CodecError::Zip(_) => Self::Codec,
        }
    }
}

impl From<CodecError> for Status {
    fn from(err: CodecError) -> Self {
        Self::from(&err)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = status_message(self.code());
        f.write_str(&message.to_string_lossy())
    }
}

/// Returns the static description for a status code.
///
/// Unknown codes get a generic failure message.
#[must_use]
pub fn status_message(code: c_int) -> &'static CStr {
    match code {
        ZIPFFI_OK => c"success",
        ZIPFFI_ERR_NULL => c"invalid input: null or empty argument, or unusable entry name",
        ZIPFFI_ERR_IO => c"I/O error while processing entry data",
        ZIPFFI_ERR_ZIP => c"invalid or corrupt archive",
        ZIPFFI_ERR_ALLOC => c"failed to allocate output buffer",
        ZIPFFI_ERR_EMPTY_ARCHIVE => c"archive contains no entries",
        _ => c"unknown error",
    }
}

/// Returns a static, NUL-terminated description of `code`.
///
/// The returned pointer is valid for the lifetime of the library and must
/// not be passed to `zipffi_free_buffer`.
#[unsafe(no_mangle)]
pub extern "C" fn zipffi_status_message(code: c_int) -> *const c_char {
    status_message(code).as_ptr()
}
