//! Error types for archive codec operations.

use thiserror::Error;

/// Result type alias using `CodecError`.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while building or reading an archive.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input buffer was empty.
    #[error("input buffer is empty")]
    EmptyInput,

    /// The entry name cannot be used inside an archive.
    #[error("invalid entry name: {0}")]
    InvalidEntryName(String),

    /// Archive is corrupted, truncated, or fails its checksum.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Archive parsed correctly but holds no entries.
    #[error("archive contains no entries")]
    EmptyArchive,

    /// Entry exceeds the configured size limit.
    #[error("entry too large: {size} bytes (limit {max})")]
    EntryTooLarge {
        /// Declared or observed uncompressed size in bytes.
        size: u64,
        /// Configured maximum in bytes.
        max: u64,
    },

    /// Underlying ZIP library fault.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Returns `true` if the error was caused by the caller's input rather
    /// than by archive contents or the compression library.
    ///
    /// # Examples
    ///
    /// ```
    /// use zipffi_core::CodecError;
    ///
    /// assert!(CodecError::EmptyInput.is_input_error());
    /// assert!(!CodecError::EmptyArchive.is_input_error());
    /// ```
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::InvalidEntryName(_))
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use zipffi_core::CodecError;
    ///
    /// let err = CodecError::InvalidArchive("bad header".to_string());
    /// assert_eq!(err.context(), Some("bad header"));
    ///
    /// assert_eq!(CodecError::EmptyArchive.context(), None);
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) | Self::InvalidEntryName(msg) => Some(msg),
            _ => None,
        }
    }
}
