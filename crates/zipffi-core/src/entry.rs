//! Entry types produced by the codec.

use std::fmt;

use zip::CompressionMethod;

/// A single named payload decoded from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Name stored in the archive.
    pub name: String,
    /// Uncompressed content. May be empty.
    pub content: Vec<u8>,
}

impl Entry {
    /// Splits the entry into its content and name.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.content, self.name)
    }
}

/// Compression method recorded for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMethod {
    /// No compression.
    Stored,
    /// Deflate.
    Deflated,
    /// Any other method; decoding may fail if the codec lacks support.
    Other,
}

impl From<CompressionMethod> for EntryMethod {
    fn from(method: CompressionMethod) -> Self {
        match method {
            CompressionMethod::Stored => Self::Stored,
            CompressionMethod::Deflated => Self::Deflated,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for EntryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored => f.write_str("stored"),
            Self::Deflated => f.write_str("deflated"),
            Self::Other => f.write_str("other"),
        }
    }
}

/// Central directory metadata for an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Name stored in the archive.
    pub name: String,
    /// Compression method.
    pub method: EntryMethod,
    /// Size of the stored (possibly compressed) data in bytes.
    pub compressed_size: u64,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// CRC-32 of the uncompressed content.
    pub crc32: u32,
}
