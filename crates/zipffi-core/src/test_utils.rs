//! Test utilities for building in-memory archives.
//!
//! These helpers write archives with the `zip` crate directly, bypassing the
//! codec, so tests can feed the decoder multi-entry, empty, or unusually
//! encoded containers.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Creates an in-memory ZIP archive from a list of entries.
///
/// Each entry is a tuple of (name, content). Entries are stored uncompressed
/// in the given order.
///
/// # Examples
///
/// ```
/// use zipffi_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(&[("file.txt", &b"hello"[..]), ("dir/nested.txt", &b"world"[..])]);
/// ```
#[must_use]
pub fn create_test_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = ZipTestBuilder::new();
    for (name, data) in entries {
        builder = builder.add_file(name, data, CompressionMethod::Stored);
    }
    builder.build()
}

/// Creates a well-formed ZIP archive with no entries.
#[must_use]
pub fn empty_zip() -> Vec<u8> {
    ZipTestBuilder::new().build()
}

/// Builder for ZIP test archives with per-entry compression methods.
///
/// # Examples
///
/// ```
/// use zip::CompressionMethod;
/// use zipffi_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_file("packed.txt", b"content", CompressionMethod::Deflated)
///     .add_directory("dir/")
///     .build();
/// ```
pub struct ZipTestBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a file entry compressed with `method`.
    #[must_use]
    pub fn add_file(mut self, name: &str, data: &[u8], method: CompressionMethod) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .unix_permissions(0o644);

        self.zip.start_file(name, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, name: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(name, options).unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
