//! Single-entry archive creation.

use std::io::Cursor;
use std::io::Write;

use tracing::trace;
use zip::CompressionMethod;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::CodecError;
use crate::Result;

/// Longest entry name in bytes; the ZIP name field is 16 bits wide.
pub const MAX_ENTRY_NAME_LENGTH: usize = u16::MAX as usize;

/// Builds a ZIP archive holding exactly one entry named `entry_name`.
///
/// Content is deflated. If deflate does not shrink it (including empty
/// content) the archive is rebuilt with the store method, so the entry never
/// takes more space than the raw bytes.
///
/// # Examples
///
/// ```
/// use zipffi_core::compress;
/// use zipffi_core::decompress_first;
///
/// let archive = compress(b"Hello", "hello.txt")?;
/// let entry = decompress_first(&archive)?;
/// assert_eq!(entry.content, b"Hello");
/// assert_eq!(entry.name, "hello.txt");
/// # Ok::<(), zipffi_core::CodecError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - `entry_name` is longer than [`MAX_ENTRY_NAME_LENGTH`] bytes
/// - The ZIP library fails to build the container
pub fn compress(content: &[u8], entry_name: &str) -> Result<Vec<u8>> {
    if entry_name.len() > MAX_ENTRY_NAME_LENGTH {
        return Err(CodecError::InvalidEntryName(format!(
            "entry name is {} bytes, limit is {MAX_ENTRY_NAME_LENGTH}",
            entry_name.len()
        )));
    }

    if content.is_empty() {
        trace!(entry_name, "empty content, using store method");
        return write_archive(content, entry_name, CompressionMethod::Stored);
    }

    let deflated = write_archive(content, entry_name, CompressionMethod::Deflated)?;
    let compressed_size = stored_data_size(&deflated)?;
    let original_size = content.len() as u64;

    if compressed_size >= original_size {
        trace!(
            entry_name,
            compressed_size, original_size, "deflate did not shrink content, using store method"
        );
        return write_archive(content, entry_name, CompressionMethod::Stored);
    }

    trace!(
        entry_name,
        compressed_size, original_size, "using deflate method"
    );
    Ok(deflated)
}

/// Writes the archive into a fresh in-memory buffer.
///
/// The buffer is only returned after `finish` has written the central
/// directory, so a failure never yields a partial archive.
fn write_archive(content: &[u8], entry_name: &str, method: CompressionMethod) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let options = SimpleFileOptions::default()
        .compression_method(method)
        .large_file(needs_zip64(content.len()))
        .unix_permissions(0o644);

    zip.start_file(entry_name, options)?;
    zip.write_all(content)?;

    Ok(zip.finish()?.into_inner())
}

/// Reads back the stored size of the single entry just written.
fn stored_data_size(archive: &[u8]) -> Result<u64> {
    let mut reader = ZipArchive::new(Cursor::new(archive))?;
    let entry = reader.by_index_raw(0)?;
    Ok(entry.compressed_size())
}

fn needs_zip64(len: usize) -> bool {
    len as u64 >= u64::from(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Read;

    fn first_method(archive: &[u8]) -> CompressionMethod {
        let mut reader = ZipArchive::new(Cursor::new(archive)).unwrap();
        reader.by_index_raw(0).unwrap().compression()
    }

    #[test]
    fn test_compress_single_entry() {
        let archive = compress(b"Hello", "hello.txt").unwrap();
        let mut reader = ZipArchive::new(Cursor::new(archive.as_slice())).unwrap();
        assert_eq!(reader.len(), 1);

        let mut file = reader.by_index(0).unwrap();
        assert_eq!(file.name(), "hello.txt");
        let mut content = Vec::new();
        file.read_to_end(&mut content).unwrap();
        assert_eq!(content, b"Hello");
    }

    #[test]
    fn test_compressible_content_is_deflated() {
        let content = vec![b'a'; 64 * 1024];
        let archive = compress(&content, "a.txt").unwrap();
        assert_eq!(first_method(&archive), CompressionMethod::Deflated);
        assert!(archive.len() < content.len());
    }

    #[test]
    fn test_tiny_content_falls_back_to_store() {
        // One byte never shrinks under deflate.
        let archive = compress(b"x", "x.bin").unwrap();
        assert_eq!(first_method(&archive), CompressionMethod::Stored);
    }

    #[test]
    fn test_empty_content_is_stored() {
        let archive = compress(b"", "empty.txt").unwrap();
        assert_eq!(first_method(&archive), CompressionMethod::Stored);

        let mut reader = ZipArchive::new(Cursor::new(archive.as_slice())).unwrap();
        assert_eq!(reader.by_index(0).unwrap().size(), 0);
    }

    #[test]
    fn test_empty_name_round_trip() {
        let archive = compress(b"abc", "").unwrap();
        let entry = crate::decompress_first(&archive).unwrap();
        assert_eq!(entry.name, "");
        assert_eq!(entry.content, b"abc");
    }

    #[test]
    fn test_name_length_limit() {
        let max = "n".repeat(MAX_ENTRY_NAME_LENGTH);
        let archive = compress(b"abc", &max).unwrap();
        assert_eq!(crate::decompress_first(&archive).unwrap().name, max);

        let over = "n".repeat(MAX_ENTRY_NAME_LENGTH + 1);
        let result = compress(b"abc", &over);
        assert!(matches!(result, Err(CodecError::InvalidEntryName(_))));
    }

    #[test]
    fn test_archive_signatures() {
        let archive = compress(b"Hello", "hello.txt").unwrap();
        assert_eq!(&archive[..4], b"PK\x03\x04");
        let eocd = archive
            .windows(4)
            .rposition(|w| w == b"PK\x05\x06")
            .unwrap();
        // End-of-central-directory record is 22 bytes without a comment.
        assert_eq!(archive.len() - eocd, 22);
    }

    #[test]
    fn test_needs_zip64() {
        assert!(!needs_zip64(0));
        assert!(!needs_zip64(1024));
        assert!(needs_zip64(u32::MAX as usize));
    }
}
