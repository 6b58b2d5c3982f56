//! First-entry archive decoding.

use std::io::Cursor;
use std::io::ErrorKind;
use std::io::Read;

use tracing::trace;
use zip::ZipArchive;

use crate::CodecConfig;
use crate::CodecError;
use crate::Entry;
use crate::EntryInfo;
use crate::EntryMethod;
use crate::Result;

/// Upper bound on the buffer reserved up front from a declared entry size.
///
/// Declared sizes come from the archive and are untrusted; larger entries
/// grow the buffer as data is actually inflated.
const PREALLOC_LIMIT: u64 = 16 * 1024 * 1024;

/// Decodes the first entry of `archive` using the default limits.
///
/// # Examples
///
/// ```
/// use zipffi_core::compress;
/// use zipffi_core::decompress_first;
///
/// let archive = compress(&[0x48, 0x65, 0x6C, 0x6C, 0x6F], "hello.txt")?;
/// let (content, name) = decompress_first(&archive)?.into_parts();
/// assert_eq!(content, b"Hello");
/// assert_eq!(name, "hello.txt");
/// # Ok::<(), zipffi_core::CodecError>(())
/// ```
pub fn decompress_first(archive: &[u8]) -> Result<Entry> {
    decompress_first_with_config(archive, &CodecConfig::default())
}

/// Decodes the first entry of `archive`, in central directory order.
///
/// The entry is fully inflated whether it was stored or deflated, and its
/// CRC-32 is verified once the data has been read.
///
/// # Errors
///
/// Returns an error if:
/// - `archive` is empty
/// - The container cannot be parsed
/// - The container has no entries
/// - The entry is larger than `config.max_entry_size`
/// - The entry data is truncated or fails its checksum
pub fn decompress_first_with_config(archive: &[u8], config: &CodecConfig) -> Result<Entry> {
    if archive.is_empty() {
        return Err(CodecError::EmptyInput);
    }

    let mut reader = ZipArchive::new(Cursor::new(archive))?;
    if reader.is_empty() {
        return Err(CodecError::EmptyArchive);
    }

    let mut file = reader.by_index(0)?;
    let declared = file.size();
    if !config.allows(declared) {
        return Err(CodecError::EntryTooLarge {
            size: declared,
            max: config.max_entry_size,
        });
    }

    trace!(
        name = file.name(),
        method = %EntryMethod::from(file.compression()),
        declared,
        "decoding first entry"
    );

    let capacity = usize::try_from(declared.min(PREALLOC_LIMIT)).unwrap_or(0);
    let mut content = Vec::with_capacity(capacity);
    (&mut file)
        .take(config.max_entry_size.saturating_add(1))
        .read_to_end(&mut content)
        .map_err(map_read_error)?;

    let actual = content.len() as u64;
    if !config.allows(actual) {
        return Err(CodecError::EntryTooLarge {
            size: actual,
            max: config.max_entry_size,
        });
    }

    Ok(Entry {
        name: file.name().to_string(),
        content,
    })
}

/// Reads central directory metadata for the first entry without inflating it.
///
/// # Examples
///
/// ```
/// use zipffi_core::EntryMethod;
/// use zipffi_core::compress;
/// use zipffi_core::inspect_first;
///
/// let archive = compress(&vec![b'z'; 4096], "zeds.txt")?;
/// let info = inspect_first(&archive)?;
/// assert_eq!(info.name, "zeds.txt");
/// assert_eq!(info.size, 4096);
/// assert_eq!(info.method, EntryMethod::Deflated);
/// # Ok::<(), zipffi_core::CodecError>(())
/// ```
pub fn inspect_first(archive: &[u8]) -> Result<EntryInfo> {
    if archive.is_empty() {
        return Err(CodecError::EmptyInput);
    }

    let mut reader = ZipArchive::new(Cursor::new(archive))?;
    if reader.is_empty() {
        return Err(CodecError::EmptyArchive);
    }

    let file = reader.by_index_raw(0)?;
    Ok(EntryInfo {
        name: file.name().to_string(),
        method: file.compression().into(),
        compressed_size: file.compressed_size(),
        size: file.size(),
        crc32: file.crc32(),
    })
}

/// Corrupt or truncated entry data surfaces as an I/O error from the
/// inflating reader; report it as an invalid archive.
fn map_read_error(err: std::io::Error) -> CodecError {
    match err.kind() {
        ErrorKind::InvalidData | ErrorKind::UnexpectedEof => {
            CodecError::InvalidArchive(format!("entry data is corrupt: {err}"))
        }
        _ => CodecError::Io(err),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compress;
    use crate::test_utils::create_test_zip;
    use crate::test_utils::empty_zip;

    #[test]
    fn test_round_trip() {
        let archive = compress(b"round trip", "rt.txt").unwrap();
        let entry = decompress_first(&archive).unwrap();
        assert_eq!(entry.content, b"round trip");
        assert_eq!(entry.name, "rt.txt");
    }

    #[test]
    fn test_reads_only_first_entry() {
        let archive = create_test_zip(&[("first.txt", &b"one"[..]), ("second.txt", &b"two"[..])]);
        let entry = decompress_first(&archive).unwrap();
        assert_eq!(entry.name, "first.txt");
        assert_eq!(entry.content, b"one");
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = decompress_first(&[]);
        assert!(matches!(result, Err(CodecError::EmptyInput)));
    }

    #[test]
    fn test_zero_entries_rejected() {
        let result = decompress_first(&empty_zip());
        assert!(matches!(result, Err(CodecError::EmptyArchive)));
    }

    #[test]
    fn test_empty_entry_succeeds() {
        let archive = create_test_zip(&[("empty.txt", &b""[..])]);
        let entry = decompress_first(&archive).unwrap();
        assert!(entry.content.is_empty());
        assert_eq!(entry.name, "empty.txt");
    }

    #[test]
    fn test_garbage_rejected() {
        let result = decompress_first(b"definitely not a zip archive");
        assert!(matches!(result, Err(CodecError::Zip(_))));
    }

    #[test]
    fn test_truncated_rejected() {
        let archive = compress(&vec![b'q'; 4096], "q.txt").unwrap();
        let truncated = &archive[..archive.len() / 2];
        assert!(decompress_first(truncated).is_err());
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        let mut archive = create_test_zip(&[("crc.txt", &b"checksummed"[..])]);
        let data_offset = archive
            .windows(b"checksummed".len())
            .position(|w| w == b"checksummed")
            .unwrap();
        archive[data_offset] ^= 0xFF;

        let result = decompress_first(&archive);
        assert!(matches!(result, Err(CodecError::InvalidArchive(_))));
    }

    #[test]
    fn test_entry_size_limit() {
        let archive = compress(&vec![0u8; 1024], "zeros.bin").unwrap();
        let config = CodecConfig { max_entry_size: 512 };

        let result = decompress_first_with_config(&archive, &config);
        assert!(matches!(
            result,
            Err(CodecError::EntryTooLarge {
                size: 1024,
                max: 512
            })
        ));

        let config = CodecConfig {
            max_entry_size: 1024,
        };
        assert!(decompress_first_with_config(&archive, &config).is_ok());
        assert!(decompress_first_with_config(&archive, &CodecConfig::unlimited()).is_ok());
    }

    #[test]
    fn test_inspect_first_stored() {
        let archive = compress(b"x", "x.bin").unwrap();
        let info = inspect_first(&archive).unwrap();
        assert_eq!(info.name, "x.bin");
        assert_eq!(info.method, EntryMethod::Stored);
        assert_eq!(info.size, 1);
        assert_eq!(info.compressed_size, 1);
    }

    #[test]
    fn test_inspect_first_empty_archive() {
        assert!(matches!(
            inspect_first(&empty_zip()),
            Err(CodecError::EmptyArchive)
        ));
        assert!(matches!(inspect_first(&[]), Err(CodecError::EmptyInput)));
    }
}
