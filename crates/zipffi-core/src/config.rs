//! Decompression limits.

/// Default cap on the uncompressed size of a decoded entry (1 GiB).
pub const MAX_ENTRY_SIZE_DEFAULT: u64 = 1024 * 1024 * 1024;

/// Limits applied while reading an archive.
///
/// The codec holds no state between calls, so a config is passed by
/// reference to each operation that needs it.
///
/// # Examples
///
/// ```
/// use zipffi_core::CodecConfig;
///
/// let config = CodecConfig::default();
/// assert_eq!(config.max_entry_size, zipffi_core::MAX_ENTRY_SIZE_DEFAULT);
///
/// let small = CodecConfig {
///     max_entry_size: 16 * 1024,
/// };
/// assert!(small.max_entry_size < config.max_entry_size);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum uncompressed size of the decoded entry, in bytes.
    pub max_entry_size: u64,
}

impl Default for CodecConfig {
    /// Creates a `CodecConfig` with `max_entry_size` set to 1 GiB.
    fn default() -> Self {
        Self {
            max_entry_size: MAX_ENTRY_SIZE_DEFAULT,
        }
    }
}

impl CodecConfig {
    /// Creates a configuration without an entry size cap.
    ///
    /// Use only for archives from trusted sources: the whole entry is
    /// inflated into memory.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_entry_size: u64::MAX,
        }
    }

    /// Returns `true` if `size` is within the configured limit.
    #[must_use]
    pub const fn allows(&self, size: u64) -> bool {
        size <= self.max_entry_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodecConfig::default();
        assert_eq!(config.max_entry_size, 1024 * 1024 * 1024);
    }

    #[test]
    fn test_unlimited_config() {
        let config = CodecConfig::unlimited();
        assert!(config.allows(u64::MAX));
    }

    #[test]
    fn test_allows_boundary() {
        let config = CodecConfig { max_entry_size: 10 };
        assert!(config.allows(0));
        assert!(config.allows(10));
        assert!(!config.allows(11));
    }
}
