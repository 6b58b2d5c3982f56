//! Single-entry ZIP archive codec.
//!
//! `zipffi-core` turns one in-memory buffer into a standard ZIP archive
//! holding exactly one named entry, and reads the first entry back out of any
//! conformant ZIP archive. Entries are deflated, falling back to the store
//! method when deflate does not help, and every entry is CRC-32 checked on
//! the way out.
//!
//! The C ABI wrapper lives in the `zipffi` crate.
//!
//! # Examples
//!
//! ```
//! use zipffi_core::compress;
//! use zipffi_core::decompress_first;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = compress(b"Hello", "hello.txt")?;
//! let entry = decompress_first(&archive)?;
//! assert_eq!(entry.name, "hello.txt");
//! assert_eq!(entry.content, b"Hello");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod entry;
pub mod error;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use codec::MAX_ENTRY_NAME_LENGTH;
pub use codec::compress;
pub use codec::decompress_first;
pub use codec::decompress_first_with_config;
pub use codec::inspect_first;
pub use config::CodecConfig;
pub use config::MAX_ENTRY_SIZE_DEFAULT;
pub use entry::Entry;
pub use entry::EntryInfo;
pub use entry::EntryMethod;
pub use error::CodecError;
pub use error::Result;
