//! Single-entry ZIP codec.
//!
//! Both directions are pure in-memory transforms: each call reads only its
//! own inputs and returns freshly allocated output.

pub mod compress;
pub mod decompress;

pub use compress::MAX_ENTRY_NAME_LENGTH;
pub use compress::compress;
pub use decompress::decompress_first;
pub use decompress::decompress_first_with_config;
pub use decompress::inspect_first;
