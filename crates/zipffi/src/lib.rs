//! C ABI for the single-entry ZIP archive codec.
//!
//! This crate exposes [`zipffi_core`] to foreign callers as a shared or
//! static library. The exported symbols are declared in
//! `include/zip_interface.h`:
//!
//! - `zip_compress` / `zip_compress_named`: one buffer in, one archive out
//! - `zip_decompress_first`: archive in, first entry's content and name out
//! - `zip_decompress_first_limited`: the same with a cap on the decoded size
//! - `zipffi_free_buffer`: the only way to release returned memory
//! - `zipffi_status_message`: static description of a status code
//!
//! # Memory contract
//!
//! Input buffers and names are borrowed for the duration of the call only.
//! Every non-null pointer written to an out-parameter is owned by the caller
//! and must be released exactly once with `zipffi_free_buffer`, never with
//! the caller's own `free`. On failure no out-parameter holds an allocation,
//! so callers need only check the returned status.
//!
//! # Logging
//!
//! Calls emit `tracing` events (`debug` for outcomes and inputs, `warn` for
//! failed calls). The library installs no subscriber; hosts that embed it
//! through Rust can attach their own.

pub mod api;
pub mod buffer;
pub mod status;
pub mod validate;

pub use api::zip_compress;
pub use api::zip_compress_named;
pub use api::zip_decompress_first;
pub use api::zip_decompress_first_limited;
pub use buffer::OwnedBuffer;
pub use buffer::zipffi_free_buffer;
pub use status::Status;
pub use status::ZIPFFI_ERR_ALLOC;
pub use status::ZIPFFI_ERR_EMPTY_ARCHIVE;
pub use status::ZIPFFI_ERR_IO;
pub use status::ZIPFFI_ERR_NULL;
pub use status::ZIPFFI_ERR_ZIP;
pub use status::ZIPFFI_OK;
pub use status::zipffi_status_message;
