//! Exported compression and decompression entry points.
//!
//! Every function clears its out-parameters on entry, writes them only once
//! the whole call has succeeded, and returns a status code from
//! [`crate::status`]. Panics are caught before they can unwind into foreign
//! frames.

use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::ptr;

use libc::c_char;
use libc::c_int;
use tracing::debug;
use tracing::error;
use tracing::warn;
use zipffi_core::CodecConfig;

use crate::buffer::OwnedBuffer;
use crate::status::Status;
use crate::status::ZIPFFI_OK;
use crate::validate;

/// Runs one boundary call, converting its outcome to a status code.
fn guarded<F>(call: &'static str, body: F) -> c_int
where
    F: FnOnce() -> Result<(), Status>,
{
    match catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(())) => {
            debug!(call, "call succeeded");
            ZIPFFI_OK
        }
        Ok(Err(status)) => {
            warn!(call, code = status.code(), %status, "call failed");
            status.code()
        }
        Err(_) => {
            error!(call, "panic caught at FFI boundary");
            Status::Codec.code()
        }
    }
}

/// Logs a codec failure and maps it to its status.
fn codec_failure(call: &'static str) -> impl FnOnce(zipffi_core::CodecError) -> Status {
    move |err| {
        debug!(call, error = %err, "codec rejected input");
        Status::from(err)
    }
}

/// Shared body of the two compression exports.
///
/// # Safety
///
/// Both out-parameters must be valid for writes.
unsafe fn compress_into(
    input: &[u8],
    name: &str,
    out_ptr: *mut *mut u8,
    out_len: *mut usize,
) -> Result<(), Status> {
    debug!(input_len = input.len(), name, "compressing");
    let archive = zipffi_core::compress(input, name).map_err(codec_failure("compress"))?;
    let buffer = OwnedBuffer::copy_from(&archive)?;
    debug!(archive_len = buffer.len(), "archive built");
    let (ptr, len) = buffer.into_raw();

    // SAFETY: guaranteed writable by the caller.
    unsafe {
        *out_ptr = ptr;
        *out_len = len;
    }
    Ok(())
}

/// Clears a pair of data out-parameters.
///
/// # Safety
///
/// Non-null pointers must be valid for writes.
unsafe fn clear_data_out(out_ptr: *mut *mut u8, out_len: *mut usize) {
    // SAFETY: each pointer is written only when non-null.
    unsafe {
        if !out_ptr.is_null() {
            *out_ptr = ptr::null_mut();
        }
        if !out_len.is_null() {
            *out_len = 0;
        }
    }
}

/// Compresses `data` into a ZIP archive holding one entry named `entry_name`.
///
/// On success returns `0` and stores a newly allocated archive in `*out_ptr`
/// and its length in `*out_len`. On failure returns a nonzero status and
/// leaves `*out_ptr` null and `*out_len` zero.
///
/// # Safety
///
/// - `data` must be null or valid for reads of `len` bytes.
/// - `entry_name` must be null or a NUL-terminated string.
/// - `out_ptr` and `out_len` must be null or valid for writes.
/// - The archive must be released exactly once with `zipffi_free_buffer`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn zip_compress(
    data: *const u8,
    len: usize,
    entry_name: *const c_char,
    out_ptr: *mut *mut u8,
    out_len: *mut usize,
) -> c_int {
    guarded("zip_compress", || {
        // SAFETY: only non-null out-parameters are written.
        unsafe { clear_data_out(out_ptr, out_len) };
        if out_ptr.is_null() || out_len.is_null() {
            return Err(Status::InvalidInput);
        }

        // SAFETY: pointer validity is part of this function's contract.
        let input = unsafe { validate::input_slice(data, len) }?;
        // SAFETY: pointer validity is part of this function's contract.
        let name = unsafe { validate::c_name(entry_name) }?;

        // SAFETY: both out-parameters were checked non-null above.
        unsafe { compress_into(input, name, out_ptr, out_len) }
    })
}

/// Compresses `data` like [`zip_compress`], taking the entry name as a
/// length-delimited UTF-8 byte sequence instead of a C string.
///
/// The name needs no terminator and must not contain NUL bytes.
///
/// # Safety
///
/// - `data` must be null or valid for reads of `len` bytes.
/// - `name` must be null or valid for reads of `name_len` bytes.
/// - `out_ptr` and `out_len` must be null or valid for writes.
/// - The archive must be released exactly once with `zipffi_free_buffer`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn zip_compress_named(
    data: *const u8,
    len: usize,
    name: *const u8,
    name_len: usize,
    out_ptr: *mut *mut u8,
    out_len: *mut usize,
) -> c_int {
    guarded("zip_compress_named", || {
        // SAFETY: only non-null out-parameters are written.
        unsafe { clear_data_out(out_ptr, out_len) };
        if out_ptr.is_null() || out_len.is_null() {
            return Err(Status::InvalidInput);
        }

        // SAFETY: pointer validity is part of this function's contract.
        let input = unsafe { validate::input_slice(data, len) }?;
        // SAFETY: pointer validity is part of this function's contract.
        let name = unsafe { validate::sized_name(name, name_len) }?;

        // SAFETY: both out-parameters were checked non-null above.
        unsafe { compress_into(input, name, out_ptr, out_len) }
    })
}

/// Shared body of the two decompression exports.
///
/// # Safety
///
/// Same contract as [`zip_decompress_first`].
unsafe fn decompress_into(
    call: &'static str,
    zip_data: *const u8,
    zip_len: usize,
    config: &CodecConfig,
    out_ptr: *mut *mut u8,
    out_len: *mut usize,
    out_name: *mut *mut c_char,
) -> Result<(), Status> {
    // SAFETY: only non-null out-parameters are written.
    unsafe {
        clear_data_out(out_ptr, out_len);
        if !out_name.is_null() {
            *out_name = ptr::null_mut();
        }
    }
    if out_ptr.is_null() || out_len.is_null() || out_name.is_null() {
        return Err(Status::InvalidInput);
    }

    // SAFETY: pointer validity is part of the caller contract.
    let archive = unsafe { validate::input_slice(zip_data, zip_len) }?;
    debug!(
        archive_len = archive.len(),
        max_entry_size = config.max_entry_size,
        "decompressing first entry"
    );

    let (content, name) = zipffi_core::decompress_first_with_config(archive, config)
        .map_err(codec_failure(call))?
        .into_parts();

    // Allocate everything before publishing anything; a failed name
    // allocation drops and frees the data buffer.
    let data = if content.is_empty() {
        None
    } else {
        Some(OwnedBuffer::copy_from(&content)?)
    };
    let name = validate::output_name(name)
        .map(|name| OwnedBuffer::copy_c_str(&name))
        .transpose()?;

    let (data_ptr, data_len) = data.map_or((ptr::null_mut(), 0), OwnedBuffer::into_raw);
    let name_ptr = name.map_or(ptr::null_mut(), |name| name.into_raw().0.cast::<c_char>());

    // SAFETY: all three out-parameters were checked non-null above.
    unsafe {
        *out_ptr = data_ptr;
        *out_len = data_len;
        *out_name = name_ptr;
    }
    Ok(())
}

/// Decompresses the first entry of the ZIP archive in `zip_data`.
///
/// On success returns `0`, stores the entry content in `*out_ptr` /
/// `*out_len` and its name as a NUL-terminated string in `*out_name`. An
/// empty entry yields a null `*out_ptr` with `*out_len` zero. A name that
/// cannot be represented as C text yields a null `*out_name`; the call still
/// succeeds. On failure every out-parameter is null or zero.
///
/// No entry size limit applies, so every archive produced by
/// [`zip_compress`] decodes. Use [`zip_decompress_first_limited`] to cap the
/// decoded size of untrusted archives.
///
/// # Safety
///
/// - `zip_data` must be null or valid for reads of `zip_len` bytes.
/// - `out_ptr`, `out_len` and `out_name` must be null or valid for writes.
/// - Each non-null returned pointer must be released exactly once with
///   `zipffi_free_buffer`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn zip_decompress_first(
    zip_data: *const u8,
    zip_len: usize,
    out_ptr: *mut *mut u8,
    out_len: *mut usize,
    out_name: *mut *mut c_char,
) -> c_int {
    const CALL: &str = "zip_decompress_first";
    guarded(CALL, || {
        // SAFETY: forwarded caller contract.
        unsafe {
            decompress_into(
                CALL,
                zip_data,
                zip_len,
                &CodecConfig::unlimited(),
                out_ptr,
                out_len,
                out_name,
            )
        }
    })
}

/// Decompresses like [`zip_decompress_first`], failing with
/// `ZIPFFI_ERR_ZIP` when the entry is larger than `max_entry_size` bytes.
///
/// The limit is checked against the declared size before inflating and
/// against the bytes actually produced while inflating.
///
/// # Safety
///
/// Same contract as [`zip_decompress_first`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn zip_decompress_first_limited(
    zip_data: *const u8,
    zip_len: usize,
    max_entry_size: u64,
    out_ptr: *mut *mut u8,
    out_len: *mut usize,
    out_name: *mut *mut c_char,
) -> c_int {
    const CALL: &str = "zip_decompress_first_limited";
    guarded(CALL, || {
        let config = CodecConfig { max_entry_size };
        // SAFETY: forwarded caller contract.
        unsafe {
            decompress_into(
                CALL,
                zip_data,
                zip_len,
                &config,
                out_ptr,
                out_len,
                out_name,
            )
        }
    })
}
