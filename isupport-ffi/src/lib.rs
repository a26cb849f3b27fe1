//! C ABI bridge for the isupport crate.
//!
//! Lets a server host written in another language register tokens, regenerate
//! the reply cache, and read back rendered `RPL_ISUPPORT` parameter lists.

use std::slice;
use std::str;

use isupport::{ISupportList, TokenError};

// ---------------------------------------------------------------------------
// Error codes (negative = error, 0 = success, positive = bytes written / count)
// ---------------------------------------------------------------------------

pub const ISUPPORT_OK: i32 = 0;
pub const ISUPPORT_ERR_NULL_POINTER: i32 = -1;
pub const ISUPPORT_ERR_INVALID_UTF8: i32 = -2;
pub const ISUPPORT_ERR_EMPTY_NAME: i32 = -3;
pub const ISUPPORT_ERR_INVALID_NAME: i32 = -4;
pub const ISUPPORT_ERR_INVALID_VALUE: i32 = -5;
pub const ISUPPORT_ERR_TOO_LONG: i32 = -6;
pub const ISUPPORT_ERR_INDEX_OUT_OF_RANGE: i32 = -7;
pub const ISUPPORT_ERR_BUFFER_TOO_SMALL: i32 = -8;

/// Opaque handle owned by the caller.
pub struct IsupportList {
    inner: ISupportList,
}

fn token_error_code(e: &TokenError) -> i32 {
    match e {
        TokenError::EmptyName => ISUPPORT_ERR_EMPTY_NAME,
        TokenError::InvalidNameChar { .. } => ISUPPORT_ERR_INVALID_NAME,
        TokenError::InvalidValueChar { .. } => ISUPPORT_ERR_INVALID_VALUE,
        TokenError::TooLong { .. } => ISUPPORT_ERR_TOO_LONG,
    }
}

fn to_result(r: Result<(), TokenError>) -> i32 {
    match r {
        Ok(()) => ISUPPORT_OK,
        Err(e) => token_error_code(&e),
    }
}

/// Borrow `len` bytes at `ptr` as UTF-8.
///
/// # Safety
/// - `ptr` must be valid for reads of `len` bytes, or `len` must be 0.
unsafe fn str_arg<'a>(ptr: *const u8, len: usize) -> Result<&'a str, i32> {
    if len == 0 {
        return Ok("");
    }
    if ptr.is_null() {
        return Err(ISUPPORT_ERR_NULL_POINTER);
    }
    let bytes = unsafe { slice::from_raw_parts(ptr, len) };
    str::from_utf8(bytes).map_err(|_| ISUPPORT_ERR_INVALID_UTF8)
}

/// Create an empty list with default limits. Free with [`isupport_list_free`].
#[unsafe(no_mangle)]
pub extern "C" fn isupport_list_new() -> *mut IsupportList {
    Box::into_raw(Box::new(IsupportList {
        inner: ISupportList::new(),
    }))
}

/// # Safety
/// - `list` must come from [`isupport_list_new`] and not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn isupport_list_free(list: *mut IsupportList) {
    if !list.is_null() {
        drop(unsafe { Box::from_raw(list) });
    }
}

/// Register `name=value`. Validated; the list is unchanged on error.
///
/// # Safety
/// - `list` must be a live handle from [`isupport_list_new`].
/// - `name`/`value` must be valid for reads of their lengths.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn isupport_add(
    list: *mut IsupportList,
    name: *const u8,
    name_len: usize,
    value: *const u8,
    value_len: usize,
) -> i32 {
    let Some(list) = (unsafe { list.as_mut() }) else {
        return ISUPPORT_ERR_NULL_POINTER;
    };
    let name = match unsafe { str_arg(name, name_len) } {
        Ok(s) => s,
        Err(rc) => return rc,
    };
    let value = match unsafe { str_arg(value, value_len) } {
        Ok(s) => s,
        Err(rc) => return rc,
    };
    to_result(list.inner.try_add(name, value))
}

/// Register a token without a value. Validated.
///
/// # Safety
/// - `list` must be a live handle from [`isupport_list_new`].
/// - `name` must be valid for reads of `name_len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn isupport_add_no_value(
    list: *mut IsupportList,
    name: *const u8,
    name_len: usize,
) -> i32 {
    let Some(list) = (unsafe { list.as_mut() }) else {
        return ISUPPORT_ERR_NULL_POINTER;
    };
    match unsafe { str_arg(name, name_len) } {
        Ok(name) => to_result(list.inner.try_add_no_value(name)),
        Err(rc) => rc,
    }
}

/// Remove a token. Returns 1 if it was registered, 0 otherwise.
///
/// # Safety
/// - `list` must be a live handle from [`isupport_list_new`].
/// - `name` must be valid for reads of `name_len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn isupport_remove(
    list: *mut IsupportList,
    name: *const u8,
    name_len: usize,
) -> i32 {
    let Some(list) = (unsafe { list.as_mut() }) else {
        return ISUPPORT_ERR_NULL_POINTER;
    };
    match unsafe { str_arg(name, name_len) } {
        Ok(name) => i32::from(list.inner.remove(name)),
        Err(rc) => rc,
    }
}

/// Rebuild and publish the reply cache. Returns the number of lines.
///
/// # Safety
/// - `list` must be a live handle from [`isupport_list_new`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn isupport_regenerate(list: *mut IsupportList) -> i32 {
    match unsafe { list.as_mut() } {
        Some(list) => list.inner.regenerate().len() as i32,
        None => ISUPPORT_ERR_NULL_POINTER,
    }
}

/// Number of lines in the published cache.
///
/// # Safety
/// - `list` must be a live handle from [`isupport_list_new`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn isupport_batch_count(list: *const IsupportList) -> i32 {
    match unsafe { list.as_ref() } {
        Some(list) => list.inner.cached_reply().len() as i32,
        None => ISUPPORT_ERR_NULL_POINTER,
    }
}

/// Write line `index` of the published cache as `TOKEN TOKEN :trailer`.
/// Returns the number of bytes written. Not NUL-terminated.
///
/// # Safety
/// - `list` must be a live handle from [`isupport_list_new`].
/// - `buf_ptr` must be valid for writes of `buf_len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn isupport_render_batch(
    list: *const IsupportList,
    index: usize,
    buf_ptr: *mut u8,
    buf_len: usize,
) -> i32 {
    let Some(list) = (unsafe { list.as_ref() }) else {
        return ISUPPORT_ERR_NULL_POINTER;
    };
    let cache = list.inner.cached_reply();
    let Some(batch) = cache.batches().get(index) else {
        return ISUPPORT_ERR_INDEX_OUT_OF_RANGE;
    };
    let rendered = batch.to_string();
    if rendered.len() > buf_len {
        return ISUPPORT_ERR_BUFFER_TOO_SMALL;
    }
    if buf_ptr.is_null() {
        return ISUPPORT_ERR_NULL_POINTER;
    }
    let buf = unsafe { slice::from_raw_parts_mut(buf_ptr, buf_len) };
    buf[..rendered.len()].copy_from_slice(rendered.as_bytes());
    rendered.len() as i32
}
