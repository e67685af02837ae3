//! Conversions between Rust values and the representations used at the
//! libindy boundary.

use crate::error::{IndyError, Result};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Copy a required argument into a nul-terminated buffer
pub fn to_cstring(field: &'static str, value: &str) -> Result<CString> {
    CString::new(value)
        .map_err(|_| IndyError::InvalidArgument(format!("{field} contains an interior NUL byte")))
}

/// Copy an optional argument; absent and empty values are both passed as null
pub fn to_optional_cstring(field: &'static str, value: Option<&str>) -> Result<Option<CString>> {
    match value {
        Some(v) if !v.is_empty() => to_cstring(field, v).map(Some),
        _ => Ok(None),
    }
}

/// Length of a binary argument as carried by the native `u32` length field
pub fn buffer_len(field: &'static str, bytes: &[u8]) -> Result<u32> {
    native_len(field, bytes.len())
}

/// Narrow a buffer length to the native `u32` length field
pub fn native_len(field: &'static str, len: usize) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| IndyError::InvalidArgument(format!("{field} is larger than {} bytes", u32::MAX)))
}

/// Pointer for an optional nul-terminated argument
pub fn opt_ptr(value: Option<&CStr>) -> *const c_char {
    value.map_or(std::ptr::null(), CStr::as_ptr)
}

/// Copy a native string into owned memory.
///
/// A null pointer decodes to the empty string.
///
/// # Safety
///
/// `ptr` must be null or point to a nul-terminated string that stays valid
/// for the duration of the call.
pub unsafe fn c_str_to_string(ptr: *const c_char) -> Result<String> {
    if ptr.is_null() {
        return Ok(String::new());
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(str::to_owned)
        .map_err(|e| IndyError::InvalidResponse(format!("native string is not UTF-8: {e}")))
}

/// Copy a native byte buffer into owned memory.
///
/// A null pointer or zero length decodes to an empty vector.
///
/// # Safety
///
/// `ptr` must be null or point to at least `len` readable bytes that stay
/// valid for the duration of the call.
pub unsafe fn c_bytes_to_vec(ptr: *const u8, len: u32) -> Vec<u8> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(ptr, len as usize).to_vec()
}
