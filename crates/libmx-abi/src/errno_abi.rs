//! ABI layer for `<errno.h>`.
//!
//! Exposes the core thread-local errno slot, so a C caller reading `errno`
//! after `lgamma` sees the value the entry point stored.

use std::ffi::c_int;

#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn __errno_location() -> *mut c_int {
    libmx_core::errno::errno_location()
}
