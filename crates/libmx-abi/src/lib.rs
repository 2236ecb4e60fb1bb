// All extern "C" exports take plain values or a caller-owned out pointer.
#![allow(clippy::missing_safety_doc)]
//! # libmx-abi
//!
//! `extern "C"` boundary for the libmx math functions.
//!
//! ```text
//! C caller -> ABI entry (this crate) -> mode/sentinel -> core kernel -> errno + ledger -> return
//! ```
//!
//! Symbols are exported unmangled in release builds only, so test binaries
//! keep linking against the host libm.
//!
//! No `long double` entry points are exported: the x87 80-bit type has no
//! Rust counterpart, so `lgammal`/`expm1l` stay with the host libm.

pub mod errno_abi;
pub mod math_abi;
