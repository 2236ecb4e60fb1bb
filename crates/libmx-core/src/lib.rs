//! # libmx-core
//!
//! Safe Rust implementations of the libmx special math functions.
//!
//! The kernels here are pure: they report domain and range conditions
//! through their return types. Mapping those conditions onto the C `errno`
//! side channel is the job of `libmx-abi`.

#![deny(unsafe_code)]

pub mod errno;
pub mod math;
