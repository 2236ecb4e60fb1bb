//! Floating-point utility functions.
//!
//! Backed by the `libm` crate so kernels built on them produce the same bits
//! regardless of the host C library.

#[inline]
pub fn fabs(x: f64) -> f64 {
    libm::fabs(x)
}

#[inline]
pub fn floor(x: f64) -> f64 {
    libm::floor(x)
}

#[inline]
pub fn sin(x: f64) -> f64 {
    libm::sin(x)
}

#[inline]
pub fn log(x: f64) -> f64 {
    libm::log(x)
}
