//! Polynomial evaluation kernels.
//!
//! Coefficient slices are stored highest degree first, matching the layout of
//! the published Cephes tables.

/// Evaluate `coef[0]·xᴺ + coef[1]·xᴺ⁻¹ + … + coef[N]` by Horner's rule.
#[inline]
pub fn polevl(x: f64, coef: &[f64]) -> f64 {
    let Some((first, rest)) = coef.split_first() else {
        return 0.0;
    };
    rest.iter().fold(*first, |acc, c| acc * x + c)
}

/// Like [`polevl`] with an implied leading coefficient of `1.0`.
///
/// `coef` holds the remaining `N` coefficients of a monic degree-`N` polynomial.
#[inline]
pub fn p1evl(x: f64, coef: &[f64]) -> f64 {
    coef.iter().fold(1.0, |acc, c| acc * x + c)
}
