//! Log-gamma evaluator.
//!
//! Natural logarithm of `|Γ(x)|` with the sign of `Γ(x)` reported
//! separately, after Moshier's Cephes `lgaml`:
//!
//! - `x < -34`: cosecant reflection onto the positive axis.
//! - `-34 <= x < 13`: recurrence into `[2, 3]` and a rational
//!   approximation there; a dedicated expansion covers `|x| <= 1/32`.
//! - `x >= 13`: Stirling's formula with a correction series in `1/x²`.
//!
//! Evaluation is in binary64. The coefficient tables are the published
//! extended-precision values; each literal rounds to the nearest `f64`.

use super::error::{MathError, Sentinel};
use super::float::{fabs, floor, log, sin};
use super::poly::{p1evl, polevl};

const PI: f64 = std::f64::consts::PI;

/// `ln(√(2π))`.
const LS2PI: f64 = 0.918_938_533_204_672_741_78;

/// Largest argument whose log-gamma is finite in binary64.
pub const MAXLGM: f64 = 2.556_348e305;

const REFLECT_BELOW: f64 = -34.0;
const STIRLING_FROM: f64 = 13.0;
const SMALL_ARG: f64 = 0.031_25;
/// Above this the `1/x²` correction no longer changes the result.
const STIRLING_BARE_ABOVE: f64 = 1.0e10;

// 1/Γ(x) ≈ x·S(x) for 0 < x <= 1/32.
#[allow(clippy::excessive_precision)]
const S: [f64; 9] = [
    -1.193_945_051_381_510_095_614e-3,
    7.220_599_478_036_909_672_331e-3,
    -9.622_023_360_406_271_645_744e-3,
    -4.219_773_360_705_915_470_089e-2,
    1.665_386_113_720_805_206_758e-1,
    -4.200_263_503_403_344_054_473e-2,
    -6.558_780_715_202_540_684_668e-1,
    5.772_156_649_015_328_608_253e-1,
    1.000_000_000_000_000_000_000e0,
];

// Same for -1/32 <= x < 0, evaluated at -x.
#[allow(clippy::excessive_precision)]
const SN: [f64; 9] = [
    1.133_374_167_243_894_382_010e-3,
    7.220_837_261_893_170_325_704e-3,
    9.621_911_155_035_976_733_706e-3,
    -4.219_773_343_731_191_721_664e-2,
    -1.665_386_113_944_413_519_335e-1,
    -4.200_263_503_402_112_910_504e-2,
    6.558_780_715_202_536_547_116e-1,
    5.772_156_649_015_328_608_727e-1,
    -1.000_000_000_000_000_000_000e0,
];

// ln Γ(x) = (x - 0.5)·ln x - x + LS2PI + A(1/x²)/x, x >= 8.
#[allow(clippy::excessive_precision)]
const A: [f64; 7] = [
    4.885_026_142_432_270_781_165e-3,
    -1.880_801_938_119_376_907_179e-3,
    8.412_723_297_322_498_080_632e-4,
    -5.952_345_851_765_688_514_613e-4,
    7.936_507_795_855_070_755_671e-4,
    -2.777_777_777_750_349_603_440e-3,
    8.333_333_333_333_331_447_505e-2,
];

// ln Γ(x + 2) = x·B(x)/C(x), 0 <= x <= 1. C is monic; its leading 1 is implied.
#[allow(clippy::excessive_precision)]
const B: [f64; 7] = [
    -2.163_690_827_643_812_857_640e3,
    -8.723_871_522_843_511_459_790e4,
    -1.104_326_814_691_464_261_197e6,
    -6.111_225_012_005_214_299_996e6,
    -1.625_568_062_543_700_591_014e7,
    -2.003_937_418_103_815_175_475e7,
    -8.875_666_783_650_703_802_159e6,
];

#[allow(clippy::excessive_precision)]
const C: [f64; 7] = [
    -5.139_481_484_435_370_143_617e2,
    -3.403_570_840_534_304_670_537e4,
    -6.227_441_164_066_219_501_697e5,
    -4.814_940_379_411_882_186_630e6,
    -1.785_433_287_045_078_156_959e7,
    -3.138_646_407_656_182_662_088e7,
    -2.099_336_717_757_895_876_142e7,
];

/// Result of a log-gamma evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LgammaOutcome {
    /// `ln|Γ(x)|`, or the sentinel on error.
    pub value: f64,
    /// Sign of `Γ(x)`: always `1` or `-1`.
    pub sign: i32,
    /// Domain/range condition, if one was raised.
    pub status: Option<MathError>,
}

impl LgammaOutcome {
    const fn ok(value: f64, sign: i32) -> Self {
        Self {
            value,
            sign,
            status: None,
        }
    }

    fn pole(sentinel: Sentinel, sign: i32) -> Self {
        Self {
            value: sentinel.signed(1),
            sign,
            status: Some(MathError::Domain),
        }
    }

    fn overflow(sentinel: Sentinel, sign: i32) -> Self {
        Self {
            value: sentinel.signed(sign),
            sign,
            status: Some(MathError::Range),
        }
    }

    /// `(value, sign)` on success, the raised condition otherwise.
    pub fn into_result(self) -> Result<(f64, i32), MathError> {
        match self.status {
            None => Ok((self.value, self.sign)),
            Some(e) => Err(e),
        }
    }
}

/// Reentrant log-gamma: `ln|Γ(x)|` plus the sign of `Γ(x)`.
///
/// Poles and overflow return `+∞`; see [`lgamma_r_with`] to pick a
/// finite sentinel instead.
#[must_use]
pub fn lgamma_r(x: f64) -> LgammaOutcome {
    lgamma_r_with(x, Sentinel::Infinity)
}

/// Reentrant log-gamma with an explicit sentinel for poles and overflow.
///
/// - NaN yields NaN, `±∞` yields `+∞`; neither raises a condition.
/// - Non-positive integers raise [`MathError::Domain`].
/// - `x > MAXLGM` raises [`MathError::Range`].
#[must_use]
pub fn lgamma_r_with(x: f64, sentinel: Sentinel) -> LgammaOutcome {
    if x.is_nan() {
        return LgammaOutcome::ok(f64::NAN, 1);
    }
    if x.is_infinite() {
        return LgammaOutcome::ok(f64::INFINITY, 1);
    }
    if x < REFLECT_BELOW {
        return reflect(x, sentinel);
    }
    if x < STIRLING_FROM {
        return reduce(x, sentinel);
    }
    if x > MAXLGM {
        return LgammaOutcome::overflow(sentinel, 1);
    }
    LgammaOutcome::ok(stirling(x), 1)
}

/// `ln|Γ(x)|` without the sign.
#[inline]
#[must_use]
pub fn lgamma(x: f64) -> f64 {
    lgamma_r(x).value
}

/// `x < -34`: ln|Γ(x)| = ln(π / (q·sin(πz))) - ln Γ(q), with `q = -x`.
fn reflect(x: f64, sentinel: Sentinel) -> LgammaOutcome {
    let q = -x;
    // q > 34, so this lands in the Stirling (or overflow) branch.
    let w = lgamma_r_with(q, sentinel).value;
    let mut p = floor(q);
    if p == q {
        return LgammaOutcome::pole(sentinel, 1);
    }
    let sign = if p % 2.0 == 0.0 { -1 } else { 1 };
    let mut z = q - p;
    if z > 0.5 {
        p += 1.0;
        z = p - q;
    }
    let z = q * sin(PI * z);
    if z == 0.0 {
        return LgammaOutcome::pole(sentinel, sign);
    }
    LgammaOutcome::ok(log(PI / z) - w, sign)
}

/// `-34 <= x < 13`: shift into `[2, 3]`, accumulating the product of the
/// shifted arguments in `z`.
fn reduce(mut x: f64, sentinel: Sentinel) -> LgammaOutcome {
    let mut z = 1.0;
    let mut nx = floor(x + 0.5);
    let f = x - nx;
    while x >= 3.0 {
        nx -= 1.0;
        x = nx + f;
        z *= x;
    }
    while x < 2.0 {
        if fabs(x) <= SMALL_ARG {
            return small_argument(x, z, sentinel);
        }
        z /= nx + f;
        nx += 1.0;
        x = nx + f;
    }
    let sign = if z < 0.0 {
        z = -z;
        -1
    } else {
        1
    };
    if x == 2.0 {
        return LgammaOutcome::ok(log(z), sign);
    }
    let x = (nx - 2.0) + f;
    let p = x * polevl(x, &B) / p1evl(x, &C);
    LgammaOutcome::ok(log(z) + p, sign)
}

/// `|x| <= 1/32` reached during reduction; `z` carries the recurrence product.
fn small_argument(x: f64, z: f64, sentinel: Sentinel) -> LgammaOutcome {
    if x == 0.0 {
        return LgammaOutcome::pole(sentinel, 1);
    }
    let d = if x < 0.0 {
        let x = -x;
        x * polevl(x, &SN)
    } else {
        x * polevl(x, &S)
    };
    let sign = if (z < 0.0) != (d < 0.0) { -1 } else { 1 };
    let q = z / d;
    if q.is_finite() {
        return LgammaOutcome::ok(log(fabs(q)), sign);
    }
    // |x| below 1/MAXNUM: the quotient overflows, its logarithm does not.
    LgammaOutcome::ok(log(fabs(z)) - log(fabs(d)), sign)
}

fn stirling(x: f64) -> f64 {
    let q = (x - 0.5) * log(x) - x + LS2PI;
    if x > STIRLING_BARE_ABOVE {
        return q;
    }
    let p = 1.0 / (x * x);
    q + polevl(p, &A) / x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= 1e-13 * expected.abs().max(1.0)
    }

    #[test]
    fn integers_match_factorials() {
        let mut fact = 1.0_f64;
        for n in 1..=30 {
            let out = lgamma_r(n as f64);
            assert!(
                close(out.value, fact.ln()),
                "lgamma({n}) = {}, want {}",
                out.value,
                fact.ln()
            );
            assert_eq!(out.sign, 1);
            assert_eq!(out.status, None);
            fact *= n as f64;
        }
    }

    #[test]
    fn one_and_two_are_exact_zero() {
        assert_eq!(lgamma(1.0), 0.0);
        assert_eq!(lgamma(2.0), 0.0);
    }

    #[test]
    fn half_integer_reference_values() {
        // ln Γ(1/2) = ln √π
        assert!(close(lgamma(0.5), 0.5 * PI.ln()));
        assert!(close(lgamma(1.5), -0.120_782_237_635_245_222_3));
        assert!(close(lgamma(2.5), 0.284_682_870_472_919_159_6));
        assert!(close(lgamma(12.5), 18.734_347_511_936_445_70));
    }

    #[test]
    fn small_arguments_take_expansion() {
        let pos = lgamma_r(0.03);
        assert!(close(pos.value, 3.489_971_043_442_411_954));
        assert_eq!(pos.sign, 1);

        let neg = lgamma_r(-0.03);
        assert!(close(neg.value, 3.524_625_630_446_003_706));
        assert_eq!(neg.sign, -1);

        // ln Γ(x) ≈ -ln x near zero
        assert!(close(lgamma(1e-10), 23.025_850_929_882_735_24));
        assert_eq!(lgamma_r(-1e-10).sign, -1);
    }

    #[test]
    fn subnormal_arguments_stay_finite() {
        // 1/x overflows below about 5.6e-309; ln|Γ(x)| ≈ -ln|x| does not.
        for mag in [1e-300, f64::MIN_POSITIVE, 4e-309, 1e-310, 5e-324] {
            for (x, sign) in [(mag, 1), (-mag, -1)] {
                let out = lgamma_r(x);
                assert_eq!(out.status, None, "status at {x:e}");
                assert_eq!(out.sign, sign, "sign at {x:e}");
                assert!(out.value.is_finite(), "value at {x:e}: {}", out.value);
                assert!(
                    close(out.value, -mag.ln()),
                    "lgamma({x:e}) = {}, want {}",
                    out.value,
                    -mag.ln()
                );
            }
        }
        assert!(close(lgamma(5e-324), 744.440_071_921_381_262_3));
    }

    #[test]
    fn negative_non_integers() {
        let cases = [
            (-0.5, 1.265_512_123_484_645_396, -1),
            (-1.5, 0.860_047_015_376_481_014_5, 1),
            (-2.5, -0.056_243_716_497_674_050_67, -1),
            (-3.5, -1.309_006_684_993_042_046, 1),
            (-10.25, -14.203_997_900_931_090_65, -1),
            (-33.5, -85.669_241_055_931_674_02, 1),
        ];
        for (x, want, sign) in cases {
            let out = lgamma_r(x);
            assert!(close(out.value, want), "lgamma({x}) = {}", out.value);
            assert_eq!(out.sign, sign, "sign at {x}");
            assert_eq!(out.status, None);
        }
    }

    #[test]
    fn reflection_branch_values() {
        let cases = [
            (-34.5, -89.210_200_379_968_988_09, -1),
            (-35.25, -91.538_141_730_848_044_57, 1),
            (-40.75, -111.612_233_392_890_727_5, -1),
            (-100.5, -364.900_968_309_427_351_8, -1),
        ];
        for (x, want, sign) in cases {
            let out = lgamma_r(x);
            assert!(close(out.value, want), "lgamma({x}) = {}", out.value);
            assert_eq!(out.sign, sign, "sign at {x}");
        }
    }

    #[test]
    fn stirling_branch_values() {
        assert!(close(lgamma(20.0), 39.339_884_187_199_494_04));
        assert!(close(lgamma(100.0), 359.134_205_369_575_398_8));
        assert!(close(lgamma(1.0e5), 1_051_287.708_973_656_895));
        // past the correction cutoff
        assert!(close(lgamma(2.0e10), 454_379_962_199.067_482_5));
        assert!(close(lgamma(1.0e300), 6.897_755_278_982_137_415e302));
    }

    #[test]
    fn sign_parity_on_negative_axis() {
        let mut x = -33.875;
        while x < 0.0 {
            let expected = if floor(-x) % 2.0 == 0.0 { -1 } else { 1 };
            assert_eq!(lgamma_r(x).sign, expected, "sign at {x}");
            x += 0.25;
        }
    }

    #[test]
    fn positive_arguments_have_positive_sign() {
        for x in [1e-300, 0.01, 0.5, 2.75, 12.999, 13.0, 55.5, 1e200] {
            assert_eq!(lgamma_r(x).sign, 1, "sign at {x}");
        }
    }

    #[test]
    fn poles_raise_domain_error() {
        for x in [0.0, -0.0, -1.0, -3.0, -13.0, -34.0, -35.0, -1e20] {
            let out = lgamma_r(x);
            assert_eq!(out.status, Some(MathError::Domain), "status at {x}");
            assert_eq!(out.value, f64::INFINITY);
            assert_eq!(out.sign, 1);
        }
    }

    #[test]
    fn overflow_raises_range_error() {
        let out = lgamma_r(3.0e305);
        assert_eq!(out.status, Some(MathError::Range));
        assert_eq!(out.value, f64::INFINITY);
        assert_eq!(out.sign, 1);

        let at_limit = lgamma_r(MAXLGM);
        assert_eq!(at_limit.status, None);
        assert!(at_limit.value.is_finite());
    }

    #[test]
    fn finite_sentinel_replaces_infinity() {
        let pole = lgamma_r_with(-3.0, Sentinel::MaxFinite);
        assert_eq!(pole.value, f64::MAX);
        assert_eq!(pole.status, Some(MathError::Domain));

        let over = lgamma_r_with(f64::MAX, Sentinel::MaxFinite);
        assert_eq!(over.value, f64::MAX);
        assert_eq!(over.status, Some(MathError::Range));

        // ordinary inputs are unaffected
        assert_eq!(
            lgamma_r_with(4.0, Sentinel::MaxFinite),
            lgamma_r_with(4.0, Sentinel::Infinity)
        );
    }

    #[test]
    fn special_inputs() {
        let nan = lgamma_r(f64::NAN);
        assert!(nan.value.is_nan());
        assert_eq!(nan.status, None);
        assert_eq!(nan.sign, 1);

        for x in [f64::INFINITY, f64::NEG_INFINITY] {
            let out = lgamma_r(x);
            assert_eq!(out.value, f64::INFINITY);
            assert_eq!(out.status, None);
        }
    }

    #[test]
    fn recurrence_holds_across_reflection_boundary() {
        // ln|Γ(x)| = ln|Γ(x + 1)| - ln|x|
        for x in [-34.1, -34.25, -34.5, -34.75, -34.9] {
            let lhs = lgamma(x);
            let rhs = lgamma(x + 1.0) - (-x).ln();
            assert!(close(lhs, rhs), "recurrence at {x}: {lhs} vs {rhs}");
        }
    }

    #[test]
    fn recurrence_holds_across_stirling_boundary() {
        for x in [12.01, 12.25, 12.5, 12.9] {
            let lhs = lgamma(x + 1.0);
            let rhs = lgamma(x) + x.ln();
            assert!(close(lhs, rhs), "recurrence at {x}: {lhs} vs {rhs}");
        }
    }

    #[test]
    fn into_result_splits_status() {
        assert_eq!(lgamma_r(3.0).into_result().map(|(_, s)| s), Ok(1));
        assert_eq!(lgamma_r(-2.0).into_result(), Err(MathError::Domain));
    }
}
