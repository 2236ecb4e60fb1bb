#![no_main]
use libfuzzer_sys::fuzz_target;
use libmx_core::math::{MAXLGM, MathError, Sentinel, lgamma_r, lgamma_r_with};

fuzz_target!(|data: &[u8]| {
    let Some(bytes) = data.get(..8) else {
        return;
    };
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    let x = f64::from_le_bytes(raw);

    let out = lgamma_r(x);
    assert!(out.sign == 1 || out.sign == -1, "sign {} at {x:?}", out.sign);

    let pole = x.is_finite() && x <= 0.0 && x == x.floor();
    match out.status {
        Some(MathError::Domain) => {
            assert!(pole, "domain error off a pole at {x:?}");
            assert_eq!(out.value, f64::INFINITY);
        }
        Some(MathError::Range) => {
            assert!(x > MAXLGM, "range error below MAXLGM at {x:?}");
            assert_eq!(out.value, f64::INFINITY);
        }
        None => {
            assert!(!pole, "pole {x:?} not reported");
            if x.is_finite() {
                assert!(out.value.is_finite(), "non-finite result at {x:?}");
            }
        }
    }

    let hardened = lgamma_r_with(x, Sentinel::MaxFinite);
    assert_eq!(hardened.status, out.status);
    assert_eq!(hardened.sign, out.sign);
    if out.status.is_some() {
        assert_eq!(hardened.value, f64::MAX);
    } else {
        assert_eq!(hardened.value.to_bits(), out.value.to_bits());
    }
});
