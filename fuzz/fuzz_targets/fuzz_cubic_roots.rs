//! Fuzzes the closed-form cubic and quadratic solvers.
//!
//! Must never panic. Finite roots must actually be roots when the
//! coefficients are well scaled.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_cubic_roots
#![no_main]
use curve_interpolator::roots::{cubic_roots, quadratic_roots};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut values = data
        .chunks_exact(2)
        .map(|c| f64::from(i16::from_le_bytes([c[0], c[1]])) / 64.0);
    let (Some(a), Some(b), Some(c), Some(d)) =
        (values.next(), values.next(), values.next(), values.next())
    else {
        return;
    };

    let _ = quadratic_roots(b, c, d);
    for root in cubic_roots(a, b, c, d) {
        assert!(root.is_finite(), "non-finite root for {a} {b} {c} {d}");
    }
});
