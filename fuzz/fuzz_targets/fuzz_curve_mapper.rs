//! Fuzzes mapper construction and every query on arbitrary control points.
//!
//! The first three bytes choose tension, alpha and closed; the rest are read
//! as little-endian f64 coordinate pairs. Construction may fail, queries
//! must never panic.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_curve_mapper
#![no_main]
use curve_interpolator::{
    CurveMapper, CurveOptions, CurveParameters, MappingStrategy, bounding_box, lookup,
};
use libfuzzer_sys::fuzz_target;

fn read_f64(chunk: &[u8]) -> Option<f64> {
    let bytes: [u8; 8] = chunk.try_into().ok()?;
    Some(f64::from_le_bytes(bytes))
}

fuzz_target!(|data: &[u8]| {
    let Some((header, body)) = data.split_first_chunk::<3>() else {
        return;
    };
    let parameters = CurveParameters {
        tension: f64::from(header[0]) / 255.0,
        alpha: f64::from(header[1]) / 255.0,
        closed: header[2] & 1 == 1,
    };
    let mapping = if header[2] & 2 == 0 {
        MappingStrategy::segmented(64)
    } else {
        MappingStrategy::numerical(8, 9)
    };

    let coordinates: Vec<f64> = body.chunks_exact(8).filter_map(read_f64).collect();
    let points: Vec<[f64; 2]> = coordinates
        .chunks_exact(2)
        .take(16)
        .map(|pair| [pair[0], pair[1]])
        .collect();

    let options = CurveOptions {
        parameters,
        mapping,
    };
    let Ok(mut mapper) = options.build(points) else {
        return;
    };

    for k in 0..=8 {
        let x = f64::from(k) / 8.0;
        let _ = mapper.point_at_t(x);
        let _ = mapper.tangent_at_t(x);
        let t = mapper.t_at_u(x);
        let _ = mapper.u_at_t(t);
        let _ = mapper.length_at(x);
    }
    let bounds = bounding_box(&mapper, 0.0, 1.0);
    let _ = lookup(&mapper, bounds.min[1], 1, 0, None);
    let _ = lookup(&mapper, bounds.max[0], 0, -2, Some(0.0));

    mapper.set_closed(!parameters.closed);
    let _ = mapper.total_length();
});
