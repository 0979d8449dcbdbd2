//! Property-based tests for curve mapping.
//!
//! These tests verify properties that should hold for every curve shape and
//! both mapping strategies.

use curve_interpolator::{
    CurveMapper, CurveParameters, NumericalMapper, SegmentedMapper, bounding_box, lookup_t,
};
use proptest::prelude::*;
use quickcheck_macros::quickcheck;

const SEGMENTED_ROUND_TRIP: f64 = 1e-3;
// Sharp turns slow the curve nearly to a stop, which the inverse fit
// tracks less closely than smooth runs.
const NUMERICAL_ROUND_TRIP: f64 = 1e-2;
const NUMERICAL_SMOOTH_ROUND_TRIP: f64 = 1e-4;
const BOX_TOLERANCE: f64 = 1e-9;

fn sanitize_f64(v: f64) -> f64 {
    if v.is_finite() { v.clamp(-1e3, 1e3) } else { 0.0 }
}

fn sanitize_points(raw: Vec<(f64, f64)>) -> Vec<[f64; 2]> {
    let mut points: Vec<[f64; 2]> = raw
        .into_iter()
        .take(8)
        .map(|(x, y)| [sanitize_f64(x), sanitize_f64(y)])
        .collect();
    while points.len() < 2 {
        let next = points.len() as f64;
        points.push([next, next * 2.0]);
    }
    points
}

fn sanitize_unit(v: f64) -> f64 {
    if v.is_finite() {
        v.abs().fract()
    } else {
        0.5
    }
}

#[quickcheck]
fn prop_endpoints_are_control_points(raw: Vec<(f64, f64)>, tension: f64, closed: bool) -> bool {
    let points = sanitize_points(raw);
    let params = CurveParameters::default()
        .with_tension(sanitize_unit(tension))
        .with_closed(closed);
    let Ok(mapper) = SegmentedMapper::new(points.clone(), params, 50) else {
        return false;
    };
    let first = points[0];
    let last = if closed { first } else { points[points.len() - 1] };
    mapper.point_at_t(0.0) == first && mapper.point_at_t(1.0) == last
}

#[quickcheck]
fn prop_curve_passes_through_control_points(raw: Vec<(f64, f64)>, alpha: f64) -> bool {
    let points = sanitize_points(raw);
    let params = CurveParameters::catmull_rom().with_alpha(sanitize_unit(alpha));
    let Ok(mapper) = NumericalMapper::with_defaults(points.clone(), params) else {
        return false;
    };
    let n = mapper.segment_count() as f64;
    points.iter().enumerate().all(|(i, expected)| {
        let actual = mapper.point_at_t(i as f64 / n);
        let scale = 1.0 + expected[0].abs().max(expected[1].abs());
        (actual[0] - expected[0]).abs() < 1e-9 * scale
            && (actual[1] - expected[1]).abs() < 1e-9 * scale
    })
}

#[quickcheck]
fn prop_box_contains_control_points(raw: Vec<(f64, f64)>, tension: f64) -> bool {
    let points = sanitize_points(raw);
    let params = CurveParameters::default().with_tension(sanitize_unit(tension));
    let Ok(mapper) = NumericalMapper::with_defaults(points.clone(), params) else {
        return false;
    };
    let bounds = bounding_box(&mapper, 0.0, 1.0);
    points.iter().all(|p| bounds.contains(p, BOX_TOLERANCE))
}

#[quickcheck]
fn prop_lookup_hits_target_value(raw: Vec<(f64, f64)>, target: f64) -> bool {
    let points = sanitize_points(raw);
    let scale = points
        .iter()
        .flat_map(|p| p.iter())
        .fold(1.0f64, |acc, v| acc.max(v.abs()));
    let Ok(mapper) = SegmentedMapper::with_defaults(points, CurveParameters::default()) else {
        return false;
    };
    let target = sanitize_f64(target);
    let Ok(times) = lookup_t(&mapper, target, 1, 0, None) else {
        return false;
    };
    times.iter().all(|t| {
        let y = mapper.point_at_t(*t)[1];
        (y - target).abs() < 1e-5 * scale
    })
}

fn separated_points() -> impl Strategy<Value = Vec<[f64; 2]>> {
    prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 2..7).prop_filter(
        "control points must be at least one unit apart",
        |raw| {
            raw.windows(2).all(|w| {
                let dx = w[1].0 - w[0].0;
                let dy = w[1].1 - w[0].1;
                dx * dx + dy * dy >= 1.0
            })
        },
    )
    .prop_map(|raw| raw.into_iter().map(|(x, y)| [x, y]).collect())
}

/// Open curves advancing 5..20 units in x per point with bounded y, so no
/// segment turns back on itself.
fn smooth_points() -> impl Strategy<Value = Vec<[f64; 2]>> {
    prop::collection::vec((5.0..20.0f64, -10.0..10.0f64), 2..7).prop_map(|raw| {
        let mut x = 0.0;
        raw.into_iter()
            .map(|(step, y)| {
                let point = [x, y];
                x += step;
                point
            })
            .collect()
    })
}

fn parameters() -> impl Strategy<Value = CurveParameters> {
    (0.0..0.9f64, 0.0..=1.0f64, any::<bool>()).prop_map(|(tension, alpha, closed)| {
        CurveParameters::default()
            .with_tension(tension)
            .with_alpha(alpha)
            .with_closed(closed)
    })
}

proptest! {
    #[test]
    fn test_segmented_round_trip(points in separated_points(), params in parameters(), u in 0.0..=1.0f64) {
        let mapper = SegmentedMapper::with_defaults(points, params);
        prop_assert!(mapper.is_ok());
        if let Ok(mapper) = mapper {
            let back = mapper.u_at_t(mapper.t_at_u(u));
            prop_assert!((back - u).abs() < SEGMENTED_ROUND_TRIP, "u = {}, back = {}", u, back);
        }
    }

    #[test]
    fn test_numerical_round_trip(points in separated_points(), params in parameters(), u in 0.0..=1.0f64) {
        let mapper = NumericalMapper::with_defaults(points, params);
        prop_assert!(mapper.is_ok());
        if let Ok(mapper) = mapper {
            let back = mapper.u_at_t(mapper.t_at_u(u));
            prop_assert!((back - u).abs() < NUMERICAL_ROUND_TRIP, "u = {}, back = {}", u, back);
        }
    }

    #[test]
    fn test_numerical_round_trip_on_smooth_curves(
        points in smooth_points(),
        tension in 0.0..=0.5f64,
        alpha in 0.0..=1.0f64,
        u in 0.0..=1.0f64,
    ) {
        let params = CurveParameters::default().with_tension(tension).with_alpha(alpha);
        let mapper = NumericalMapper::with_defaults(points, params);
        prop_assert!(mapper.is_ok());
        if let Ok(mapper) = mapper {
            let back = mapper.u_at_t(mapper.t_at_u(u));
            prop_assert!(
                (back - u).abs() < NUMERICAL_SMOOTH_ROUND_TRIP,
                "tension = {}, u = {}, back = {}", tension, u, back
            );
        }
    }

    #[test]
    fn test_length_is_monotonic(points in separated_points(), params in parameters()) {
        let mapper = NumericalMapper::with_defaults(points, params);
        prop_assert!(mapper.is_ok());
        if let Ok(mapper) = mapper {
            prop_assert_eq!(mapper.length_at(0.0), 0.0);
            prop_assert_eq!(mapper.length_at(1.0), mapper.total_length());
            let mut previous_length = 0.0;
            let mut previous_u = 0.0;
            for k in 1..=50 {
                let x = k as f64 / 50.0;
                let length = mapper.length_at(x);
                let u = mapper.u_at_t(x);
                prop_assert!(length >= previous_length);
                prop_assert!(u >= previous_u - 1e-12);
                previous_length = length;
                previous_u = u;
            }
        }
    }

    #[test]
    fn test_box_contains_random_samples(points in separated_points(), params in parameters(), seed in any::<u64>()) {
        let mapper = SegmentedMapper::with_defaults(points, params);
        prop_assert!(mapper.is_ok());
        if let Ok(mapper) = mapper {
            let bounds = bounding_box(&mapper, 0.0, 1.0);
            let mut rng = fastrand::Rng::with_seed(seed);
            for _ in 0..1000 {
                let point = mapper.point_at_u(rng.f64());
                prop_assert!(bounds.contains(&point, BOX_TOLERANCE), "{:?} outside {:?}", point, bounds);
            }
        }
    }
}
