//! Fuzzing tests for degenerate curves and edge-case inputs.
//!
//! These tests verify that coincident points, minimal curves and non-finite
//! values are either rejected up front or handled without NaN leaking out.

use curve_interpolator::{
    CurveError, CurveMapper, CurveParameters, NumericalMapper, SegmentedMapper, bounding_box,
    lookup, lookup_t,
};

type TestResult = Result<(), CurveError>;

fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("unexpected error: {:?}", e),
    }
}

fn finite(point: &[f64]) -> bool {
    point.iter().all(|v| v.is_finite())
}

#[test]
fn fuzz_coincident_leading_points() -> TestResult {
    let points = vec![[0.0, 0.0], [0.0, 0.0], [1.0, 1.0], [2.0, 0.0]];
    for alpha in [0.0, 0.5, 1.0] {
        let params = CurveParameters::catmull_rom().with_alpha(alpha);
        let numerical = NumericalMapper::with_defaults(points.clone(), params)?;
        let segmented = SegmentedMapper::with_defaults(points.clone(), params)?;

        for t in [1e-12, 1e-6, 0.01, 0.2, 0.5, 0.99] {
            assert!(finite(&numerical.point_at_t(t)), "alpha {} t {}", alpha, t);
            assert!(finite(&numerical.tangent_at_t(t)), "alpha {} t {}", alpha, t);
            assert!(finite(&numerical.second_derivative_at_t(t)));
        }
        assert!(numerical.total_length().is_finite());
        assert!(segmented.total_length().is_finite());
        for k in 0..=10 {
            let u = k as f64 / 10.0;
            let t = numerical.t_at_u(u);
            assert!((0.0..=1.0).contains(&t), "alpha {} u {} t {}", alpha, u, t);
            assert!(segmented.t_at_u(u).is_finite());
        }
    }
    Ok(())
}

#[test]
fn fuzz_all_points_identical() -> TestResult {
    let points = vec![[3.0, -2.0]; 4];
    let mapper = NumericalMapper::with_defaults(points, CurveParameters::default())?;
    assert_eq!(mapper.total_length(), 0.0);
    assert_eq!(mapper.t_at_u(0.3), 0.3);
    assert_eq!(mapper.u_at_t(0.3), 0.3);
    assert_eq!(mapper.point_at_t(0.7), [3.0, -2.0]);

    let bounds = bounding_box(&mapper, 0.0, 1.0);
    assert_eq!(bounds.min, [3.0, -2.0]);
    assert_eq!(bounds.max, [3.0, -2.0]);

    let hits = lookup(&mapper, 3.0, 0, 0, None)?;
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|p| *p == [3.0, -2.0]));
    Ok(())
}

#[test]
fn fuzz_nan_control_points_rejected() {
    let result = SegmentedMapper::with_defaults(
        vec![[0.0, 0.0], [f64::NAN, 1.0]],
        CurveParameters::default(),
    );
    assert!(matches!(
        result,
        Err(CurveError::NonFiniteControlPoint {
            index: 1,
            axis: 0,
            ..
        })
    ));

    let mut mapper = must(NumericalMapper::with_defaults(
        vec![[0.0, 0.0], [1.0, 1.0]],
        CurveParameters::default(),
    ));
    assert!(
        mapper
            .set_points(vec![[0.0, 0.0], [1.0, f64::NEG_INFINITY]])
            .is_err()
    );
    assert_eq!(mapper.points(), &[[0.0, 0.0], [1.0, 1.0]]);
}

#[test]
fn fuzz_nan_parameters_rejected() {
    let points = vec![[0.0, 0.0], [1.0, 1.0]];
    let nan_tension = CurveParameters::default().with_tension(f64::NAN);
    assert!(SegmentedMapper::with_defaults(points.clone(), nan_tension).is_err());

    let mut mapper = must(SegmentedMapper::with_defaults(
        points,
        CurveParameters::default(),
    ));
    assert!(mapper.set_alpha(f64::INFINITY).is_err());
    assert!(mapper.set_tension(f64::NAN).is_err());
    assert_eq!(mapper.generation(), 0);
}

#[test]
fn fuzz_non_finite_queries_do_not_panic() {
    let mapper = must(NumericalMapper::with_defaults(
        vec![[0.0, 0.0], [1.0, 2.0], [3.0, 1.0]],
        CurveParameters::default(),
    ));
    for input in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.5, 1.5] {
        let _ = mapper.point_at_t(input);
        let _ = mapper.tangent_at_t(input);
        let _ = mapper.t_at_u(input);
        let _ = mapper.u_at_t(input);
        let _ = mapper.length_at(input);
    }
    assert!(lookup_t(&mapper, f64::NAN, 1, 0, None).is_err());
    assert!(lookup_t(&mapper, 1.0, 5, 0, None).is_err());
}

#[test]
fn fuzz_two_point_curve() -> TestResult {
    for tension in [0.0, 0.5, 1.0] {
        let params = CurveParameters::default().with_tension(tension);
        let mapper = NumericalMapper::with_defaults(vec![[0.0, 0.0], [3.0, 4.0]], params)?;
        assert_eq!(mapper.segment_count(), 1);
        assert!((mapper.total_length() - 5.0).abs() < 1e-9, "tension {}", tension);

        let mid = mapper.point_at_u(0.5);
        assert!((mid[0] - 1.5).abs() < 1e-4 && (mid[1] - 2.0).abs() < 1e-4);
    }
    Ok(())
}

#[test]
fn fuzz_closed_two_point_curve() -> TestResult {
    let params = CurveParameters::default().with_closed(true);
    let segmented = SegmentedMapper::with_defaults(vec![[0.0, 0.0], [3.0, 4.0]], params)?;
    let numerical = NumericalMapper::with_defaults(vec![[0.0, 0.0], [3.0, 4.0]], params)?;

    assert_eq!(numerical.segment_count(), 2);
    assert_eq!(numerical.point_at_t(1.0), [0.0, 0.0]);
    assert!((numerical.total_length() - 10.0).abs() < 1e-9);
    assert!((segmented.total_length() - 10.0).abs() < 1e-9);

    let far = numerical.point_at_t(0.5);
    assert!((far[0] - 3.0).abs() < 1e-12 && (far[1] - 4.0).abs() < 1e-12);
    let bounds = bounding_box(&numerical, 0.0, 1.0);
    assert_eq!(bounds.min, [0.0, 0.0]);
    assert_eq!(bounds.max, [3.0, 4.0]);
    Ok(())
}

#[test]
fn fuzz_full_tension_gives_straight_segments() -> TestResult {
    let points = vec![[0.0, 0.0], [2.0, 6.0], [5.0, -1.0], [6.0, 3.0]];
    let params = CurveParameters::default().with_tension(1.0);
    let mapper = SegmentedMapper::with_defaults(points.clone(), params)?;

    for (i, pair) in points.windows(2).enumerate() {
        let t = (i as f64 + 0.5) / 3.0;
        let p = mapper.point_at_t(t);
        assert!((p[0] - (pair[0][0] + pair[1][0]) / 2.0).abs() < 1e-12);
        assert!((p[1] - (pair[0][1] + pair[1][1]) / 2.0).abs() < 1e-12);
    }

    let polyline: f64 = points
        .windows(2)
        .map(|w| ((w[1][0] - w[0][0]).powi(2) + (w[1][1] - w[0][1]).powi(2)).sqrt())
        .sum();
    assert!((mapper.total_length() - polyline).abs() < 1e-9);

    let bounds = bounding_box(&mapper, 0.0, 1.0);
    assert_eq!(bounds.min, [0.0, -1.0]);
    assert_eq!(bounds.max, [6.0, 6.0]);
    Ok(())
}

#[test]
fn fuzz_out_of_range_segment_index() {
    let mapper = must(SegmentedMapper::with_defaults(
        vec![[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]],
        CurveParameters::default(),
    ));
    assert!(mapper.coefficients(1).is_ok());
    assert!(matches!(
        mapper.coefficients(usize::MAX),
        Err(CurveError::SegmentOutOfRange { .. })
    ));
}
