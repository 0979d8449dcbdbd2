//! Axis crossings: where does the curve take a given coordinate value?

use crate::error::{CurveError, Result};
use crate::mapper::CurveMapper;
use crate::segment::T_TOLERANCE;
use crate::vector::Vector;

/// Curve times at which coordinate `axis` equals `value`.
///
/// Segments are visited in curve order, or in reverse when `max_count` is
/// negative, and roots within a segment follow the same direction. At most
/// `|max_count|` results are returned; `0` means no limit. A crossing shared
/// by two segments at their common boundary is reported once.
///
/// A segment is skipped when `value` lies further than `margin` outside the
/// range of its two end points. Segments can overshoot their end points, so
/// `margin` defaults to `1 - tension`.
///
/// # Errors
///
/// Returns [`CurveError::InvalidArgument`] if `axis` is not below the
/// point dimension, or `value` or `margin` is not finite, or `margin` is
/// negative.
pub fn lookup_t<const D: usize, M>(
    mapper: &M,
    value: f64,
    axis: usize,
    max_count: isize,
    margin: Option<f64>,
) -> Result<Vec<f64>>
where
    M: CurveMapper<D> + ?Sized,
{
    if axis >= D {
        return Err(CurveError::argument(format!(
            "axis {} out of range for {}-dimensional points",
            axis, D
        )));
    }
    if !value.is_finite() {
        return Err(CurveError::argument("lookup value must be finite"));
    }
    let core = mapper.core();
    let margin = margin.unwrap_or(1.0 - core.parameters().tension);
    if !margin.is_finite() || margin < 0.0 {
        return Err(CurveError::argument(format!(
            "lookup margin must be finite and non-negative, got {}",
            margin
        )));
    }

    let points = core.points();
    let segments = core.segment_count();
    let n = segments as f64;
    let reverse = max_count < 0;
    let limit = max_count.unsigned_abs();
    let duplicate = T_TOLERANCE / n;

    let mut found: Vec<f64> = Vec::new();
    for step in 0..segments {
        if limit != 0 && found.len() >= limit {
            break;
        }
        let index = if reverse { segments - 1 - step } else { step };
        let (Some(start), Some(end)) = (
            points.get(index).and_then(|p| p.get(axis)),
            points
                .get((index + 1) % points.len())
                .and_then(|p| p.get(axis)),
        ) else {
            continue;
        };
        if value + margin < start.min(*end) || value - margin > start.max(*end) {
            continue;
        }

        let segment = core.segment(index);
        let Some(cubic) = segment.axis(axis) else {
            continue;
        };
        let mut roots = cubic.roots_at(value);
        roots.sort_by(f64::total_cmp);
        if reverse {
            roots.reverse();
        }

        for root in roots {
            if limit != 0 && found.len() >= limit {
                break;
            }
            let t = (root + index as f64) / n;
            if found.last().is_some_and(|last| (t - last).abs() <= duplicate) {
                continue;
            }
            found.push(t);
        }
    }
    Ok(found)
}

/// Points at which coordinate `axis` equals `value`.
///
/// Same ordering, limits and errors as [`lookup_t`].
///
/// # Example
///
/// ```
/// use curve_interpolator::{CurveParameters, NumericalMapper, lookup};
///
/// let mapper = NumericalMapper::with_defaults(
///     vec![[0.0, 0.0], [1.0, 3.0], [2.0, 1.0], [3.0, 4.0]],
///     CurveParameters::default(),
/// )?;
/// let hits = lookup(&mapper, 1.5, 0, 0, None)?;
/// assert_eq!(hits.len(), 1);
/// assert!((hits[0][0] - 1.5).abs() < 1e-9);
/// # Ok::<(), curve_interpolator::CurveError>(())
/// ```
pub fn lookup<const D: usize, M>(
    mapper: &M,
    value: f64,
    axis: usize,
    max_count: isize,
    margin: Option<f64>,
) -> Result<Vec<Vector<D>>>
where
    M: CurveMapper<D> + ?Sized,
{
    let times = lookup_t(mapper, value, axis, max_count, margin)?;
    Ok(times.into_iter().map(|t| mapper.point_at_t(t)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CurveParameters;
    use crate::mapper::{NumericalMapper, SegmentedMapper};

    fn must<T, E: std::fmt::Debug>(result: std::result::Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    fn zigzag() -> SegmentedMapper<2> {
        must(SegmentedMapper::with_defaults(
            vec![[0.0, 0.0], [1.0, 2.0], [2.0, 0.0], [3.0, 2.0], [4.0, 0.0]],
            CurveParameters::default(),
        ))
    }

    #[test]
    fn test_finds_every_crossing_in_order() {
        let mapper = zigzag();
        let times = must(lookup_t(&mapper, 1.0, 1, 0, None));
        assert_eq!(times.len(), 4);
        assert!(times.windows(2).all(|w| w[0] < w[1]));
        for t in &times {
            assert!((mapper.point_at_t(*t)[1] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_max_count_and_direction() {
        let mapper = zigzag();
        let all = must(lookup_t(&mapper, 1.0, 1, 0, None));
        let first = must(lookup_t(&mapper, 1.0, 1, 2, None));
        let last = must(lookup_t(&mapper, 1.0, 1, -2, None));
        assert_eq!(first, all[..2].to_vec());
        assert_eq!(last, vec![all[3], all[2]]);
    }

    #[test]
    fn test_shared_boundary_reported_once() {
        let mapper = zigzag();
        // y = 2 is hit exactly at control points 1 and 3.
        let points = must(lookup(&mapper, 2.0, 1, 0, Some(0.0)));
        let xs: Vec<f64> = points.iter().map(|p| p[0]).collect();
        assert_eq!(xs.len(), 2, "{:?}", xs);
        assert!((xs[0] - 1.0).abs() < 1e-6);
        assert!((xs[1] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_crossing() {
        let mapper = zigzag();
        assert!(must(lookup(&mapper, 10.0, 1, 0, None)).is_empty());
    }

    #[test]
    fn test_invalid_arguments() {
        let mapper = zigzag();
        assert!(matches!(
            lookup_t(&mapper, 1.0, 2, 0, None),
            Err(CurveError::InvalidArgument(_))
        ));
        assert!(lookup_t(&mapper, f64::NAN, 0, 0, None).is_err());
        assert!(lookup_t(&mapper, 1.0, 0, 0, Some(f64::INFINITY)).is_err());
        assert!(lookup_t(&mapper, 1.0, 0, 0, Some(-1.0)).is_err());
    }

    #[test]
    fn test_closed_curve_wraps() {
        let mapper = must(NumericalMapper::with_defaults(
            vec![[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]],
            CurveParameters::catmull_rom().with_closed(true),
        ));
        let points = must(lookup(&mapper, 0.5, 0, 0, None));
        assert_eq!(points.len(), 2);
        assert!(points[0][1] > 0.0);
        assert!(points[1][1] < 0.0);
    }
}
