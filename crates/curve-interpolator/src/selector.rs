//! Selection of the four control points that shape one curve segment.

use crate::error::{CurveError, Result};
use crate::vector::{Vector, add, sub};

/// Number of segments for `point_count` control points.
///
/// A closed curve has one extra segment joining the last point back to the
/// first.
#[inline]
pub fn segment_count(point_count: usize, closed: bool) -> usize {
    if closed {
        point_count
    } else {
        point_count.saturating_sub(1)
    }
}

/// Phantom control point mirrored through `adjacent`: `2·adjacent − neighbor`.
#[inline]
pub fn extrapolate<const D: usize>(neighbor: &Vector<D>, adjacent: &Vector<D>) -> Vector<D> {
    add(adjacent, &sub(adjacent, neighbor))
}

/// The control points `[p0, p1, p2, p3]` for segment `index`.
///
/// The segment runs from `p1` to `p2`. On a closed curve indices wrap
/// around; on an open curve the missing outer points of the first and last
/// segment are synthesized with [`extrapolate`].
///
/// # Errors
///
/// Returns [`CurveError::InsufficientPoints`] for fewer than two points and
/// [`CurveError::SegmentOutOfRange`] if `index` is not a segment of the curve.
pub fn control_points<const D: usize>(
    points: &[Vector<D>],
    index: usize,
    closed: bool,
) -> Result<[Vector<D>; 4]> {
    let n = points.len();
    if n < 2 {
        return Err(CurveError::InsufficientPoints {
            required: 2,
            actual: n,
        });
    }
    let segments = segment_count(n, closed);
    if index >= segments {
        return Err(CurveError::SegmentOutOfRange {
            index,
            segment_count: segments,
        });
    }

    let at = |i: usize| {
        points.get(i).copied().ok_or(CurveError::SegmentOutOfRange {
            index,
            segment_count: segments,
        })
    };

    if closed {
        let p0 = at((index + n - 1) % n)?;
        let p1 = at(index % n)?;
        let p2 = at((index + 1) % n)?;
        let p3 = at((index + 2) % n)?;
        return Ok([p0, p1, p2, p3]);
    }

    let p1 = at(index)?;
    let p2 = at(index + 1)?;
    let p0 = if index > 0 {
        at(index - 1)?
    } else {
        extrapolate(&p2, &p1)
    };
    let p3 = if index + 2 < n {
        at(index + 2)?
    } else {
        extrapolate(&p1, &p2)
    };
    Ok([p0, p1, p2, p3])
}
