//! Exact axis-aligned bounds of a curve span.
//!
//! Extremes of a cubic segment lie at its ends or where the derivative
//! `3a·t² + 2b·t + c` vanishes, so the box is found analytically rather than
//! by sampling.

use crate::mapper::CurveMapper;
use crate::vector::Vector;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    /// Per-axis minimum.
    pub min: Vector<D>,
    /// Per-axis maximum.
    pub max: Vector<D>,
}

impl<const D: usize> BoundingBox<D> {
    /// Zero-size box at `point`.
    pub fn from_point(point: Vector<D>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Grow the box to include `point`.
    pub fn include(&mut self, point: &Vector<D>) {
        for ((min, max), value) in self.min.iter_mut().zip(self.max.iter_mut()).zip(point) {
            *min = min.min(*value);
            *max = max.max(*value);
        }
    }

    /// Grow the box along a single axis.
    fn include_axis(&mut self, axis: usize, value: f64) {
        if let (Some(min), Some(max)) = (self.min.get_mut(axis), self.max.get_mut(axis)) {
            *min = min.min(value);
            *max = max.max(value);
        }
    }

    /// Whether `point` lies inside the box, allowing `tolerance` on every side.
    pub fn contains(&self, point: &Vector<D>, tolerance: f64) -> bool {
        point
            .iter()
            .zip(self.min.iter().zip(self.max.iter()))
            .all(|(v, (lo, hi))| *v >= lo - tolerance && *v <= hi + tolerance)
    }

    /// Per-axis size.
    pub fn extent(&self) -> Vector<D> {
        let mut extent = self.max;
        for (e, lo) in extent.iter_mut().zip(&self.min) {
            *e -= lo;
        }
        extent
    }
}

/// Bounding box of the curve between arc-length positions `u0` and `u1`.
///
/// The range is reordered if `u0 > u1`. Interior control points are
/// included as-is; each covered segment contributes its interior extrema
/// unless the tension is `1` (straight segments).
pub fn bounding_box<const D: usize, M>(mapper: &M, u0: f64, u1: f64) -> BoundingBox<D>
where
    M: CurveMapper<D> + ?Sized,
{
    let (u0, u1) = if u0 <= u1 { (u0, u1) } else { (u1, u0) };
    let t0 = mapper.t_at_u(u0);
    let t1 = mapper.t_at_u(u1);

    let mut bounds = BoundingBox::from_point(mapper.point_at_t(t0));
    bounds.include(&mapper.point_at_t(t1));

    let core = mapper.core();
    let points = core.points();
    let segments = core.segment_count();
    let n = segments as f64;
    let i0 = (n * t0).floor().max(0.0) as usize;
    let i1 = ((n * t1).ceil().max(0.0) as usize).min(segments);

    for i in (i0 + 1)..i1 {
        if let Some(point) = points.get(i % points.len()) {
            bounds.include(point);
        }
    }

    if core.parameters().tension < 1.0 && i1 > i0 {
        let w0 = n * t0 - i0 as f64;
        let w1 = n * t1 - (i1 - 1) as f64;
        for i in i0..i1 {
            let segment = core.segment(i);
            let t_min = if i == i0 { w0 } else { 0.0 };
            let t_max = if i == i1 - 1 { w1 } else { 1.0 };
            for (axis, cubic) in segment.axes().iter().enumerate() {
                for root in cubic.stationary_points() {
                    if root > t_min && root < t_max {
                        bounds.include_axis(axis, cubic.value_at(root));
                    }
                }
            }
        }
    }

    bounds
}
