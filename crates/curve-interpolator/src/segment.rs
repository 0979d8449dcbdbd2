//! Cubic segment coefficients and their evaluation.
//!
//! Each segment of a Cardinal/Catmull-Rom curve is, per axis, a cubic
//! polynomial `a·t³ + b·t² + c·t + d` in the local time `t ∈ [0,1]`. The
//! coefficients are derived from the segment's four control points using
//! Hermite form: the curve passes through `p1` at `t = 0` and `p2` at
//! `t = 1`, with end velocities taken from the neighbouring points.
//!
//! When `alpha > 0` the velocities are computed over a non-uniform knot
//! sequence (centripetal for `alpha = 0.5`, chordal for `alpha = 1`).

use serde::{Deserialize, Serialize};

use crate::roots::{EPSILON, cubic_roots, quadratic_roots};
use crate::vector::{Vector, sub, sum_of_squares};

/// Slack allowed around `[0,1]` when accepting roots in local time.
pub const T_TOLERANCE: f64 = 1e-8;

/// Knot sequence `[t0, t1, t2, t3]` for four control points.
///
/// With `alpha = 0` this is the uniform sequence `[0, 1, 2, 3]`. Otherwise
/// each knot advances by the chord length raised to `alpha`.
pub fn knot_sequence<const D: usize>(points: &[Vector<D>; 4], alpha: f64) -> [f64; 4] {
    if alpha <= 0.0 {
        return [0.0, 1.0, 2.0, 3.0];
    }
    let [p0, p1, p2, p3] = points;
    let delta = |u: &Vector<D>, v: &Vector<D>| sum_of_squares(&sub(u, v)).powf(0.5 * alpha);
    let t1 = delta(p1, p0);
    let t2 = t1 + delta(p2, p1);
    let t3 = t2 + delta(p3, p2);
    [0.0, t1, t2, t3]
}

/// Divided difference that yields zero instead of NaN for a zero knot span.
#[inline]
fn divided(numerator: f64, span: f64) -> f64 {
    if span.abs() > 0.0 { numerator / span } else { 0.0 }
}

/// Coefficients of one axis of a segment: `a·t³ + b·t² + c·t + d`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CubicCoefficients {
    /// Cubic term.
    pub a: f64,
    /// Quadratic term.
    pub b: f64,
    /// Linear term.
    pub c: f64,
    /// Constant term.
    pub d: f64,
}

impl CubicCoefficients {
    /// Hermite coefficients from end values `v1`, `v2` and end velocities `m1`, `m2`.
    pub fn hermite(v1: f64, v2: f64, m1: f64, m2: f64) -> Self {
        Self {
            a: 2.0 * v1 - 2.0 * v2 + m1 + m2,
            b: -3.0 * v1 + 3.0 * v2 - 2.0 * m1 - m2,
            c: m1,
            d: v1,
        }
    }

    /// Value at local time `t`.
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t + self.d
    }

    /// First derivative at local time `t`.
    #[inline]
    pub fn derivative_at(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    /// Second derivative at local time `t`.
    #[inline]
    pub fn second_derivative_at(&self, t: f64) -> f64 {
        6.0 * self.a * t + 2.0 * self.b
    }

    /// Local times in `[0,1]` where the polynomial equals `target`.
    ///
    /// Roots within [`T_TOLERANCE`] of the interval are clamped into it. A
    /// constant polynomial equal to `target` matches everywhere; it reports
    /// the single root `0` rather than no roots.
    pub fn roots_at(&self, target: f64) -> Vec<f64> {
        let d = self.d - target;
        if self.a.abs() < EPSILON
            && self.b.abs() < EPSILON
            && self.c.abs() < EPSILON
            && d.abs() < EPSILON
        {
            return vec![0.0];
        }
        cubic_roots(self.a, self.b, self.c, d)
            .into_iter()
            .filter(|t| *t >= -T_TOLERANCE && *t <= 1.0 + T_TOLERANCE)
            .map(|t| t.clamp(0.0, 1.0))
            .collect()
    }

    /// Local times where the first derivative vanishes (candidate extrema).
    pub fn stationary_points(&self) -> Vec<f64> {
        quadratic_roots(3.0 * self.a, 2.0 * self.b, self.c)
    }
}

/// Per-axis cubic coefficients of one curve segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentCoefficients<const D: usize> {
    axes: [CubicCoefficients; D],
}

impl<const D: usize> SegmentCoefficients<D> {
    /// Derive coefficients from the segment's control points `[p0, p1, p2, p3]`.
    ///
    /// `tension` scales the end velocities by `1 − tension`; at `tension = 1`
    /// the segment is the straight line from `p1` to `p2`.
    pub fn from_control_points(points: &[Vector<D>; 4], tension: f64, alpha: f64) -> Self {
        let [p0, p1, p2, p3] = points;
        let scale = 1.0 - tension;

        let axes = if alpha <= 0.0 {
            std::array::from_fn(|k| {
                let m1 = scale * (p2[k] - p0[k]) * 0.5;
                let m2 = scale * (p3[k] - p1[k]) * 0.5;
                CubicCoefficients::hermite(p1[k], p2[k], m1, m2)
            })
        } else {
            let [t0, t1, t2, t3] = knot_sequence(points, alpha);
            let span = t2 - t1;
            std::array::from_fn(|k| {
                let (v0, v1, v2, v3) = (p0[k], p1[k], p2[k], p3[k]);
                let m1 = scale
                    * span
                    * (divided(v1 - v0, t1 - t0) - divided(v2 - v0, t2 - t0)
                        + divided(v2 - v1, span));
                let m2 = scale
                    * span
                    * (divided(v2 - v1, span) - divided(v3 - v1, t3 - t1)
                        + divided(v3 - v2, t3 - t2));
                CubicCoefficients::hermite(v1, v2, m1, m2)
            })
        };

        Self { axes }
    }

    /// Build directly from per-axis coefficients.
    pub fn from_axes(axes: [CubicCoefficients; D]) -> Self {
        Self { axes }
    }

    /// All per-axis coefficients.
    pub fn axes(&self) -> &[CubicCoefficients; D] {
        &self.axes
    }

    /// Coefficients of a single axis, if it exists.
    pub fn axis(&self, axis: usize) -> Option<&CubicCoefficients> {
        self.axes.get(axis)
    }

    /// Point at local time `t`.
    pub fn value_at(&self, t: f64) -> Vector<D> {
        self.axes.map(|c| c.value_at(t))
    }

    /// First derivative at local time `t`.
    pub fn derivative_at(&self, t: f64) -> Vector<D> {
        self.axes.map(|c| c.derivative_at(t))
    }

    /// Second derivative at local time `t`.
    pub fn second_derivative_at(&self, t: f64) -> Vector<D> {
        self.axes.map(|c| c.second_derivative_at(t))
    }
}
