//! Arc-length mapping between local time `t` and uniform position `u`.
//!
//! A [`CurveMapper`] owns the control points and shape parameters (through a
//! [`MapperCore`]) and maps between:
//!
//! - `t`: global curve time, uniform per segment but not in arc length
//! - `u`: fraction of total arc length
//!
//! Two strategies implement the trait:
//!
//! - [`SegmentedMapper`]: linear table of `N + 1` uniform-`t` samples
//! - [`NumericalMapper`]: Gauss–Legendre arc length per segment with a
//!   monotone cubic inverse
//!
//! [`Mapper`] wraps either one when the strategy is picked at runtime.

mod core;
mod numerical;
mod segmented;

pub use self::core::{CacheInvalidated, InvalidationReason, MapperCore};
pub use self::numerical::NumericalMapper;
pub use self::segmented::SegmentedMapper;

use crossbeam::channel::Receiver;

use crate::config::CurveParameters;
use crate::error::Result;
use crate::segment::SegmentCoefficients;
use crate::vector::Vector;

/// Forward and inverse arc-length mapping over a Cardinal spline.
///
/// Implementors provide [`length_at`](Self::length_at),
/// [`t_at_u`](Self::t_at_u) and [`u_at_t`](Self::u_at_t). Everything else
/// is delegated to the shared [`MapperCore`].
///
/// Inputs are expected in `[0,1]`; callers clamp. Only `t ∈ {0, 1}` is
/// special-cased.
pub trait CurveMapper<const D: usize> {
    /// Shared state.
    fn core(&self) -> &MapperCore<D>;

    /// Shared state, mutably.
    fn core_mut(&mut self) -> &mut MapperCore<D>;

    /// Arc length from the start of the curve to position `u`.
    fn length_at(&self, u: f64) -> f64;

    /// Curve time at which the curve has covered fraction `u` of its length.
    fn t_at_u(&self, u: f64) -> f64;

    /// Fraction of total length covered at curve time `t`.
    fn u_at_t(&self, t: f64) -> f64;

    /// Total arc length.
    fn total_length(&self) -> f64 {
        self.length_at(1.0)
    }

    /// Point at curve time `t`.
    fn point_at_t(&self, t: f64) -> Vector<D> {
        self.core().point_at_t(t)
    }

    /// Point at arc-length position `u`.
    fn point_at_u(&self, u: f64) -> Vector<D> {
        self.point_at_t(self.t_at_u(u))
    }

    /// Derivative with respect to local time at curve time `t`.
    fn tangent_at_t(&self, t: f64) -> Vector<D> {
        self.core().tangent_at_t(t)
    }

    /// Second derivative with respect to local time at curve time `t`.
    fn second_derivative_at_t(&self, t: f64) -> Vector<D> {
        self.core().second_derivative_at_t(t)
    }

    /// Memoized coefficients of segment `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::SegmentOutOfRange`](crate::CurveError::SegmentOutOfRange)
    /// for an index past the last segment.
    fn coefficients(&self, index: usize) -> Result<SegmentCoefficients<D>> {
        self.core().coefficients(index)
    }

    /// Segment index and local weight for curve time `t`.
    fn segment_at_t(&self, t: f64) -> (usize, f64) {
        self.core().segment_at_t(t)
    }

    /// Number of cubic segments.
    fn segment_count(&self) -> usize {
        self.core().segment_count()
    }

    /// The control points.
    fn points(&self) -> &[Vector<D>] {
        self.core().points()
    }

    /// The shape parameters.
    fn parameters(&self) -> CurveParameters {
        self.core().parameters()
    }

    /// Replace the control points and clear caches.
    ///
    /// # Errors
    ///
    /// See [`MapperCore::set_points`].
    fn set_points(&mut self, points: Vec<Vector<D>>) -> Result<()> {
        self.core_mut().set_points(points)
    }

    /// Change the tension and clear caches.
    ///
    /// # Errors
    ///
    /// See [`MapperCore::set_tension`].
    fn set_tension(&mut self, tension: f64) -> Result<()> {
        self.core_mut().set_tension(tension)
    }

    /// Change alpha and clear caches.
    ///
    /// # Errors
    ///
    /// See [`MapperCore::set_alpha`].
    fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        self.core_mut().set_alpha(alpha)
    }

    /// Open or close the curve and clear caches.
    fn set_closed(&mut self, closed: bool) {
        self.core_mut().set_closed(closed);
    }

    /// Clear caches without changing the curve.
    fn invalidate(&mut self) {
        self.core_mut().invalidate();
    }

    /// Subscribe to cache invalidation events.
    fn subscribe(&mut self) -> Receiver<CacheInvalidated> {
        self.core_mut().subscribe()
    }

    /// Current cache generation.
    fn generation(&self) -> u64 {
        self.core().generation()
    }
}

/// Mapper with the strategy chosen at runtime.
///
/// Built by [`CurveOptions::build`](crate::CurveOptions::build).
#[derive(Clone, Debug)]
pub enum Mapper<const D: usize> {
    /// Linear arc-length table.
    Segmented(SegmentedMapper<D>),
    /// Quadrature with a monotone cubic inverse.
    Numerical(NumericalMapper<D>),
}

impl<const D: usize> CurveMapper<D> for Mapper<D> {
    fn core(&self) -> &MapperCore<D> {
        match self {
            Self::Segmented(m) => m.core(),
            Self::Numerical(m) => m.core(),
        }
    }

    fn core_mut(&mut self) -> &mut MapperCore<D> {
        match self {
            Self::Segmented(m) => m.core_mut(),
            Self::Numerical(m) => m.core_mut(),
        }
    }

    fn length_at(&self, u: f64) -> f64 {
        match self {
            Self::Segmented(m) => m.length_at(u),
            Self::Numerical(m) => m.length_at(u),
        }
    }

    fn t_at_u(&self, u: f64) -> f64 {
        match self {
            Self::Segmented(m) => m.t_at_u(u),
            Self::Numerical(m) => m.t_at_u(u),
        }
    }

    fn u_at_t(&self, t: f64) -> f64 {
        match self {
            Self::Segmented(m) => m.u_at_t(t),
            Self::Numerical(m) => m.u_at_t(t),
        }
    }
}

impl<const D: usize> From<SegmentedMapper<D>> for Mapper<D> {
    fn from(mapper: SegmentedMapper<D>) -> Self {
        Self::Segmented(mapper)
    }
}

impl<const D: usize> From<NumericalMapper<D>> for Mapper<D> {
    fn from(mapper: NumericalMapper<D>) -> Self {
        Self::Numerical(mapper)
    }
}
