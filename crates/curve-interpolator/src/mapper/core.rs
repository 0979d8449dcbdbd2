//! State and memoization shared by every mapper strategy.

use std::cell::OnceCell;

use crossbeam::channel::{Receiver, Sender, unbounded};
use tracing::debug;

use crate::config::{CurveParameters, validate_unit};
use crate::error::{CurveError, Result};
use crate::hermite::InverseFit;
use crate::segment::{CubicCoefficients, SegmentCoefficients};
use crate::selector;
use crate::vector::Vector;

/// What caused a cache invalidation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvalidationReason {
    /// The control points were replaced.
    Points,
    /// The tension changed.
    Tension,
    /// The knot-spacing exponent changed.
    Alpha,
    /// The curve was opened or closed.
    Closed,
    /// [`MapperCore::invalidate`] was called directly.
    Manual,
}

/// Event sent to subscribers every time a mapper drops its caches.
///
/// Subscribers owning derived data (bounding boxes, nearest-point tables)
/// must treat anything computed before `generation` as stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheInvalidated {
    /// Cache generation after the invalidation.
    pub generation: u64,
    /// Mutation that triggered it.
    pub reason: InvalidationReason,
}

/// Lazily populated derived data. Always cleared as a whole.
#[derive(Debug)]
struct MapperCache<const D: usize> {
    coefficients: Vec<OnceCell<SegmentCoefficients<D>>>,
    arc_lengths: OnceCell<Vec<f64>>,
    inverse_fits: Vec<OnceCell<InverseFit>>,
}

impl<const D: usize> MapperCache<D> {
    fn new(segment_count: usize) -> Self {
        Self {
            coefficients: (0..segment_count).map(|_| OnceCell::new()).collect(),
            arc_lengths: OnceCell::new(),
            inverse_fits: (0..segment_count).map(|_| OnceCell::new()).collect(),
        }
    }
}

impl<const D: usize> Clone for MapperCache<D> {
    fn clone(&self) -> Self {
        Self {
            coefficients: self.coefficients.clone(),
            arc_lengths: self.arc_lengths.clone(),
            inverse_fits: self.inverse_fits.clone(),
        }
    }
}

/// Control points, shape parameters and the coefficient cache.
///
/// Strategies compose a `MapperCore` and add their own arc-length logic on
/// top. Queries take `&self` and fill caches on first use; setters take
/// `&mut self`, validate, mutate, and clear every cache before returning, so
/// any value computed afterwards reflects the new state.
///
/// A `MapperCore` is `Send` but not `Sync`: share it across threads behind
/// a mutex, or clone it per thread. Clones start without subscribers.
#[derive(Debug)]
pub struct MapperCore<const D: usize> {
    points: Vec<Vector<D>>,
    parameters: CurveParameters,
    cache: MapperCache<D>,
    generation: u64,
    subscribers: Vec<Sender<CacheInvalidated>>,
}

impl<const D: usize> Clone for MapperCore<D> {
    fn clone(&self) -> Self {
        Self {
            points: self.points.clone(),
            parameters: self.parameters,
            cache: self.cache.clone(),
            generation: self.generation,
            subscribers: Vec::new(),
        }
    }
}

impl<const D: usize> MapperCore<D> {
    /// Create a core over `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if `D < 2`, fewer than two points are given, a point
    /// has a non-finite coordinate, or the parameters are out of range.
    pub fn new(points: Vec<Vector<D>>, parameters: CurveParameters) -> Result<Self> {
        validate_points(&points)?;
        parameters.validate()?;
        let segments = selector::segment_count(points.len(), parameters.closed);
        Ok(Self {
            points,
            parameters,
            cache: MapperCache::new(segments),
            generation: 0,
            subscribers: Vec::new(),
        })
    }

    /// The control points.
    pub fn points(&self) -> &[Vector<D>] {
        &self.points
    }

    /// The shape parameters.
    pub fn parameters(&self) -> CurveParameters {
        self.parameters
    }

    /// Number of components per point.
    pub fn dimension(&self) -> usize {
        D
    }

    /// Number of cubic segments.
    pub fn segment_count(&self) -> usize {
        selector::segment_count(self.points.len(), self.parameters.closed)
    }

    /// Current cache generation, bumped by every invalidation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the control points.
    ///
    /// # Errors
    ///
    /// Same conditions as [`MapperCore::new`]; the core is left unchanged.
    pub fn set_points(&mut self, points: Vec<Vector<D>>) -> Result<()> {
        validate_points(&points)?;
        self.points = points;
        self.invalidate_with(InvalidationReason::Points);
        Ok(())
    }

    /// Change the tension.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] unless `tension ∈ [0,1]`.
    pub fn set_tension(&mut self, tension: f64) -> Result<()> {
        validate_unit("tension", tension)?;
        self.parameters.tension = tension;
        self.invalidate_with(InvalidationReason::Tension);
        Ok(())
    }

    /// Change the knot-spacing exponent.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] unless `alpha ∈ [0,1]`.
    pub fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        validate_unit("alpha", alpha)?;
        self.parameters.alpha = alpha;
        self.invalidate_with(InvalidationReason::Alpha);
        Ok(())
    }

    /// Open or close the curve.
    pub fn set_closed(&mut self, closed: bool) {
        self.parameters.closed = closed;
        self.invalidate_with(InvalidationReason::Closed);
    }

    /// Drop every cache and notify subscribers.
    pub fn invalidate(&mut self) {
        self.invalidate_with(InvalidationReason::Manual);
    }

    /// Receive a [`CacheInvalidated`] event for every future invalidation.
    ///
    /// Events are sent synchronously from the setter that caused them.
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<CacheInvalidated> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn invalidate_with(&mut self, reason: InvalidationReason) {
        self.cache = MapperCache::new(self.segment_count());
        self.generation = self.generation.wrapping_add(1);
        let event = CacheInvalidated {
            generation: self.generation,
            reason,
        };
        self.subscribers.retain(|tx| tx.send(event).is_ok());
        debug!(
            generation = self.generation,
            reason = ?reason,
            subscribers = self.subscribers.len(),
            "curve caches invalidated"
        );
    }

    /// Coefficients of segment `index`, memoized.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::SegmentOutOfRange`] if the segment does not exist.
    pub fn coefficients(&self, index: usize) -> Result<SegmentCoefficients<D>> {
        let segment_count = self.segment_count();
        if index >= segment_count {
            return Err(CurveError::SegmentOutOfRange {
                index,
                segment_count,
            });
        }
        Ok(self.segment(index))
    }

    /// Coefficients of an in-range segment; `index` is clamped to the last one.
    pub(crate) fn segment(&self, index: usize) -> SegmentCoefficients<D> {
        let index = index.min(self.segment_count().saturating_sub(1));
        match self.cache.coefficients.get(index) {
            Some(cell) => *cell.get_or_init(|| self.derive(index)),
            None => self.derive(index),
        }
    }

    fn derive(&self, index: usize) -> SegmentCoefficients<D> {
        let CurveParameters {
            tension,
            alpha,
            closed,
        } = self.parameters;
        match selector::control_points(&self.points, index, closed) {
            Ok(cp) => SegmentCoefficients::from_control_points(&cp, tension, alpha),
            // Unreachable while the two-point invariant holds.
            Err(_) => SegmentCoefficients::from_axes([CubicCoefficients::default(); D]),
        }
    }

    /// Segment index and local weight for global time `t`.
    ///
    /// `t = 1` maps to the end of the last segment rather than the start of
    /// a segment past the end.
    pub fn segment_at_t(&self, t: f64) -> (usize, f64) {
        let segments = self.segment_count();
        if t == 1.0 {
            return (segments.saturating_sub(1), 1.0);
        }
        let p = t * segments as f64;
        let index = (p.floor().max(0.0) as usize).min(segments.saturating_sub(1));
        (index, p - index as f64)
    }

    /// Point at global time `t`.
    ///
    /// `t = 0` and `t = 1` return the first and last control point exactly
    /// (the first one again for a closed curve).
    pub fn point_at_t(&self, t: f64) -> Vector<D> {
        if t == 0.0 {
            if let Some(first) = self.points.first() {
                return *first;
            }
        }
        if t == 1.0 {
            let end = if self.parameters.closed {
                self.points.first()
            } else {
                self.points.last()
            };
            if let Some(end) = end {
                return *end;
            }
        }
        let (index, weight) = self.segment_at_t(t);
        self.segment(index).value_at(weight)
    }

    /// Derivative with respect to local time at global time `t`.
    pub fn tangent_at_t(&self, t: f64) -> Vector<D> {
        let (index, weight) = self.segment_at_t(t);
        self.segment(index).derivative_at(weight)
    }

    /// Second derivative with respect to local time at global time `t`.
    pub fn second_derivative_at_t(&self, t: f64) -> Vector<D> {
        let (index, weight) = self.segment_at_t(t);
        self.segment(index).second_derivative_at(weight)
    }

    pub(crate) fn cached_arc_lengths<F>(&self, compute: F) -> &[f64]
    where
        F: FnOnce() -> Vec<f64>,
    {
        self.cache.arc_lengths.get_or_init(compute)
    }

    pub(crate) fn inverse_fit_cell(&self, index: usize) -> Option<&OnceCell<InverseFit>> {
        self.cache.inverse_fits.get(index)
    }
}

fn validate_points<const D: usize>(points: &[Vector<D>]) -> Result<()> {
    if D < 2 {
        return Err(CurveError::config(format!(
            "control points need at least 2 dimensions, got {}",
            D
        )));
    }
    if points.len() < 2 {
        return Err(CurveError::InsufficientPoints {
            required: 2,
            actual: points.len(),
        });
    }
    for (index, point) in points.iter().enumerate() {
        if let Some((axis, value)) = point.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CurveError::NonFiniteControlPoint {
                index,
                axis,
                value: *value,
            });
        }
    }
    Ok(())
}
