//! Arc-length mapping by Gauss–Legendre quadrature.
//!
//! Forward (`t → u`) integrates `|P'(t)|` exactly up to quadrature error.
//! Inverse (`u → t`) locates the segment from the cumulative per-segment
//! lengths and then evaluates a monotone cubic Hermite fit of the segment's
//! `length → t` curve, built lazily from `inverse_samples` samples.

use tracing::{debug, trace};

use super::{CurveMapper, MapperCore};
use crate::config::{CurveParameters, DEFAULT_INVERSE_SAMPLES};
use crate::error::{CurveError, Result};
use crate::hermite::{InverseFit, find_interval};
use crate::quadrature::{self, GaussLegendre};
use crate::vector::{Vector, magnitude};

/// Mapper based on numerical integration of the curve speed.
#[derive(Clone, Debug)]
pub struct NumericalMapper<const D: usize> {
    core: MapperCore<D>,
    quadrature: GaussLegendre,
    inverse_samples: usize,
}

impl<const D: usize> NumericalMapper<D> {
    /// Create a mapper with the given quadrature order and inverse samples.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] for an unsupported
    /// quadrature order or fewer than two inverse samples, and any error
    /// from [`MapperCore::new`].
    pub fn new(
        points: Vec<Vector<D>>,
        parameters: CurveParameters,
        approximation_order: usize,
        inverse_samples: usize,
    ) -> Result<Self> {
        if inverse_samples < 2 {
            return Err(CurveError::config(format!(
                "inverse_samples must be at least 2, got {}",
                inverse_samples
            )));
        }
        let quadrature = GaussLegendre::new(approximation_order)?;
        let core = MapperCore::new(points, parameters)?;
        debug!(
            points = core.points().len(),
            segments = core.segment_count(),
            approximation_order,
            inverse_samples,
            "created numerical mapper"
        );
        Ok(Self {
            core,
            quadrature,
            inverse_samples,
        })
    }

    /// Create a mapper with the default order and sample count.
    ///
    /// # Errors
    ///
    /// See [`NumericalMapper::new`].
    pub fn with_defaults(points: Vec<Vector<D>>, parameters: CurveParameters) -> Result<Self> {
        Self::new(
            points,
            parameters,
            quadrature::DEFAULT_ORDER,
            DEFAULT_INVERSE_SAMPLES,
        )
    }

    /// Quadrature order.
    pub fn approximation_order(&self) -> usize {
        self.quadrature.order()
    }

    /// Samples per segment used for the inverse fit.
    pub fn inverse_samples(&self) -> usize {
        self.inverse_samples
    }

    /// Arc length of segment `index` between local times `t0` and `t1`.
    pub fn arc_length(&self, index: usize, t0: f64, t1: f64) -> f64 {
        if t0 == t1 {
            return 0.0;
        }
        let segment = self.core.segment(index);
        self.quadrature
            .integrate(t0, t1, |t| magnitude(&segment.derivative_at(t)))
    }

    /// Cumulative length at each segment boundary, `segment_count + 1` entries.
    pub fn arc_lengths(&self) -> &[f64] {
        self.core.cached_arc_lengths(|| {
            let segments = self.core.segment_count();
            let mut lengths = Vec::with_capacity(segments + 1);
            let mut total = 0.0;
            lengths.push(total);
            for index in 0..segments {
                total += self.arc_length(index, 0.0, 1.0);
                lengths.push(total);
            }
            debug!(
                segments,
                total_length = total,
                generation = self.core.generation(),
                "built numerical arc-length table"
            );
            lengths
        })
    }

    /// Local time within segment `index` at arc length `length` from its start.
    pub fn inverse(&self, index: usize, length: f64) -> f64 {
        match self.core.inverse_fit_cell(index) {
            Some(cell) => cell.get_or_init(|| self.fit(index)).evaluate(length),
            None => self.fit(index).evaluate(length),
        }
    }

    fn fit(&self, index: usize) -> InverseFit {
        let segment = self.core.segment(index);
        let last = (self.inverse_samples - 1) as f64;
        let (lengths, slopes): (Vec<f64>, Vec<f64>) = (0..self.inverse_samples)
            .map(|i| {
                let t = i as f64 / last;
                let speed = magnitude(&segment.derivative_at(t));
                let slope = if speed > 0.0 { 1.0 / speed } else { 0.0 };
                (self.arc_length(index, 0.0, t), slope)
            })
            .unzip();
        let fit = InverseFit::new(lengths, slopes);
        trace!(
            segment = index,
            samples = self.inverse_samples,
            length = fit.total_length(),
            "fitted inverse arc-length map"
        );
        fit
    }
}

impl<const D: usize> CurveMapper<D> for NumericalMapper<D> {
    fn core(&self) -> &MapperCore<D> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MapperCore<D> {
        &mut self.core
    }

    fn length_at(&self, u: f64) -> f64 {
        u * self.arc_lengths().last().copied().unwrap_or(0.0)
    }

    fn t_at_u(&self, u: f64) -> f64 {
        if u == 0.0 || u == 1.0 {
            return u;
        }
        let table = self.arc_lengths();
        let total = table.last().copied().unwrap_or(0.0);
        if total <= 0.0 {
            return u;
        }
        let segments = self.core.segment_count() as f64;
        let target = u * total;
        let index = find_interval(table, target);
        let start = table.get(index).copied().unwrap_or(0.0);
        if start == target {
            return index as f64 / segments;
        }
        (index as f64 + self.inverse(index, target - start)) / segments
    }

    fn u_at_t(&self, t: f64) -> f64 {
        if t == 0.0 || t == 1.0 {
            return t;
        }
        let table = self.arc_lengths();
        let total = table.last().copied().unwrap_or(0.0);
        if total <= 0.0 {
            return t;
        }
        let (index, weight) = self.core.segment_at_t(t);
        let start = table.get(index).copied().unwrap_or(0.0);
        (start + self.arc_length(index, 0.0, weight)) / total
    }
}
