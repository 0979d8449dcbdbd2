//! Arc-length mapping through a linear table of uniform-`t` samples.

use tracing::debug;

use super::{CurveMapper, MapperCore};
use crate::config::{CurveParameters, DEFAULT_ARC_DIVISIONS};
use crate::error::{CurveError, Result};
use crate::vector::{Vector, distance};

/// Mapper that approximates the curve by `N` chords.
///
/// The table holds the cumulative chord length at `t = i/N` for
/// `i = 0..=N`. `t_at_u` interpolates linearly inside a table bracket.
/// `u_at_t` adds the true distance from the bracket start to the curve point,
/// so the two directions agree only to within the table resolution.
#[derive(Clone, Debug)]
pub struct SegmentedMapper<const D: usize> {
    core: MapperCore<D>,
    arc_divisions: usize,
}

impl<const D: usize> SegmentedMapper<D> {
    /// Create a mapper with `arc_divisions` subdivisions.
    ///
    /// # Errors
    ///
    /// Returns an error for zero subdivisions or any condition rejected by
    /// [`MapperCore::new`].
    pub fn new(
        points: Vec<Vector<D>>,
        parameters: CurveParameters,
        arc_divisions: usize,
    ) -> Result<Self> {
        if arc_divisions == 0 {
            return Err(CurveError::config("arc_divisions must be at least 1"));
        }
        let core = MapperCore::new(points, parameters)?;
        debug!(
            points = core.points().len(),
            segments = core.segment_count(),
            arc_divisions,
            "created segmented mapper"
        );
        Ok(Self {
            core,
            arc_divisions,
        })
    }

    /// Create a mapper with [`DEFAULT_ARC_DIVISIONS`] subdivisions.
    ///
    /// # Errors
    ///
    /// See [`SegmentedMapper::new`].
    pub fn with_defaults(points: Vec<Vector<D>>, parameters: CurveParameters) -> Result<Self> {
        Self::new(points, parameters, DEFAULT_ARC_DIVISIONS)
    }

    /// Number of subdivisions in the table.
    pub fn arc_divisions(&self) -> usize {
        self.arc_divisions
    }

    /// Cumulative chord lengths, `arc_divisions + 1` entries.
    pub fn arc_lengths(&self) -> &[f64] {
        self.core
            .cached_arc_lengths(|| build_table(&self.core, self.arc_divisions))
    }
}

fn build_table<const D: usize>(core: &MapperCore<D>, divisions: usize) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(divisions + 1);
    let mut previous = core.point_at_t(0.0);
    let mut total = 0.0;
    lengths.push(total);
    for i in 1..=divisions {
        let current = core.point_at_t(i as f64 / divisions as f64);
        total += distance(&previous, &current);
        lengths.push(total);
        previous = current;
    }
    debug!(
        divisions,
        total_length = total,
        generation = core.generation(),
        "built segmented arc-length table"
    );
    lengths
}

impl<const D: usize> CurveMapper<D> for SegmentedMapper<D> {
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
        let table = self.arc_lengths();
        let divisions = self.arc_divisions as f64;
        let total = table.last().copied().unwrap_or(0.0);
        if total <= 0.0 {
            return u;
        }
        let target = u * total;

        // Last entry not greater than the target.
        let i = table
            .partition_point(|&length| length <= target)
            .saturating_sub(1)
            .min(self.arc_divisions);
        let before = table.get(i).copied().unwrap_or(0.0);
        if before == target {
            return i as f64 / divisions;
        }
        let Some(after) = table.get(i + 1).copied() else {
            return i as f64 / divisions;
        };
        let span = after - before;
        let fraction = if span > 0.0 {
            (target - before) / span
        } else {
            0.0
        };
        (i as f64 + fraction) / divisions
    }

    fn u_at_t(&self, t: f64) -> f64 {
        if t == 0.0 {
            return 0.0;
        }
        if t == 1.0 {
            return 1.0;
        }
        let table = self.arc_lengths();
        let total = table.last().copied().unwrap_or(0.0);
        if total <= 0.0 {
            return t;
        }

        let divisions = self.arc_divisions as f64;
        let scaled = t * divisions;
        let i = (scaled.floor().max(0.0) as usize).min(self.arc_divisions);
        let before = table.get(i).copied().unwrap_or(0.0);
        if i as f64 == scaled {
            return before / total;
        }
        let start = self.core.point_at_t(i as f64 / divisions);
        let end = self.core.point_at_t(t);
        (before + distance(&start, &end)) / total
    }
}
