//! Curve parameters and arc-length mapping configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, Result};
use crate::mapper::{Mapper, NumericalMapper, SegmentedMapper};
use crate::quadrature;
use crate::vector::Vector;

/// Default tension (halfway between Catmull-Rom and straight lines).
pub const DEFAULT_TENSION: f64 = 0.5;
/// Default knot-spacing exponent (uniform).
pub const DEFAULT_ALPHA: f64 = 0.0;
/// Default number of subdivisions for the segmented mapper.
pub const DEFAULT_ARC_DIVISIONS: usize = 300;
/// Default number of inverse-fit samples per segment for the numerical mapper.
pub const DEFAULT_INVERSE_SAMPLES: usize = 21;

/// Shape parameters shared by every mapper.
///
/// # Example
///
/// ```
/// use curve_interpolator::CurveParameters;
///
/// let params = CurveParameters::centripetal();
/// assert!(params.validate().is_ok());
/// assert_eq!(params.alpha, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveParameters {
    /// `0` gives full Catmull-Rom curvature, `1` straight segments.
    pub tension: f64,
    /// Knot-spacing exponent: `0` uniform, `0.5` centripetal, `1` chordal.
    pub alpha: f64,
    /// Join the last control point back to the first.
    pub closed: bool,
}

impl Default for CurveParameters {
    fn default() -> Self {
        Self {
            tension: DEFAULT_TENSION,
            alpha: DEFAULT_ALPHA,
            closed: false,
        }
    }
}

impl CurveParameters {
    /// Classic Catmull-Rom: tension 0, uniform knots.
    pub fn catmull_rom() -> Self {
        Self {
            tension: 0.0,
            ..Self::default()
        }
    }

    /// Centripetal Catmull-Rom: tension 0, alpha 0.5.
    pub fn centripetal() -> Self {
        Self {
            tension: 0.0,
            alpha: 0.5,
            closed: false,
        }
    }

    /// Chordal Catmull-Rom: tension 0, alpha 1.
    pub fn chordal() -> Self {
        Self {
            tension: 0.0,
            alpha: 1.0,
            closed: false,
        }
    }

    /// Builder-style tension override.
    pub fn with_tension(mut self, tension: f64) -> Self {
        self.tension = tension;
        self
    }

    /// Builder-style alpha override.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Builder-style closed override.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Check tension and alpha are finite and inside `[0,1]`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        validate_unit("tension", self.tension)?;
        validate_unit("alpha", self.alpha)
    }
}

pub(crate) fn validate_unit(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CurveError::config(format!("{} must be finite", field)));
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(CurveError::config(format!(
            "{} must be in [0, 1], got {}",
            field, value
        )));
    }
    Ok(())
}

/// Strategy used to map between local time and arc length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappingStrategy {
    /// Linear arc-length table sampled at uniform `t`.
    Segmented {
        /// Number of subdivisions of the whole curve.
        arc_divisions: usize,
    },
    /// Gauss–Legendre arc length with a monotone-cubic inverse per segment.
    Numerical {
        /// Quadrature order.
        approximation_order: usize,
        /// Inverse-fit samples per segment.
        inverse_samples: usize,
    },
}

impl Default for MappingStrategy {
    fn default() -> Self {
        Self::Numerical {
            approximation_order: quadrature::DEFAULT_ORDER,
            inverse_samples: DEFAULT_INVERSE_SAMPLES,
        }
    }
}

impl MappingStrategy {
    /// Segmented strategy with the given number of subdivisions.
    pub fn segmented(arc_divisions: usize) -> Self {
        Self::Segmented { arc_divisions }
    }

    /// Numerical strategy with the given quadrature order and inverse samples.
    pub fn numerical(approximation_order: usize, inverse_samples: usize) -> Self {
        Self::Numerical {
            approximation_order,
            inverse_samples,
        }
    }

    /// Check the strategy settings.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] for zero subdivisions, a
    /// quadrature order outside the supported range, or fewer than two
    /// inverse samples.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Segmented { arc_divisions } => {
                if arc_divisions == 0 {
                    return Err(CurveError::config("arc_divisions must be at least 1"));
                }
            }
            Self::Numerical {
                approximation_order,
                inverse_samples,
            } => {
                if !(quadrature::MIN_ORDER..=quadrature::MAX_ORDER).contains(&approximation_order)
                {
                    return Err(CurveError::config(format!(
                        "approximation_order must be in [{}, {}], got {}",
                        quadrature::MIN_ORDER,
                        quadrature::MAX_ORDER,
                        approximation_order
                    )));
                }
                if inverse_samples < 2 {
                    return Err(CurveError::config(format!(
                        "inverse_samples must be at least 2, got {}",
                        inverse_samples
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Full construction options: curve shape plus mapping strategy.
///
/// # Example
///
/// ```
/// use curve_interpolator::{CurveMapper, CurveOptions, MappingStrategy};
///
/// let options = CurveOptions {
///     mapping: MappingStrategy::segmented(300),
///     ..CurveOptions::default()
/// };
/// let mapper = options.build(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]])?;
/// assert!(mapper.total_length() > 2.0);
/// # Ok::<(), curve_interpolator::CurveError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveOptions {
    /// Shape parameters.
    #[serde(flatten)]
    pub parameters: CurveParameters,
    /// Arc-length mapping strategy.
    pub mapping: MappingStrategy,
}

impl CurveOptions {
    /// Validate parameters and strategy together.
    ///
    /// # Errors
    ///
    /// Returns the first [`CurveError::InvalidConfiguration`] found.
    pub fn validate(&self) -> Result<()> {
        self.parameters.validate()?;
        self.mapping.validate()
    }

    /// Build a mapper over `points` with these options.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid, fewer than two points are
    /// given, or a point has a non-finite coordinate.
    pub fn build<const D: usize>(&self, points: Vec<Vector<D>>) -> Result<Mapper<D>> {
        self.validate()?;
        match self.mapping {
            MappingStrategy::Segmented { arc_divisions } => {
                SegmentedMapper::new(points, self.parameters, arc_divisions).map(Mapper::Segmented)
            }
            MappingStrategy::Numerical {
                approximation_order,
                inverse_samples,
            } => NumericalMapper::new(points, self.parameters, approximation_order, inverse_samples)
                .map(Mapper::Numerical),
        }
    }
}
