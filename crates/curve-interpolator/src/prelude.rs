//! Prelude module for common curve types
//!
//! `use curve_interpolator::prelude::*;` brings in the mapper trait, both
//! strategies and the query functions.

// Configuration
pub use crate::config::{CurveOptions, CurveParameters, MappingStrategy};

// Errors
pub use crate::error::{CurveError, Result};

// Mappers
pub use crate::mapper::{
    CacheInvalidated, CurveMapper, InvalidationReason, Mapper, NumericalMapper, SegmentedMapper,
};

// Queries
pub use crate::bounds::{BoundingBox, bounding_box};
pub use crate::intersect::{lookup, lookup_t};

// Building blocks
pub use crate::segment::{CubicCoefficients, SegmentCoefficients};
pub use crate::vector::Vector;
