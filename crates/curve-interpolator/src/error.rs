//! Error types for curve operations.

/// Error type for curve operations.
///
/// Construction and setter violations are reported synchronously at the
/// mutation that introduced them. Query operations are total over their
/// documented domain and do not return errors, except where an argument
/// (an axis index, a segment index) can be out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// Fewer control points than a curve needs.
    #[error("insufficient control points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum number of control points.
        required: usize,
        /// Number of control points supplied.
        actual: usize,
    },

    /// A control point has a NaN or infinite coordinate.
    #[error("control point {index} has non-finite coordinate {value} on axis {axis}")]
    NonFiniteControlPoint {
        /// Index of the control point.
        index: usize,
        /// Axis of the offending coordinate.
        axis: usize,
        /// The invalid value.
        value: f64,
    },

    /// Invalid curve configuration.
    ///
    /// This covers errors like:
    /// - tension or alpha outside `[0,1]` or non-finite
    /// - zero arc divisions
    /// - quadrature order or inverse sample count out of range
    #[error("invalid curve configuration: {0}")]
    InvalidConfiguration(String),

    /// Invalid argument to a query.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A segment index past the end of the curve.
    #[error("segment {index} does not exist (curve has {segment_count} segments)")]
    SegmentOutOfRange {
        /// The requested segment index.
        index: usize,
        /// Number of segments in the curve.
        segment_count: usize,
    },
}

impl CurveError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CurveError>;
