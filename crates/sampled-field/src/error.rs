//! Error types for sampled fields.

use thiserror::Error;

use crate::boundary::{Axis, BoundaryBehavior};

/// Errors that can occur while building, querying or refining a field.
#[derive(Error, Debug)]
pub enum FieldError {
    /// The domain is inverted or non-finite.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// The sample interval is not strictly positive and finite.
    #[error("invalid sample interval: {0}")]
    InvalidInterval(String),

    /// The domain extent is not a whole number of intervals.
    #[error("{axis} extent {size} is not a multiple of interval {interval}")]
    IntervalMismatch { axis: Axis, size: f64, interval: f64 },

    /// A periodic or reflecting axis has zero extent.
    #[error("{behavior:?} behavior on {axis} axis needs a non-degenerate extent")]
    DegenerateAxis {
        axis: Axis,
        behavior: BoundaryBehavior,
    },

    /// No rows were supplied to infer a lattice from.
    #[error("no rows to build a field from")]
    EmptyRows,

    /// A coordinate mapped outside the stored lattice.
    #[error("lattice index ({ix}, {iy}) outside {dim_x}x{dim_y} grid")]
    IndexOutOfRange {
        ix: i64,
        iy: i64,
        dim_x: usize,
        dim_y: usize,
    },

    /// Segment bisection went deeper than the configured limit.
    #[error("segment refinement did not converge within {depth} levels")]
    RefinementDidNotConverge { depth: usize },

    /// Crossing bisection ran out of iterations.
    #[error("crossing search did not converge within {iterations} iterations")]
    CrossingDidNotConverge { iterations: usize },

    /// A caller-supplied argument is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Storage/IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Row decoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FieldError {
    /// Create an InvalidDomain error.
    pub fn invalid_domain(msg: impl Into<String>) -> Self {
        Self::InvalidDomain(msg.into())
    }

    /// Create an InvalidInterval error.
    pub fn invalid_interval(msg: impl Into<String>) -> Self {
        Self::InvalidInterval(msg.into())
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

/// Result type for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;
