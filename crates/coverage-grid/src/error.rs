//! Error types for axis construction.

use thiserror::Error;

/// Errors raised when building an axis from coordinate values.
///
/// These are construction-time validation failures: no axis object is ever
/// observable in a partially built state. Lookup misses on a valid axis are
/// reported as `None`, never as errors.
#[derive(Debug, Error)]
pub enum AxisError {
    /// The supplied value sequence was empty.
    #[error("axis values must contain at least one coordinate")]
    Empty,

    /// A value could not be ordered (NaN or infinite).
    #[error("axis value at position {index} is not a valid coordinate")]
    Invalid { index: usize },

    /// Adjacent values failed to strictly increase after orientation
    /// normalization (includes exact duplicates).
    #[error("axis values must increase or decrease strictly monotonically (violation at position {index})")]
    NonMonotonic { index: usize },
}

/// Result type for axis construction.
pub type Result<T> = std::result::Result<T, AxisError>;
