//! One-dimensional coordinate extents.

use serde::{Deserialize, Serialize};

/// An inclusive range of coordinate values along a single axis.
///
/// Used for per-cell axis bounds and whole-axis coordinate extents. `low` and
/// `high` are both included in the range; a degenerate extent has `low == high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent<T> {
    pub low: T,
    pub high: T,
}

impl<T: PartialOrd + Copy> Extent<T> {
    /// Create an extent from its two endpoints.
    pub fn new(low: T, high: T) -> Self {
        Self { low, high }
    }

    /// Create a degenerate extent containing a single value.
    pub fn singleton(value: T) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    /// Check whether a value lies within this extent (endpoints included).
    pub fn contains(&self, value: T) -> bool {
        value >= self.low && value <= self.high
    }

    /// Combine two extents into the smallest extent covering both.
    pub fn union(&self, other: &Extent<T>) -> Extent<T> {
        Extent {
            low: if other.low < self.low {
                other.low
            } else {
                self.low
            },
            high: if other.high > self.high {
                other.high
            } else {
                self.high
            },
        }
    }
}
