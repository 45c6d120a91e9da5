//! Referenceable axes: ordered 1D coordinate sequences with nearest-index
//! search and per-cell bounds.
//!
//! An axis may be supplied in ascending or descending order. Internally the
//! values are always held ascending so that search and bounds math exist in a
//! single canonical form; a translation step at every public boundary maps
//! indices back to the caller's original orientation.

use std::cmp::Ordering;

use coverage_common::Extent;

use crate::error::{AxisError, Result};

/// A coordinate type that can populate an axis.
///
/// Implemented for `f64` (spatial/vertical axes) and for `DateTime<Utc>`
/// (time axes, compared through their millisecond scalar).
pub trait AxisCoordinate: Copy + PartialOrd {
    /// Whether the value can participate in ordering and search.
    fn is_valid(self) -> bool;

    /// The value halfway between two coordinates.
    fn midpoint(self, other: Self) -> Self;

    /// Extend an edge value away from its neighbour by half the edge spacing.
    fn half_step_beyond(self, inner: Self) -> Self;

    /// Nearest-neighbour tie-break: whether `upper` is at least as close to
    /// `target` as `lower` is. Midpoint ties resolve to the upper candidate.
    fn prefers_upper(target: Self, lower: Self, upper: Self) -> bool;
}

impl AxisCoordinate for f64 {
    fn is_valid(self) -> bool {
        self.is_finite()
    }

    fn midpoint(self, other: Self) -> Self {
        0.5 * (self + other)
    }

    fn half_step_beyond(self, inner: Self) -> Self {
        self - 0.5 * (inner - self)
    }

    fn prefers_upper(target: Self, lower: Self, upper: Self) -> bool {
        (upper - target).abs() <= (target - lower).abs()
    }
}

/// The query surface every axis type offers.
///
/// Indices are always expressed in the caller's original input orientation.
pub trait Axis {
    type Value: AxisCoordinate;

    /// Axis name (e.g. "longitude", "time").
    fn name(&self) -> &str;

    /// Number of coordinate values on the axis.
    fn size(&self) -> usize;

    /// The original input orientation, not the internal storage order.
    fn is_ascending(&self) -> bool;

    /// The coordinate value at `index`.
    ///
    /// # Panics
    /// Panics if `index >= size()`.
    fn coordinate_value(&self, index: usize) -> Self::Value;

    /// Locate the axis cell whose value is nearest to `value`, or `None` if
    /// `value` lies beyond the first/last axis value.
    fn find_index_of(&self, value: Self::Value) -> Option<usize>;

    /// Like [`Axis::find_index_of`] but never misses: values beyond the axis
    /// ends resolve to the nearest end cell. Used for pixel-grid mapping where
    /// off-grid coordinates are still meaningful.
    fn find_index_of_unconstrained(&self, value: Self::Value) -> usize;

    /// The coordinate interval assigned to cell `index`: adjacent-value
    /// midpoints for interior cells, extrapolated by half the edge spacing at
    /// the axis ends.
    ///
    /// # Panics
    /// Panics if `index >= size()`.
    fn coordinate_bounds(&self, index: usize) -> Extent<Self::Value>;

    /// The union of all per-cell bounds.
    fn coordinate_extent(&self) -> Extent<Self::Value>;
}

/// Canonical ascending-order storage plus the orientation flag.
///
/// All search and bounds arithmetic lives here; the public axis types wrap
/// this with their own metadata (name, calendar, vertical CRS).
#[derive(Debug, Clone)]
pub(crate) struct AxisValues<T> {
    /// Always strictly ascending.
    values: Vec<T>,
    /// Original input orientation.
    ascending: bool,
}

impl<T: AxisCoordinate> AxisValues<T> {
    pub(crate) fn from_values(mut values: Vec<T>) -> Result<Self> {
        if values.is_empty() {
            return Err(AxisError::Empty);
        }
        for (index, v) in values.iter().enumerate() {
            if !v.is_valid() {
                return Err(AxisError::Invalid { index });
            }
        }

        // Orientation comes from the first two values; equal values fall
        // through to the monotonicity check below.
        let descending = values.len() >= 2 && values[1] < values[0];
        if descending {
            values.reverse();
        }

        for i in 1..values.len() {
            if values[i] <= values[i - 1] {
                return Err(AxisError::NonMonotonic { index: i });
            }
        }

        Ok(Self {
            values,
            ascending: !descending,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// Map between external and internal index conventions. The mapping is its
    /// own inverse.
    fn translate(&self, index: usize) -> usize {
        if self.ascending {
            index
        } else {
            self.values.len() - 1 - index
        }
    }

    pub(crate) fn value(&self, index: usize) -> T {
        assert!(
            index < self.values.len(),
            "axis index {} out of range 0..{}",
            index,
            self.values.len()
        );
        self.values[self.translate(index)]
    }

    /// Binary search over the internal ascending array. Stored values are
    /// validated at construction, so the comparator is total for any valid
    /// target.
    fn search(&self, target: T) -> std::result::Result<usize, usize> {
        self.values
            .binary_search_by(|v| v.partial_cmp(&target).unwrap_or(Ordering::Greater))
    }

    pub(crate) fn find_index_of(&self, target: T) -> Option<usize> {
        if !target.is_valid() {
            return None;
        }
        match self.search(target) {
            Ok(exact) => Some(self.translate(exact)),
            Err(insertion) if insertion == 0 || insertion == self.values.len() => None,
            Err(insertion) => Some(self.translate(self.nearest(target, insertion))),
        }
    }

    pub(crate) fn find_index_of_unconstrained(&self, target: T) -> usize {
        debug_assert!(target.is_valid(), "axis queried with an invalid coordinate");
        match self.search(target) {
            Ok(exact) => self.translate(exact),
            Err(0) => self.translate(0),
            Err(insertion) if insertion == self.values.len() => self.translate(insertion - 1),
            Err(insertion) => self.translate(self.nearest(target, insertion)),
        }
    }

    /// Of the two values straddling an interior insertion point, pick the
    /// numerically closer one; midpoint ties go to the upper candidate.
    fn nearest(&self, target: T, insertion: usize) -> usize {
        if T::prefers_upper(target, self.values[insertion - 1], self.values[insertion]) {
            insertion
        } else {
            insertion - 1
        }
    }

    pub(crate) fn coordinate_bounds(&self, index: usize) -> Extent<T> {
        let n = self.values.len();
        assert!(index < n, "axis index {} out of range 0..{}", index, n);
        if n == 1 {
            return Extent::singleton(self.values[0]);
        }

        let i = self.translate(index);
        let low = if i == 0 {
            self.values[0].half_step_beyond(self.values[1])
        } else {
            self.values[i - 1].midpoint(self.values[i])
        };
        let high = if i == n - 1 {
            self.values[n - 1].half_step_beyond(self.values[n - 2])
        } else {
            self.values[i].midpoint(self.values[i + 1])
        };
        Extent::new(low, high)
    }

    pub(crate) fn coordinate_extent(&self) -> Extent<T> {
        let n = self.values.len();
        if n == 1 {
            return Extent::singleton(self.values[0]);
        }
        Extent::new(
            self.values[0].half_step_beyond(self.values[1]),
            self.values[n - 1].half_step_beyond(self.values[n - 2]),
        )
    }
}

/// A numeric axis referenced by explicit coordinate values.
///
/// Values need not be evenly spaced; they must be strictly monotonic in either
/// direction. The axis is immutable once built.
#[derive(Debug, Clone)]
pub struct ReferenceableAxis {
    name: String,
    values: AxisValues<f64>,
}

impl ReferenceableAxis {
    /// Build an axis from explicit coordinate values.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        let values = AxisValues::from_values(values)?;
        tracing::debug!(
            axis = %name,
            size = values.len(),
            ascending = values.is_ascending(),
            "built referenceable axis"
        );
        Ok(Self { name, values })
    }

    /// Build an evenly spaced axis of `count` values starting at `first`.
    /// A negative `spacing` yields a descending axis.
    pub fn regular(name: impl Into<String>, first: f64, spacing: f64, count: usize) -> Result<Self> {
        let values = (0..count).map(|i| first + i as f64 * spacing).collect();
        Self::new(name, values)
    }
}

impl Axis for ReferenceableAxis {
    type Value = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> usize {
        self.values.len()
    }

    fn is_ascending(&self) -> bool {
        self.values.is_ascending()
    }

    fn coordinate_value(&self, index: usize) -> f64 {
        self.values.value(index)
    }

    fn find_index_of(&self, value: f64) -> Option<usize> {
        self.values.find_index_of(value)
    }

    fn find_index_of_unconstrained(&self, value: f64) -> usize {
        self.values.find_index_of_unconstrained(value)
    }

    fn coordinate_bounds(&self, index: usize) -> Extent<f64> {
        self.values.coordinate_bounds(index)
    }

    fn coordinate_extent(&self) -> Extent<f64> {
        self.values.coordinate_extent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(values: &[f64]) -> ReferenceableAxis {
        ReferenceableAxis::new("x", values.to_vec()).unwrap()
    }

    #[test]
    fn test_ascending_orientation_round_trip() {
        let a = axis(&[0.0, 10.0, 20.0, 30.0]);
        assert!(a.is_ascending());
        assert_eq!(a.size(), 4);
        for (i, v) in [0.0, 10.0, 20.0, 30.0].iter().enumerate() {
            assert_eq!(a.coordinate_value(i), *v);
        }
    }

    #[test]
    fn test_descending_orientation_round_trip() {
        let a = axis(&[30.0, 20.0, 10.0, 0.0]);
        assert!(!a.is_ascending());
        for (i, v) in [30.0, 20.0, 10.0, 0.0].iter().enumerate() {
            assert_eq!(a.coordinate_value(i), *v);
        }
    }

    #[test]
    fn test_single_value_axis() {
        let a = axis(&[7.0]);
        assert!(a.is_ascending());
        assert_eq!(a.coordinate_value(0), 7.0);
        assert_eq!(a.find_index_of(7.0), Some(0));
        assert_eq!(a.find_index_of(8.0), None);
        assert_eq!(a.find_index_of_unconstrained(1e9), 0);
        assert_eq!(a.coordinate_bounds(0), Extent::singleton(7.0));
        assert_eq!(a.coordinate_extent(), Extent::singleton(7.0));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            ReferenceableAxis::new("x", vec![]),
            Err(AxisError::Empty)
        ));
    }

    #[test]
    fn test_duplicates_rejected() {
        assert!(matches!(
            ReferenceableAxis::new("x", vec![1.0, 2.0, 2.0]),
            Err(AxisError::NonMonotonic { .. })
        ));
        assert!(matches!(
            ReferenceableAxis::new("x", vec![5.0, 3.0, 3.0]),
            Err(AxisError::NonMonotonic { .. })
        ));
    }

    #[test]
    fn test_non_monotonic_rejected() {
        assert!(matches!(
            ReferenceableAxis::new("x", vec![0.0, 10.0, 5.0]),
            Err(AxisError::NonMonotonic { .. })
        ));
    }

    #[test]
    fn test_descending_input_accepted() {
        let a = axis(&[5.0, 3.0, 1.0]);
        assert!(!a.is_ascending());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            ReferenceableAxis::new("x", vec![0.0, f64::NAN, 2.0]),
            Err(AxisError::Invalid { index: 1 })
        ));
        assert!(matches!(
            ReferenceableAxis::new("x", vec![f64::INFINITY]),
            Err(AxisError::Invalid { index: 0 })
        ));
    }

    #[test]
    fn test_find_index_of_exact_and_nearest() {
        let a = axis(&[0.0, 10.0, 20.0, 30.0]);
        assert_eq!(a.find_index_of(20.0), Some(2));
        // Midpoint tie resolves to the upper index.
        assert_eq!(a.find_index_of(15.0), Some(2));
        assert_eq!(a.find_index_of(14.0), Some(1));
        assert_eq!(a.find_index_of(-5.0), None);
        assert_eq!(a.find_index_of(35.0), None);
    }

    #[test]
    fn test_find_index_of_descending() {
        // External orientation: index 0 = 30.0.
        let a = axis(&[30.0, 20.0, 10.0, 0.0]);
        assert_eq!(a.find_index_of(20.0), Some(1));
        assert_eq!(a.find_index_of(14.0), Some(2));
        // Tie still goes to the upper internal value (20.0), which is
        // external index 1.
        assert_eq!(a.find_index_of(15.0), Some(1));
        assert_eq!(a.find_index_of(31.0), None);
    }

    #[test]
    fn test_find_index_of_nan_query() {
        let a = axis(&[0.0, 10.0, 20.0]);
        assert_eq!(a.find_index_of(f64::NAN), None);
    }

    #[test]
    fn test_unconstrained_clamps_to_ends() {
        let a = axis(&[0.0, 10.0, 20.0, 30.0]);
        assert_eq!(a.find_index_of_unconstrained(-100.0), 0);
        assert_eq!(a.find_index_of_unconstrained(100.0), 3);
        assert_eq!(a.find_index_of_unconstrained(15.0), 2);
        assert_eq!(a.find_index_of_unconstrained(14.0), 1);

        let d = axis(&[30.0, 20.0, 10.0, 0.0]);
        assert_eq!(d.find_index_of_unconstrained(-100.0), 3);
        assert_eq!(d.find_index_of_unconstrained(100.0), 0);
    }

    #[test]
    fn test_coordinate_bounds() {
        let a = axis(&[0.0, 10.0, 20.0]);
        assert_eq!(a.coordinate_bounds(0), Extent::new(-5.0, 5.0));
        assert_eq!(a.coordinate_bounds(1), Extent::new(5.0, 15.0));
        assert_eq!(a.coordinate_bounds(2), Extent::new(15.0, 25.0));
        assert_eq!(a.coordinate_extent(), Extent::new(-5.0, 25.0));
    }

    #[test]
    fn test_coordinate_bounds_uneven_spacing() {
        let a = axis(&[0.0, 10.0, 40.0]);
        assert_eq!(a.coordinate_bounds(0), Extent::new(-5.0, 5.0));
        assert_eq!(a.coordinate_bounds(1), Extent::new(5.0, 25.0));
        assert_eq!(a.coordinate_bounds(2), Extent::new(25.0, 55.0));
    }

    #[test]
    fn test_coordinate_bounds_descending() {
        // External index 0 = 20.0, whose cell spans 15..25.
        let a = axis(&[20.0, 10.0, 0.0]);
        assert_eq!(a.coordinate_bounds(0), Extent::new(15.0, 25.0));
        assert_eq!(a.coordinate_bounds(2), Extent::new(-5.0, 5.0));
        assert_eq!(a.coordinate_extent(), Extent::new(-5.0, 25.0));
    }

    #[test]
    fn test_regular_constructor() {
        let a = ReferenceableAxis::regular("lon", 0.0, 0.25, 5).unwrap();
        assert_eq!(a.size(), 5);
        assert_eq!(a.coordinate_value(4), 1.0);
        assert!(a.is_ascending());

        let d = ReferenceableAxis::regular("lat", 90.0, -0.25, 5).unwrap();
        assert!(!d.is_ascending());
        assert_eq!(d.coordinate_value(0), 90.0);
        assert_eq!(d.coordinate_value(4), 89.0);
    }

    #[test]
    fn test_regular_zero_spacing_rejected() {
        assert!(ReferenceableAxis::regular("x", 0.0, 0.0, 3).is_err());
        assert!(ReferenceableAxis::regular("x", 0.0, 1.0, 0).is_err());
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_index_panics() {
        let a = axis(&[0.0, 10.0]);
        a.coordinate_value(2);
    }
}
