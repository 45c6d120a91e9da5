//! Vertical axes (height, depth, or pressure levels).

use coverage_common::Extent;
use serde::{Deserialize, Serialize};

use crate::axis::{Axis, AxisValues};
use crate::error::Result;

/// Describes how a vertical axis's values relate to the real world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerticalCrs {
    /// Units of the axis values (e.g. "m", "hPa").
    pub units: String,
    /// Whether values increase upwards (false for depth and pressure levels).
    pub positive_up: bool,
    /// Whether the axis measures pressure rather than length.
    pub pressure: bool,
}

impl VerticalCrs {
    pub fn new(units: impl Into<String>, positive_up: bool, pressure: bool) -> Self {
        Self {
            units: units.into(),
            positive_up,
            pressure,
        }
    }

    /// Height above the reference surface, in meters.
    pub fn height_meters() -> Self {
        Self::new("m", true, false)
    }

    /// Depth below the reference surface, in meters.
    pub fn depth_meters() -> Self {
        Self::new("m", false, false)
    }

    /// Pressure levels in hectopascals (increase downwards).
    pub fn pressure_hpa() -> Self {
        Self::new("hPa", false, true)
    }
}

/// A numeric vertical axis with its vertical CRS fixed at construction.
#[derive(Debug, Clone)]
pub struct VerticalAxis {
    name: String,
    crs: VerticalCrs,
    values: AxisValues<f64>,
}

impl VerticalAxis {
    /// Build a vertical axis from explicit level values.
    pub fn new(name: impl Into<String>, crs: VerticalCrs, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        let values = AxisValues::from_values(values)?;
        tracing::debug!(
            axis = %name,
            size = values.len(),
            units = %crs.units,
            "built vertical axis"
        );
        Ok(Self { name, crs, values })
    }

    /// The vertical CRS attached at construction.
    pub fn vertical_crs(&self) -> &VerticalCrs {
        &self.crs
    }
}

impl Axis for VerticalAxis {
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
