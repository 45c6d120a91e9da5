//! Horizontal positions in a known coordinate reference system.

use crate::crs::CrsCode;
use serde::{Deserialize, Serialize};

/// A 2D position together with the CRS its ordinates are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPosition {
    /// Longitude or easting, in CRS units.
    pub x: f64,
    /// Latitude or northing, in CRS units.
    pub y: f64,
    /// The CRS the ordinates are expressed in.
    pub crs: CrsCode,
}

impl HorizontalPosition {
    pub fn new(x: f64, y: f64, crs: CrsCode) -> Self {
        Self { x, y, crs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_fields() {
        let pos = HorizontalPosition::new(-1.5, 52.0, CrsCode::Epsg4326);
        assert_eq!(pos.x, -1.5);
        assert_eq!(pos.y, 52.0);
        assert_eq!(pos.crs, CrsCode::Epsg4326);
    }
}
