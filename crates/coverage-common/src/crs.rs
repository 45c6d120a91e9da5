//! Coordinate Reference System identifiers and the reprojection capability.

use crate::position::HorizontalPosition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known CRS codes understood by the coverage domain model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lat/lon in degrees)
    Epsg4326,
    /// Web Mercator (meters)
    Epsg3857,
    /// NAD83 Geographic
    Epsg4269,
    /// Lambert Conformal Conic (CONUS)
    Epsg5070,
    /// Polar Stereographic North
    Epsg3413,
    /// Polar Stereographic South
    Epsg3031,
}

impl CrsCode {
    /// Parse a CRS identifier string.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326"
    /// - "epsg:4326"
    /// - "CRS:84" (equivalent to EPSG:4326 with lon/lat axis order)
    pub fn from_string(s: &str) -> Result<Self, CrsParseError> {
        let normalized = s.to_uppercase();

        match normalized.as_str() {
            "EPSG:4326" | "CRS:84" => Ok(CrsCode::Epsg4326),
            "EPSG:3857" | "EPSG:900913" => Ok(CrsCode::Epsg3857),
            "EPSG:4269" => Ok(CrsCode::Epsg4269),
            "EPSG:5070" => Ok(CrsCode::Epsg5070),
            "EPSG:3413" => Ok(CrsCode::Epsg3413),
            "EPSG:3031" => Ok(CrsCode::Epsg3031),
            _ => Err(CrsParseError::UnsupportedCrs(s.to_string())),
        }
    }

    /// Check if this is a geographic (lat/lon) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, CrsCode::Epsg4326 | CrsCode::Epsg4269)
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            CrsCode::Epsg4326 => "EPSG:4326",
            CrsCode::Epsg3857 => "EPSG:3857",
            CrsCode::Epsg4269 => "EPSG:4269",
            CrsCode::Epsg5070 => "EPSG:5070",
            CrsCode::Epsg3413 => "EPSG:3413",
            CrsCode::Epsg3031 => "EPSG:3031",
        };
        write!(f, "{}", code)
    }
}

/// Position reprojection, supplied by an external geospatial library.
///
/// The grid core only ever consumes this: when a queried position is expressed
/// in a different CRS from a grid's, the grid asks an attached `Reprojector`
/// for the equivalent position in its own CRS. Returns `None` when the
/// transformation is not available for the requested pair of systems.
pub trait Reprojector {
    fn reproject(&self, pos: HorizontalPosition, target: CrsCode) -> Option<HorizontalPosition>;
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crs() {
        assert_eq!(
            CrsCode::from_string("EPSG:4326").unwrap(),
            CrsCode::Epsg4326
        );
        assert_eq!(
            CrsCode::from_string("epsg:3857").unwrap(),
            CrsCode::Epsg3857
        );
        assert_eq!(CrsCode::from_string("CRS:84").unwrap(), CrsCode::Epsg4326);
        assert!(CrsCode::from_string("EPSG:99999").is_err());
    }

    #[test]
    fn test_is_geographic() {
        assert!(CrsCode::Epsg4326.is_geographic());
        assert!(CrsCode::Epsg4269.is_geographic());
        assert!(!CrsCode::Epsg3857.is_geographic());
    }

    #[test]
    fn test_display_round_trip() {
        for crs in [CrsCode::Epsg4326, CrsCode::Epsg3857, CrsCode::Epsg5070] {
            assert_eq!(CrsCode::from_string(&crs.to_string()).unwrap(), crs);
        }
    }
}
