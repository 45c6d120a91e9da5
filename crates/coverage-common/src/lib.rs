//! Common value types shared across the coverage domain crates.

pub mod bbox;
pub mod crs;
pub mod extent;
pub mod position;

pub use bbox::BoundingBox;
pub use crs::{CrsCode, CrsParseError, Reprojector};
pub use extent::Extent;
pub use position::HorizontalPosition;
