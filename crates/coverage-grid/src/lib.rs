//! Axis and rectilinear-grid indexing for gridded earth-science data.
//!
//! The crate models 1D coordinate axes (spatial, vertical, temporal) that
//! support nearest-index search and per-cell bounds, and composes pairs of
//! axes into 2D rectilinear grids with cell lookup, containment tests, and
//! row-major index linearization. Everything is immutable after construction
//! and safe for concurrent reads.

pub mod axis;
pub mod cell;
pub mod error;
pub mod grid;
pub mod time;
pub mod vertical;

pub use axis::{Axis, AxisCoordinate, ReferenceableAxis};
pub use cell::{GridCell, GridCoordinates2D, GridExtent};
pub use error::AxisError;
pub use grid::{DomainObjects, RectilinearGrid};
pub use time::{CalendarParseError, CalendarSystem, TimeAxis};
pub use vertical::{VerticalAxis, VerticalCrs};
