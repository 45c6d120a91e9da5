//! Grid cell and index-range value objects.

use coverage_common::{BoundingBox, CrsCode, HorizontalPosition};
use serde::{Deserialize, Serialize};

use crate::grid::RectilinearGrid;

/// A pair of grid indices addressing one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoordinates2D {
    pub x_index: usize,
    pub y_index: usize,
}

impl GridCoordinates2D {
    pub fn new(x_index: usize, y_index: usize) -> Self {
        Self { x_index, y_index }
    }
}

/// The index range of a grid: inclusive high bounds on each axis, with zero
/// as the implicit low bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridExtent {
    /// Highest valid x index (inclusive).
    pub x_high: usize,
    /// Highest valid y index (inclusive).
    pub y_high: usize,
}

impl GridExtent {
    pub fn new(x_high: usize, y_high: usize) -> Self {
        Self { x_high, y_high }
    }

    /// Number of cells along x.
    pub fn x_size(&self) -> usize {
        self.x_high + 1
    }

    /// Number of cells along y.
    pub fn y_size(&self) -> usize {
        self.y_high + 1
    }

    /// Total number of cells.
    pub fn size(&self) -> usize {
        self.x_size() * self.y_size()
    }

    /// Whether a coordinate pair addresses a cell in this extent.
    pub fn contains(&self, coords: GridCoordinates2D) -> bool {
        coords.x_index <= self.x_high && coords.y_index <= self.y_high
    }

    /// Combine a coordinate pair into a row-major linear index, or `None` if
    /// the pair is out of range.
    pub fn linear_index(&self, coords: GridCoordinates2D) -> Option<usize> {
        if !self.contains(coords) {
            return None;
        }
        Some(coords.x_index + self.x_size() * coords.y_index)
    }

    /// Decompose a row-major linear index back into a coordinate pair, or
    /// `None` if the index is out of range.
    pub fn decompose(&self, linear: usize) -> Option<GridCoordinates2D> {
        if linear >= self.size() {
            return None;
        }
        let x_index = linear % self.x_size();
        let y_index = (linear - x_index) / self.x_size();
        Some(GridCoordinates2D::new(x_index, y_index))
    }
}

/// One cell of a rectilinear grid: its index pair, its coordinate footprint,
/// and a borrow of the grid it belongs to.
///
/// Cells are derived on demand from the owning grid's axes; they hold no
/// state of their own beyond the footprint corners.
#[derive(Debug, Clone, Copy)]
pub struct GridCell<'g> {
    coords: GridCoordinates2D,
    footprint: BoundingBox,
    crs: CrsCode,
    grid: &'g RectilinearGrid,
}

impl<'g> GridCell<'g> {
    pub(crate) fn new(
        coords: GridCoordinates2D,
        footprint: BoundingBox,
        crs: CrsCode,
        grid: &'g RectilinearGrid,
    ) -> Self {
        Self {
            coords,
            footprint,
            crs,
            grid,
        }
    }

    /// The index pair addressing this cell.
    pub fn coordinates(&self) -> GridCoordinates2D {
        self.coords
    }

    /// The rectangle of coordinate space this cell covers.
    pub fn footprint(&self) -> BoundingBox {
        self.footprint
    }

    /// The CRS the footprint is expressed in.
    pub fn crs(&self) -> CrsCode {
        self.crs
    }

    /// The grid this cell belongs to.
    pub fn grid(&self) -> &'g RectilinearGrid {
        self.grid
    }

    /// The axis value pair at this cell's indices.
    pub fn center(&self) -> HorizontalPosition {
        self.grid.position_of(self.coords)
    }

    /// Whether a position (assumed to be in the cell's CRS) falls inside the
    /// cell footprint.
    pub fn contains(&self, pos: HorizontalPosition) -> bool {
        self.footprint.contains_point(pos.x, pos.y)
    }
}
