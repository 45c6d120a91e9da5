//! Rectilinear grids: two independent axes composed into a 2D domain.

use std::fmt;
use std::sync::Arc;

use coverage_common::{BoundingBox, CrsCode, HorizontalPosition, Reprojector};

use crate::axis::{Axis, ReferenceableAxis};
use crate::cell::{GridCell, GridCoordinates2D, GridExtent};

/// A 2D coordinate system formed by an x axis and a y axis, which need not be
/// evenly or identically spaced.
///
/// The grid is immutable after construction: every query is a read-only
/// combination of the two per-axis lookups, so unsynchronized concurrent
/// access is safe.
#[derive(Clone)]
pub struct RectilinearGrid {
    x_axis: ReferenceableAxis,
    y_axis: ReferenceableAxis,
    crs: CrsCode,
    reprojector: Option<Arc<dyn Reprojector + Send + Sync>>,
}

impl RectilinearGrid {
    /// Compose two axes into a grid in the given CRS.
    pub fn new(x_axis: ReferenceableAxis, y_axis: ReferenceableAxis, crs: CrsCode) -> Self {
        tracing::debug!(
            x_size = x_axis.size(),
            y_size = y_axis.size(),
            crs = %crs,
            "built rectilinear grid"
        );
        Self {
            x_axis,
            y_axis,
            crs,
            reprojector: None,
        }
    }

    /// Attach a reprojection capability for cross-CRS cell queries.
    pub fn with_reprojector(mut self, reprojector: Arc<dyn Reprojector + Send + Sync>) -> Self {
        self.reprojector = Some(reprojector);
        self
    }

    pub fn x_axis(&self) -> &ReferenceableAxis {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &ReferenceableAxis {
        &self.y_axis
    }

    pub fn crs(&self) -> CrsCode {
        self.crs
    }

    /// Number of cells along x.
    pub fn x_size(&self) -> usize {
        self.x_axis.size()
    }

    /// Number of cells along y.
    pub fn y_size(&self) -> usize {
        self.y_axis.size()
    }

    /// Total number of cells.
    pub fn size(&self) -> usize {
        self.x_size() * self.y_size()
    }

    /// The inclusive index range of the grid.
    pub fn grid_extent(&self) -> GridExtent {
        GridExtent::new(self.x_size() - 1, self.y_size() - 1)
    }

    /// The coordinate footprint of the whole grid, extrapolated edge cells
    /// included.
    pub fn coordinate_extent(&self) -> BoundingBox {
        BoundingBox::from_extents(
            self.x_axis.coordinate_extent(),
            self.y_axis.coordinate_extent(),
        )
    }

    /// The axis value pair at a cell's indices, in the grid CRS.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn position_of(&self, coords: GridCoordinates2D) -> HorizontalPosition {
        HorizontalPosition::new(
            self.x_axis.coordinate_value(coords.x_index),
            self.y_axis.coordinate_value(coords.y_index),
            self.crs,
        )
    }

    /// Find the cell whose bounds contain `pos`, reprojecting first when the
    /// position is expressed in a different CRS. Positions outside the axis
    /// ranges are a normal miss, not an error.
    pub fn find_containing_cell(&self, pos: HorizontalPosition) -> Option<GridCoordinates2D> {
        let pos = self.in_grid_crs(pos)?;
        let x_index = self.x_axis.find_index_of(pos.x)?;
        let y_index = self.y_axis.find_index_of(pos.y)?;
        Some(GridCoordinates2D::new(x_index, y_index))
    }

    fn in_grid_crs(&self, pos: HorizontalPosition) -> Option<HorizontalPosition> {
        if pos.crs == self.crs {
            return Some(pos);
        }
        match &self.reprojector {
            Some(reprojector) => reprojector.reproject(pos, self.crs),
            None => {
                tracing::warn!(
                    from = %pos.crs,
                    to = %self.crs,
                    "no reprojector attached; cross-CRS query treated as a miss"
                );
                None
            }
        }
    }

    /// Resolve a position (already in the grid CRS) to a row-major linear
    /// index, `x_index + x_size * y_index`.
    pub fn find_index_of(&self, pos: HorizontalPosition) -> Option<usize> {
        let x_index = self.x_axis.find_index_of(pos.x)?;
        let y_index = self.y_axis.find_index_of(pos.y)?;
        Some(x_index + self.x_size() * y_index)
    }

    /// Whether `pos` lies within the grid's coordinate extent. This uses the
    /// extrapolated per-axis extents, so it is broader than an exact index
    /// lookup succeeding.
    pub fn contains(&self, pos: HorizontalPosition) -> bool {
        self.x_axis.coordinate_extent().contains(pos.x)
            && self.y_axis.coordinate_extent().contains(pos.y)
    }

    /// Build the cell at the given indices from the two axes' bounds.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn grid_cell(&self, x_index: usize, y_index: usize) -> GridCell<'_> {
        let x_bounds = self.x_axis.coordinate_bounds(x_index);
        let y_bounds = self.y_axis.coordinate_bounds(y_index);
        GridCell::new(
            GridCoordinates2D::new(x_index, y_index),
            BoundingBox::from_extents(x_bounds, y_bounds),
            self.crs,
            self,
        )
    }

    /// All cells of the grid in row-major order, computed lazily. The
    /// iterator is restartable (call again for a fresh pass) and keeps memory
    /// proportional to the axes, never the cell count.
    pub fn domain_objects(&self) -> DomainObjects<'_> {
        DomainObjects {
            grid: self,
            next: 0,
            total: self.size(),
        }
    }
}

impl fmt::Debug for RectilinearGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RectilinearGrid")
            .field("x_axis", &self.x_axis)
            .field("y_axis", &self.y_axis)
            .field("crs", &self.crs)
            .field("reprojector", &self.reprojector.is_some())
            .finish()
    }
}

/// Lazy row-major enumeration of a grid's cells.
#[derive(Debug, Clone)]
pub struct DomainObjects<'g> {
    grid: &'g RectilinearGrid,
    next: usize,
    total: usize,
}

impl<'g> DomainObjects<'g> {
    /// The cell at a linear index, independent of iteration state.
    pub fn get(&self, linear: usize) -> Option<GridCell<'g>> {
        let coords = self.grid.grid_extent().decompose(linear)?;
        Some(self.grid.grid_cell(coords.x_index, coords.y_index))
    }
}

impl<'g> Iterator for DomainObjects<'g> {
    type Item = GridCell<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let cell = self.get(self.next);
        self.next += 1;
        cell
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DomainObjects<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_4x3() -> RectilinearGrid {
        let x = ReferenceableAxis::new("x", vec![0.0, 10.0, 20.0, 30.0]).unwrap();
        let y = ReferenceableAxis::new("y", vec![0.0, 5.0, 10.0]).unwrap();
        RectilinearGrid::new(x, y, CrsCode::Epsg4326)
    }

    #[test]
    fn test_grid_extent() {
        let grid = grid_4x3();
        assert_eq!(grid.grid_extent(), GridExtent::new(3, 2));
        assert_eq!(grid.size(), 12);
    }

    #[test]
    fn test_find_containing_cell() {
        let grid = grid_4x3();
        let pos = HorizontalPosition::new(21.0, 4.0, CrsCode::Epsg4326);
        assert_eq!(
            grid.find_containing_cell(pos),
            Some(GridCoordinates2D::new(2, 1))
        );

        let outside = HorizontalPosition::new(-50.0, 4.0, CrsCode::Epsg4326);
        assert_eq!(grid.find_containing_cell(outside), None);
    }

    #[test]
    fn test_cross_crs_without_reprojector_misses() {
        let grid = grid_4x3();
        let pos = HorizontalPosition::new(21.0, 4.0, CrsCode::Epsg3857);
        assert_eq!(grid.find_containing_cell(pos), None);
    }

    #[test]
    fn test_cross_crs_with_reprojector() {
        struct Shift;
        impl Reprojector for Shift {
            fn reproject(
                &self,
                pos: HorizontalPosition,
                target: CrsCode,
            ) -> Option<HorizontalPosition> {
                // Stand-in transform: drop the CRS tag, keep ordinates.
                Some(HorizontalPosition::new(pos.x, pos.y, target))
            }
        }

        let grid = grid_4x3().with_reprojector(Arc::new(Shift));
        let pos = HorizontalPosition::new(21.0, 4.0, CrsCode::Epsg3857);
        assert_eq!(
            grid.find_containing_cell(pos),
            Some(GridCoordinates2D::new(2, 1))
        );
    }

    #[test]
    fn test_linear_index() {
        let grid = grid_4x3();
        // X index 2, Y index 1 -> 2 + 4*1 = 6.
        let pos = HorizontalPosition::new(20.0, 5.0, CrsCode::Epsg4326);
        assert_eq!(grid.find_index_of(pos), Some(6));
        assert_eq!(grid.find_index_of(HorizontalPosition::new(99.0, 5.0, CrsCode::Epsg4326)), None);
    }

    #[test]
    fn test_contains_uses_extrapolated_extent() {
        let grid = grid_4x3();
        // x extent is -5..35, y extent is -2.5..12.5.
        assert!(grid.contains(HorizontalPosition::new(-4.0, 0.0, CrsCode::Epsg4326)));
        assert!(grid.contains(HorizontalPosition::new(34.0, 12.0, CrsCode::Epsg4326)));
        assert!(!grid.contains(HorizontalPosition::new(-6.0, 0.0, CrsCode::Epsg4326)));
        assert!(!grid.contains(HorizontalPosition::new(0.0, 13.0, CrsCode::Epsg4326)));
    }

    #[test]
    fn test_grid_cell_footprint() {
        let grid = grid_4x3();
        let cell = grid.grid_cell(0, 0);
        assert_eq!(cell.footprint(), BoundingBox::new(-5.0, -2.5, 5.0, 2.5));
        assert_eq!(cell.crs(), CrsCode::Epsg4326);
        assert_eq!(
            cell.center(),
            HorizontalPosition::new(0.0, 0.0, CrsCode::Epsg4326)
        );
        assert!(cell.contains(HorizontalPosition::new(-4.9, 2.4, CrsCode::Epsg4326)));
    }

    #[test]
    fn test_position_of() {
        let grid = grid_4x3();
        assert_eq!(
            grid.position_of(GridCoordinates2D::new(3, 2)),
            HorizontalPosition::new(30.0, 10.0, CrsCode::Epsg4326)
        );
    }

    #[test]
    fn test_domain_objects_row_major() {
        let grid = grid_4x3();
        let cells = grid.domain_objects();
        assert_eq!(cells.len(), 12);

        let coords: Vec<_> = grid.domain_objects().map(|c| c.coordinates()).collect();
        assert_eq!(coords[0], GridCoordinates2D::new(0, 0));
        assert_eq!(coords[1], GridCoordinates2D::new(1, 0));
        assert_eq!(coords[4], GridCoordinates2D::new(0, 1));
        assert_eq!(coords[11], GridCoordinates2D::new(3, 2));
    }

    #[test]
    fn test_domain_objects_get_matches_iteration() {
        let grid = grid_4x3();
        let cells = grid.domain_objects();
        for (i, cell) in grid.domain_objects().enumerate() {
            let indexed = cells.get(i).unwrap();
            assert_eq!(indexed.coordinates(), cell.coordinates());
            assert_eq!(indexed.footprint(), cell.footprint());
        }
        assert!(cells.get(12).is_none());
    }
}
