//! Hex Cell State
//!
//! Per-cell scalar state for the map grid. Cells live in the grid's arena
//! and are addressed by [`CellIndex`]; they hold no neighbor pointers and
//! no river/road flags. Edge state lives in the grid's edge map so the two
//! sides of an edge can never disagree.
//!
//! All mutation goes through [`HexGrid`](super::grid::HexGrid) command
//! functions, which is what keeps the river/road invariants intact.

use glam::Vec3;

use super::coords::HexCoordinates;
use super::metrics;

/// Arena index of a cell within its grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellIndex(pub u32);

impl CellIndex {
    /// The index as a usize for slice access.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Scalar state of one hex cell.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) coordinates: HexCoordinates,
    pub(crate) elevation: i32,
    pub(crate) water_level: i32,
    pub(crate) terrain_type_index: u8,
    pub(crate) urban_level: u8,
    pub(crate) farm_level: u8,
    pub(crate) plant_level: u8,
    pub(crate) special_index: u8,
    pub(crate) walled: bool,
}

impl Cell {
    pub(crate) fn new(coordinates: HexCoordinates) -> Self {
        Self {
            coordinates,
            elevation: 0,
            water_level: 0,
            terrain_type_index: 0,
            urban_level: 0,
            farm_level: 0,
            plant_level: 0,
            special_index: 0,
            walled: false,
        }
    }

    pub fn coordinates(&self) -> HexCoordinates {
        self.coordinates
    }

    pub fn elevation(&self) -> i32 {
        self.elevation
    }

    pub fn water_level(&self) -> i32 {
        self.water_level
    }

    pub fn terrain_type_index(&self) -> u8 {
        self.terrain_type_index
    }

    pub fn urban_level(&self) -> u8 {
        self.urban_level
    }

    pub fn farm_level(&self) -> u8 {
        self.farm_level
    }

    pub fn plant_level(&self) -> u8 {
        self.plant_level
    }

    pub fn special_index(&self) -> u8 {
        self.special_index
    }

    pub fn walled(&self) -> bool {
        self.walled
    }

    /// Water covers the cell surface.
    pub fn is_underwater(&self) -> bool {
        self.water_level > self.elevation
    }

    /// Carries a special feature (index > 0), mutually exclusive with
    /// rivers and roads.
    pub fn is_special(&self) -> bool {
        self.special_index > 0
    }

    /// World-space center of the cell, elevation applied.
    pub fn position(&self) -> Vec3 {
        let (column, row) = self.coordinates.to_offset();
        metrics::cell_center(column, row, self.elevation)
    }

    /// World-space height of a river bed crossing this cell.
    pub fn stream_bed_y(&self) -> f32 {
        (self.elevation as f32 + metrics::STREAM_BED_ELEVATION_OFFSET) * metrics::ELEVATION_STEP
    }

    /// World-space height of a river surface crossing this cell.
    pub fn river_surface_y(&self) -> f32 {
        (self.elevation as f32 + metrics::WATER_ELEVATION_OFFSET) * metrics::ELEVATION_STEP
    }

    /// World-space height of standing water on this cell.
    pub fn water_surface_y(&self) -> f32 {
        (self.water_level as f32 + metrics::WATER_ELEVATION_OFFSET) * metrics::ELEVATION_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_plain_ground() {
        let cell = Cell::new(HexCoordinates::new(0, 0));
        assert_eq!(cell.elevation(), 0);
        assert!(!cell.is_underwater());
        assert!(!cell.is_special());
        assert!(!cell.walled());
    }

    #[test]
    fn test_underwater_threshold() {
        let mut cell = Cell::new(HexCoordinates::new(0, 0));
        cell.elevation = 2;
        cell.water_level = 2;
        assert!(!cell.is_underwater());
        cell.water_level = 3;
        assert!(cell.is_underwater());
    }

    #[test]
    fn test_surface_heights_track_levels() {
        let mut cell = Cell::new(HexCoordinates::new(0, 0));
        cell.elevation = 4;
        cell.water_level = 5;
        assert!(cell.stream_bed_y() < cell.river_surface_y());
        assert!(cell.river_surface_y() < cell.water_surface_y());
    }
}
