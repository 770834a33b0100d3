//! Hex Grid and the River/Road Consistency Engine
//!
//! The grid owns every cell in a flat arena plus a sparse map of edge
//! records. All edits are explicit command functions that return `true`
//! when they changed state; edits that would violate an invariant are
//! silent no-ops returning `false`.
//!
//! Invariants maintained here:
//! - at most one incoming and one outgoing river per cell
//! - a river only flows to a neighbor that is not higher, or whose
//!   elevation equals the source's water level
//! - a road and a river never share an edge
//! - special-feature cells carry no rivers or roads
//! - roads never cross an elevation difference greater than 1

use std::collections::HashMap;

use super::cell::{Cell, CellIndex};
use super::coords::{HexCoordinates, HexDirection};
use super::edge::{EdgeKey, EdgeState, HexEdgeType};

/// A rectangular grid of hex cells with river and road edge-graphs.
#[derive(Clone, Debug)]
pub struct HexGrid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    edges: HashMap<EdgeKey, EdgeState>,
}

impl HexGrid {
    /// Create a grid of `width` columns by `height` rows of flat cells.
    pub fn new(width: u32, height: u32) -> Self {
        let mut cells = Vec::with_capacity((width * height) as usize);
        for row in 0..height as i32 {
            for column in 0..width as i32 {
                cells.push(Cell::new(HexCoordinates::from_offset(column, row)));
            }
        }
        Self {
            width,
            height,
            cells,
            edges: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Borrow a cell's scalar state.
    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index.index()]
    }

    /// Iterate over all cell indices in storage order.
    pub fn indices(&self) -> impl Iterator<Item = CellIndex> {
        (0..self.cells.len() as u32).map(CellIndex)
    }

    /// Iterate over all cells in storage order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Look up the cell at axial coordinates, if inside the grid.
    pub fn cell_at(&self, coordinates: HexCoordinates) -> Option<CellIndex> {
        let (column, row) = coordinates.to_offset();
        if row < 0 || row >= self.height as i32 || column < 0 || column >= self.width as i32 {
            return None;
        }
        Some(CellIndex(row as u32 * self.width + column as u32))
    }

    /// The neighbor one step in `direction`, if inside the grid.
    pub fn neighbor(&self, cell: CellIndex, direction: HexDirection) -> Option<CellIndex> {
        self.cell_at(self.cell(cell).coordinates.step(direction))
    }

    // ========================================================================
    // EDGE STATE
    // ========================================================================

    fn edge_key(&self, cell: CellIndex, direction: HexDirection) -> Option<EdgeKey> {
        self.neighbor(cell, direction)
            .map(|neighbor| EdgeKey::new(cell, direction, neighbor))
    }

    fn edge_state(&self, cell: CellIndex, direction: HexDirection) -> EdgeState {
        self.edge_key(cell, direction)
            .and_then(|key| self.edges.get(&key).copied())
            .unwrap_or_default()
    }

    /// The single mutation path for edge records. Empty records are dropped
    /// so the map only ever holds edges that carry state.
    fn mutate_edge(&mut self, key: EdgeKey, f: impl FnOnce(&mut EdgeState)) {
        let state = self.edges.entry(key).or_default();
        f(state);
        if state.is_empty() {
            self.edges.remove(&key);
        }
    }

    // ========================================================================
    // RIVER QUERIES
    // ========================================================================

    /// Direction of the river flowing out of `cell`, if any.
    pub fn outgoing_river(&self, cell: CellIndex) -> Option<HexDirection> {
        HexDirection::ALL
            .into_iter()
            .find(|&direction| self.edge_state(cell, direction).river_source == Some(cell))
    }

    /// Direction of the river flowing into `cell`, if any.
    pub fn incoming_river(&self, cell: CellIndex) -> Option<HexDirection> {
        HexDirection::ALL.into_iter().find(|&direction| {
            matches!(self.edge_state(cell, direction).river_source, Some(source) if source != cell)
        })
    }

    pub fn has_river(&self, cell: CellIndex) -> bool {
        self.outgoing_river(cell).is_some() || self.incoming_river(cell).is_some()
    }

    /// The cell is a river's source or mouth (exactly one river endpoint).
    pub fn has_river_begin_or_end(&self, cell: CellIndex) -> bool {
        self.outgoing_river(cell).is_some() != self.incoming_river(cell).is_some()
    }

    /// At a begin-or-end cell, the direction of its single river edge.
    pub fn river_begin_or_end_direction(&self, cell: CellIndex) -> Option<HexDirection> {
        self.incoming_river(cell).or_else(|| self.outgoing_river(cell))
    }

    pub fn has_river_through_edge(&self, cell: CellIndex, direction: HexDirection) -> bool {
        self.edge_state(cell, direction).river_source.is_some()
    }

    // ========================================================================
    // RIVER COMMANDS
    // ========================================================================

    /// A river may flow from `source` to `destination` when the destination
    /// is not higher, or sits exactly at the source's water level.
    fn is_valid_river_destination(&self, source: CellIndex, destination: CellIndex) -> bool {
        let source = self.cell(source);
        let destination = self.cell(destination);
        source.elevation >= destination.elevation || source.water_level == destination.elevation
    }

    /// Start or redirect the river flowing out of `cell` toward `direction`.
    ///
    /// Silent no-op if the neighbor is missing or is not a valid destination.
    /// On success the neighbor's previous incoming river is removed, any
    /// road on the edge is removed, and both endpoints lose their special
    /// feature.
    pub fn set_outgoing_river(&mut self, cell: CellIndex, direction: HexDirection) -> bool {
        if self.outgoing_river(cell) == Some(direction) {
            return false;
        }
        let Some(neighbor) = self.neighbor(cell, direction) else {
            return false;
        };
        if !self.is_valid_river_destination(cell, neighbor) {
            return false;
        }

        self.remove_outgoing_river(cell);
        if self.incoming_river(cell) == Some(direction) {
            self.remove_incoming_river(cell);
        }
        self.remove_incoming_river(neighbor);

        let key = EdgeKey::new(cell, direction, neighbor);
        self.mutate_edge(key, |edge| {
            edge.river_source = Some(cell);
            edge.road = false;
        });
        self.cells[cell.index()].special_index = 0;
        self.cells[neighbor.index()].special_index = 0;
        true
    }

    /// Remove the river flowing out of `cell`. No-op if there is none.
    pub fn remove_outgoing_river(&mut self, cell: CellIndex) -> bool {
        let Some(direction) = self.outgoing_river(cell) else {
            return false;
        };
        if let Some(key) = self.edge_key(cell, direction) {
            self.mutate_edge(key, |edge| edge.river_source = None);
        }
        true
    }

    /// Remove the river flowing into `cell`. No-op if there is none.
    pub fn remove_incoming_river(&mut self, cell: CellIndex) -> bool {
        let Some(direction) = self.incoming_river(cell) else {
            return false;
        };
        if let Some(key) = self.edge_key(cell, direction) {
            self.mutate_edge(key, |edge| edge.river_source = None);
        }
        true
    }

    /// Remove both river edges of `cell`.
    pub fn remove_river(&mut self, cell: CellIndex) -> bool {
        let removed_outgoing = self.remove_outgoing_river(cell);
        let removed_incoming = self.remove_incoming_river(cell);
        removed_outgoing || removed_incoming
    }

    /// Drop any river edge of `cell` whose validity predicate no longer
    /// holds. Called after elevation or water-level changes.
    fn validate_rivers(&mut self, cell: CellIndex) {
        if let Some(direction) = self.outgoing_river(cell) {
            if let Some(neighbor) = self.neighbor(cell, direction) {
                if !self.is_valid_river_destination(cell, neighbor) {
                    self.remove_outgoing_river(cell);
                }
            }
        }
        if let Some(direction) = self.incoming_river(cell) {
            if let Some(neighbor) = self.neighbor(cell, direction) {
                if !self.is_valid_river_destination(neighbor, cell) {
                    self.remove_incoming_river(cell);
                }
            }
        }
    }

    // ========================================================================
    // ROAD QUERIES AND COMMANDS
    // ========================================================================

    pub fn has_road_through_edge(&self, cell: CellIndex, direction: HexDirection) -> bool {
        self.edge_state(cell, direction).road
    }

    pub fn has_roads(&self, cell: CellIndex) -> bool {
        HexDirection::ALL
            .into_iter()
            .any(|direction| self.has_road_through_edge(cell, direction))
    }

    /// Absolute elevation difference across an edge; `None` off-grid.
    pub fn elevation_difference(
        &self,
        cell: CellIndex,
        direction: HexDirection,
    ) -> Option<i32> {
        let neighbor = self.neighbor(cell, direction)?;
        Some((self.cell(cell).elevation - self.cell(neighbor).elevation).abs())
    }

    /// Flat/slope/cliff classification of an edge; `None` off-grid.
    pub fn edge_type(&self, cell: CellIndex, direction: HexDirection) -> Option<HexEdgeType> {
        let neighbor = self.neighbor(cell, direction)?;
        Some(self.edge_type_between(cell, neighbor))
    }

    pub fn edge_type_between(&self, a: CellIndex, b: CellIndex) -> HexEdgeType {
        HexEdgeType::classify(self.cell(a).elevation, self.cell(b).elevation)
    }

    /// Add a road through an edge.
    ///
    /// Silent no-op if the road exists, a river runs through the edge,
    /// either endpoint is special, or the edge is steeper than one step.
    pub fn add_road(&mut self, cell: CellIndex, direction: HexDirection) -> bool {
        let Some(neighbor) = self.neighbor(cell, direction) else {
            return false;
        };
        let edge = self.edge_state(cell, direction);
        if edge.road
            || edge.river_source.is_some()
            || self.cell(cell).is_special()
            || self.cell(neighbor).is_special()
        {
            return false;
        }
        if self.elevation_difference(cell, direction) > Some(1) {
            return false;
        }
        self.mutate_edge(EdgeKey::new(cell, direction, neighbor), |edge| {
            edge.road = true;
        });
        true
    }

    /// Remove every road touching `cell`.
    pub fn remove_roads(&mut self, cell: CellIndex) -> bool {
        let mut removed = false;
        for direction in HexDirection::ALL {
            if self.has_road_through_edge(cell, direction) {
                if let Some(key) = self.edge_key(cell, direction) {
                    self.mutate_edge(key, |edge| edge.road = false);
                    removed = true;
                }
            }
        }
        removed
    }

    // ========================================================================
    // SCALAR COMMANDS
    // ========================================================================

    /// Set a cell's elevation, then re-validate its rivers and drop any of
    /// its roads that now cross more than one elevation step.
    pub fn set_elevation(&mut self, cell: CellIndex, elevation: i32) -> bool {
        if self.cell(cell).elevation == elevation {
            return false;
        }
        self.cells[cell.index()].elevation = elevation;
        self.validate_rivers(cell);
        for direction in HexDirection::ALL {
            if self.has_road_through_edge(cell, direction)
                && self.elevation_difference(cell, direction) > Some(1)
            {
                if let Some(key) = self.edge_key(cell, direction) {
                    self.mutate_edge(key, |edge| edge.road = false);
                }
            }
        }
        true
    }

    /// Set a cell's water level, then re-validate its rivers.
    pub fn set_water_level(&mut self, cell: CellIndex, water_level: i32) -> bool {
        if self.cell(cell).water_level == water_level {
            return false;
        }
        self.cells[cell.index()].water_level = water_level;
        self.validate_rivers(cell);
        true
    }

    pub fn set_terrain_type(&mut self, cell: CellIndex, terrain_type_index: u8) -> bool {
        if self.cell(cell).terrain_type_index == terrain_type_index {
            return false;
        }
        self.cells[cell.index()].terrain_type_index = terrain_type_index;
        true
    }

    pub fn set_urban_level(&mut self, cell: CellIndex, level: u8) -> bool {
        if self.cell(cell).urban_level == level {
            return false;
        }
        self.cells[cell.index()].urban_level = level;
        true
    }

    pub fn set_farm_level(&mut self, cell: CellIndex, level: u8) -> bool {
        if self.cell(cell).farm_level == level {
            return false;
        }
        self.cells[cell.index()].farm_level = level;
        true
    }

    pub fn set_plant_level(&mut self, cell: CellIndex, level: u8) -> bool {
        if self.cell(cell).plant_level == level {
            return false;
        }
        self.cells[cell.index()].plant_level = level;
        true
    }

    pub fn set_walled(&mut self, cell: CellIndex, walled: bool) -> bool {
        if self.cell(cell).walled == walled {
            return false;
        }
        self.cells[cell.index()].walled = walled;
        true
    }

    /// Set a cell's special-feature index.
    ///
    /// Silent no-op on river cells. A change removes all roads on the cell.
    pub fn set_special_index(&mut self, cell: CellIndex, special_index: u8) -> bool {
        if self.cell(cell).special_index == special_index || self.has_river(cell) {
            return false;
        }
        self.cells[cell.index()].special_index = special_index;
        self.remove_roads(cell);
        true
    }

    // ========================================================================
    // RAW RESTORE (map loading)
    // ========================================================================

    pub(crate) fn restore_cell(&mut self, cell: CellIndex) -> &mut Cell {
        &mut self.cells[cell.index()]
    }

    /// Record a river edge without validation; loader-only.
    pub(crate) fn restore_river(&mut self, cell: CellIndex, direction: HexDirection) {
        if let Some(key) = self.edge_key(cell, direction) {
            self.mutate_edge(key, |edge| edge.river_source = Some(cell));
        }
    }

    /// Record a road edge without validation; loader-only.
    pub(crate) fn restore_road(&mut self, cell: CellIndex, direction: HexDirection) {
        if let Some(key) = self.edge_key(cell, direction) {
            self.mutate_edge(key, |edge| edge.road = true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        let grid = HexGrid::new(6, 4);
        assert_eq!(grid.cell_count(), 24);
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.height(), 4);
    }

    #[test]
    fn test_cell_lookup_round_trip() {
        let grid = HexGrid::new(5, 5);
        for index in grid.indices() {
            let coordinates = grid.cell(index).coordinates();
            assert_eq!(grid.cell_at(coordinates), Some(index));
        }
    }

    #[test]
    fn test_cell_lookup_out_of_bounds() {
        let grid = HexGrid::new(5, 5);
        assert!(grid.cell_at(HexCoordinates::from_offset(-1, 0)).is_none());
        assert!(grid.cell_at(HexCoordinates::from_offset(0, -1)).is_none());
        assert!(grid.cell_at(HexCoordinates::from_offset(5, 0)).is_none());
        assert!(grid.cell_at(HexCoordinates::from_offset(0, 5)).is_none());
    }

    #[test]
    fn test_neighbor_is_symmetric() {
        let grid = HexGrid::new(6, 6);
        for cell in grid.indices() {
            for direction in HexDirection::ALL {
                if let Some(neighbor) = grid.neighbor(cell, direction) {
                    assert_eq!(grid.neighbor(neighbor, direction.opposite()), Some(cell));
                }
            }
        }
    }

    #[test]
    fn test_border_cells_have_missing_neighbors() {
        let grid = HexGrid::new(4, 4);
        let corner = grid.cell_at(HexCoordinates::from_offset(0, 0)).unwrap();
        assert!(grid.neighbor(corner, HexDirection::W).is_none());
        assert!(grid.neighbor(corner, HexDirection::SW).is_none());
        assert!(grid.neighbor(corner, HexDirection::SE).is_none());
        assert!(grid.neighbor(corner, HexDirection::E).is_some());
    }

    #[test]
    fn test_set_elevation_reports_change() {
        let mut grid = HexGrid::new(3, 3);
        let cell = CellIndex(4);
        assert!(grid.set_elevation(cell, 2));
        assert!(!grid.set_elevation(cell, 2));
        assert_eq!(grid.cell(cell).elevation(), 2);
    }

    #[test]
    fn test_edge_map_stays_sparse() {
        let mut grid = HexGrid::new(4, 4);
        let cell = grid.cell_at(HexCoordinates::from_offset(1, 1)).unwrap();
        assert!(grid.add_road(cell, HexDirection::E));
        assert_eq!(grid.edges.len(), 1);
        assert!(grid.remove_roads(cell));
        assert!(grid.edges.is_empty());
    }
}
