//! Hexmap Engine Library
//!
//! Core logic for a hexagonal map editor: a cell grid with rivers, roads,
//! terrain and water levels, a brush editor that paints over it, a binary
//! save format, and the parametric graph function library.
//!
//! # Modules
//!
//! - [`hex`] - Coordinates, cells, edge records, and the grid with its
//!   river/road consistency rules
//! - [`editor`] - Brush editor with drag-directional river/road painting
//! - [`map_file`] - Versioned binary map persistence
//! - [`graph`] - Parametric surface functions and the transition animator
//!
//! # Example
//!
//! ```
//! use hexmap_engine::hex::{HexCoordinates, HexDirection, HexGrid};
//!
//! let mut grid = HexGrid::new(8, 6);
//! let a = grid.cell_at(HexCoordinates::from_offset(2, 2)).unwrap();
//!
//! grid.set_elevation(a, 2);
//! // Rivers flow downhill; invalid placements are silent no-ops.
//! if grid.set_outgoing_river(a, HexDirection::E) {
//!     assert!(grid.has_river_begin_or_end(a));
//! }
//! ```

pub mod editor;
pub mod graph;
pub mod hex;
pub mod map_file;

// Re-export the types nearly every caller touches.
pub use editor::{BrushPreset, MapEditor, OptionalToggle};
pub use hex::{Cell, CellIndex, HexCoordinates, HexDirection, HexEdgeType, HexGrid};
pub use map_file::{MAP_FORMAT_VERSION, MapFileError, load_map, save_map};
