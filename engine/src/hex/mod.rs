//! Hex Map Module
//!
//! Axial coordinates, per-cell state, edge records, and the grid that ties
//! them together. The grid is the only mutation surface; everything else
//! is plain data.

pub mod cell;
pub mod coords;
pub mod edge;
pub mod grid;
pub mod metrics;

pub use cell::{Cell, CellIndex};
pub use coords::{HexCoordinates, HexDirection};
pub use edge::HexEdgeType;
pub use grid::HexGrid;
