//! Hex Coordinates and Directions
//!
//! Axial coordinate system for a pointy-side grid of hexagons stored in
//! rectangular offset rows. Axial coordinates satisfy x + y + z = 0 with
//! y derived, so arithmetic (neighbor steps, distances) stays symmetric
//! while storage stays a flat row-major array.
//!
//! # Coordinate System
//!
//! - Offset coordinates (column, row): storage layout, row-major
//! - Axial coordinates (x, z): hex arithmetic, x = column - row / 2
//! - World space: X/Z plane, one cell spans two inner radii across

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::metrics;

/// One of the six hexagonal edge directions, clockwise from north-east.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexDirection {
    NE,
    E,
    SE,
    SW,
    W,
    NW,
}

impl HexDirection {
    /// All six directions in index order.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::NE,
        HexDirection::E,
        HexDirection::SE,
        HexDirection::SW,
        HexDirection::W,
        HexDirection::NW,
    ];

    /// The direction pointing the opposite way (three steps around).
    pub fn opposite(self) -> HexDirection {
        HexDirection::ALL[(self as usize + 3) % 6]
    }

    /// The next direction clockwise.
    pub fn next(self) -> HexDirection {
        HexDirection::ALL[(self as usize + 1) % 6]
    }

    /// The previous direction (counter-clockwise).
    pub fn previous(self) -> HexDirection {
        HexDirection::ALL[(self as usize + 5) % 6]
    }

    /// Direction from its index (0 = NE .. 5 = NW), `None` if out of range.
    pub fn from_index(index: u8) -> Option<HexDirection> {
        HexDirection::ALL.get(index as usize).copied()
    }

    /// Axial (x, z) delta for stepping one cell in this direction.
    fn axial_delta(self) -> (i32, i32) {
        match self {
            HexDirection::NE => (0, 1),
            HexDirection::E => (1, 0),
            HexDirection::SE => (1, -1),
            HexDirection::SW => (0, -1),
            HexDirection::W => (-1, 0),
            HexDirection::NW => (-1, 1),
        }
    }
}

/// Axial hex coordinates.
///
/// The third cube coordinate y is derived (`y = -x - z`) and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoordinates {
    pub x: i32,
    pub z: i32,
}

impl HexCoordinates {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Derived cube y coordinate.
    pub fn y(self) -> i32 {
        -self.x - self.z
    }

    /// Convert rectangular offset (column, row) storage coordinates to axial.
    pub fn from_offset(column: i32, row: i32) -> Self {
        Self {
            x: column - row / 2,
            z: row,
        }
    }

    /// Convert back to offset (column, row) storage coordinates.
    pub fn to_offset(self) -> (i32, i32) {
        (self.x + self.z / 2, self.z)
    }

    /// The coordinates one step away in `direction`.
    pub fn step(self, direction: HexDirection) -> Self {
        let (dx, dz) = direction.axial_delta();
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Number of cell steps between two coordinates.
    pub fn distance_to(self, other: HexCoordinates) -> i32 {
        ((self.x - other.x).abs() + (self.y() - other.y()).abs() + (self.z - other.z).abs()) / 2
    }

    /// Find the cell containing a world-space point.
    ///
    /// Inverts the cell-center layout, then rounds in cube coordinates:
    /// the component with the largest rounding error is recomputed from
    /// the other two so x + y + z stays zero.
    pub fn from_position(position: Vec3) -> Self {
        let mut x = position.x / (metrics::INNER_RADIUS * 2.0);
        let mut y = -x;

        let offset = position.z / (metrics::OUTER_RADIUS * 3.0);
        x -= offset;
        y -= offset;

        let ix = x.round();
        let iy = y.round();
        let iz = (-x - y).round();

        if ix + iy + iz == 0.0 {
            return Self::new(ix as i32, iz as i32);
        }

        let dx = (x - ix).abs();
        let dy = (y - iy).abs();
        let dz = (-x - y - iz).abs();

        if dx > dy && dx > dz {
            Self::new((-iy - iz) as i32, iz as i32)
        } else if dz > dy {
            Self::new(ix as i32, (-ix - iy) as i32)
        } else {
            Self::new(ix as i32, iz as i32)
        }
    }
}

impl std::fmt::Display for HexCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y(), self.z)
    }
}
