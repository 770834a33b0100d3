//! Edge Records
//!
//! River and road state is stored once per edge, keyed by a canonical
//! (cell, direction) pair, instead of mirrored booleans on both endpoint
//! cells. Every mutation goes through a single path in the grid, so the
//! two sides of an edge cannot drift apart.

use super::cell::CellIndex;
use super::coords::HexDirection;

/// Canonical identifier of an edge between two adjacent cells.
///
/// The key is always expressed from the endpoint with the lower arena
/// index, so `(a, d)` and `(b, d.opposite())` name the same record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub(crate) cell: CellIndex,
    pub(crate) direction: HexDirection,
}

impl EdgeKey {
    /// Build the canonical key for the edge from `a` toward `b`.
    pub(crate) fn new(a: CellIndex, direction: HexDirection, b: CellIndex) -> Self {
        if b < a {
            Self {
                cell: b,
                direction: direction.opposite(),
            }
        } else {
            Self {
                cell: a,
                direction,
            }
        }
    }
}

/// State carried by one edge. An edge with no state is absent from the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct EdgeState {
    /// Road through this edge.
    pub road: bool,
    /// River through this edge, flowing away from the recorded source cell.
    pub river_source: Option<CellIndex>,
}

impl EdgeState {
    pub fn is_empty(self) -> bool {
        !self.road && self.river_source.is_none()
    }
}

/// Shape of the boundary between two cells, from their elevation difference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HexEdgeType {
    Flat,
    Slope,
    Cliff,
}

impl HexEdgeType {
    /// Classify the edge between two elevations: equal is flat, one step
    /// is a slope, anything more is a cliff.
    pub fn classify(elevation1: i32, elevation2: i32) -> Self {
        match (elevation1 - elevation2).abs() {
            0 => HexEdgeType::Flat,
            1 => HexEdgeType::Slope,
            _ => HexEdgeType::Cliff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_is_symmetric() {
        let a = CellIndex(3);
        let b = CellIndex(9);
        let from_a = EdgeKey::new(a, HexDirection::E, b);
        let from_b = EdgeKey::new(b, HexDirection::W, a);
        assert_eq!(from_a, from_b);
        assert_eq!(from_a.cell, a);
    }

    #[test]
    fn test_empty_state_has_nothing() {
        assert!(EdgeState::default().is_empty());
        let road = EdgeState {
            road: true,
            river_source: None,
        };
        assert!(!road.is_empty());
        let river = EdgeState {
            road: false,
            river_source: Some(CellIndex(0)),
        };
        assert!(!river.is_empty());
    }

    #[test]
    fn test_edge_classification() {
        assert_eq!(HexEdgeType::classify(2, 2), HexEdgeType::Flat);
        assert_eq!(HexEdgeType::classify(2, 3), HexEdgeType::Slope);
        assert_eq!(HexEdgeType::classify(3, 2), HexEdgeType::Slope);
        assert_eq!(HexEdgeType::classify(0, 2), HexEdgeType::Cliff);
        assert_eq!(HexEdgeType::classify(5, 1), HexEdgeType::Cliff);
    }
}
