//! Hex Metrics
//!
//! Shared geometry constants for the hex grid and the world-space placement
//! of cells. Downstream mesh generation consumes these; the core only needs
//! them for picking (world point -> cell) and surface heights.

use glam::Vec3;

/// Distance from a cell center to any corner.
pub const OUTER_RADIUS: f32 = 10.0;

/// Distance from a cell center to the middle of any edge (outer * sqrt(3)/2).
pub const INNER_RADIUS: f32 = OUTER_RADIUS * 0.866_025_4;

/// World-space height of one elevation level.
pub const ELEVATION_STEP: f32 = 3.0;

/// Vertical offset of a river bed below its cell's surface, in elevation steps.
pub const STREAM_BED_ELEVATION_OFFSET: f32 = -1.75;

/// Vertical offset of river and water surfaces, in elevation steps.
pub const WATER_ELEVATION_OFFSET: f32 = -0.5;

/// World-space center of the cell at offset (column, row) with `elevation`.
///
/// Rows are staggered: odd rows shift half a cell along X, rows advance
/// 1.5 outer radii along Z.
pub fn cell_center(column: i32, row: i32, elevation: i32) -> Vec3 {
    Vec3::new(
        (column as f32 + (row & 1) as f32 * 0.5) * (INNER_RADIUS * 2.0),
        elevation as f32 * ELEVATION_STEP,
        row as f32 * (OUTER_RADIUS * 1.5),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_radius_ratio() {
        assert!((INNER_RADIUS / OUTER_RADIUS - 3.0_f32.sqrt() / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_cell_center_stagger() {
        let even = cell_center(0, 0, 0);
        let odd = cell_center(0, 1, 0);
        assert_eq!(even, Vec3::ZERO);
        // Odd row shifts half a cell right and advances 1.5 outer radii.
        assert!((odd.x - INNER_RADIUS).abs() < 1e-4);
        assert!((odd.z - OUTER_RADIUS * 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_cell_center_elevation() {
        let raised = cell_center(2, 2, 3);
        assert!((raised.y - 3.0 * ELEVATION_STEP).abs() < 1e-4);
    }
}
