//! Map File Save/Load (.hexmap)
//!
//! Binary file format for persisting a hex map to disk.
//! Layout: format version u32 | width u32 | height u32 | one 11-byte record
//! per cell, row-major. All integers are little-endian.
//!
//! River directions are encoded with a high-bit sentinel (0 = no river,
//! 128 + direction index = river present); roads are a six-bit mask. Both
//! sides of every symmetric edge are written so the stream matches the
//! format of the editor this was ported from; on load the outgoing-river
//! byte is authoritative and road bits are merged from both sides.
//!
//! Version 0 streams predate resizable maps and carry no dimensions; they
//! load at the legacy 20x15 size.

use std::path::Path;

use bytemuck::{Pod, Zeroable};

use crate::hex::cell::CellIndex;
use crate::hex::coords::HexDirection;
use crate::hex::grid::HexGrid;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Current file format version.
pub const MAP_FORMAT_VERSION: u32 = 1;

/// Dimensions of version-0 maps, which carry none in the stream.
pub const LEGACY_MAP_WIDTH: u32 = 20;
pub const LEGACY_MAP_HEIGHT: u32 = 15;

/// Sentinel bit marking a river direction byte as present.
const RIVER_PRESENT: u8 = 128;

const HEADER_SIZE: usize = 12;
const LEGACY_HEADER_SIZE: usize = 4;

// ============================================================================
// CELL RECORD
// ============================================================================

/// Fixed-size per-cell record. Total size: exactly 11 bytes.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct CellRecord {
    terrain_type_index: u8,
    elevation: u8,
    water_level: u8,
    urban_level: u8,
    farm_level: u8,
    plant_level: u8,
    special_index: u8,
    /// 0 or 1.
    walled: u8,
    /// 0 = none, 128 + direction index otherwise.
    incoming_river: u8,
    /// Same encoding as `incoming_river`.
    outgoing_river: u8,
    /// Bit i = road through direction i.
    roads: u8,
}

static_assertions::assert_eq_size!(CellRecord, [u8; 11]);

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur during map save/load.
#[derive(Debug)]
pub enum MapFileError {
    /// Stream ends before the header or the cell records do.
    FileTooShort,
    /// Format version is newer than this loader supports.
    UnsupportedVersion(u32),
    /// Width or height is zero or the cell count overflows.
    InvalidDimensions(u32, u32),
    /// A river direction byte is neither 0 nor 128..=133.
    InvalidRiverDirection(u8),
    /// Standard I/O error.
    Io(std::io::Error),
}

impl std::fmt::Display for MapFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapFileError::FileTooShort => write!(f, "file too short for map data"),
            MapFileError::UnsupportedVersion(v) => {
                write!(f, "unknown map format {v}")
            }
            MapFileError::InvalidDimensions(w, h) => {
                write!(f, "invalid map dimensions {w}x{h}")
            }
            MapFileError::InvalidRiverDirection(b) => {
                write!(f, "invalid river direction byte {b}")
            }
            MapFileError::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for MapFileError {}

impl From<std::io::Error> for MapFileError {
    fn from(e: std::io::Error) -> Self {
        MapFileError::Io(e)
    }
}

// ============================================================================
// ENCODE
// ============================================================================

fn river_byte(direction: Option<HexDirection>) -> u8 {
    match direction {
        Some(direction) => RIVER_PRESENT + direction as u8,
        None => 0,
    }
}

/// Serialize a grid to the current format version.
pub fn encode_map(grid: &HexGrid) -> Vec<u8> {
    let mut data =
        Vec::with_capacity(HEADER_SIZE + grid.cell_count() * std::mem::size_of::<CellRecord>());
    data.extend_from_slice(&MAP_FORMAT_VERSION.to_le_bytes());
    data.extend_from_slice(&grid.width().to_le_bytes());
    data.extend_from_slice(&grid.height().to_le_bytes());

    for index in grid.indices() {
        let cell = grid.cell(index);
        let mut roads = 0u8;
        for direction in HexDirection::ALL {
            if grid.has_road_through_edge(index, direction) {
                roads |= 1 << direction as u8;
            }
        }
        let record = CellRecord {
            terrain_type_index: cell.terrain_type_index(),
            elevation: cell.elevation() as u8,
            water_level: cell.water_level() as u8,
            urban_level: cell.urban_level(),
            farm_level: cell.farm_level(),
            plant_level: cell.plant_level(),
            special_index: cell.special_index(),
            walled: cell.walled() as u8,
            incoming_river: river_byte(grid.incoming_river(index)),
            outgoing_river: river_byte(grid.outgoing_river(index)),
            roads,
        };
        data.extend_from_slice(bytemuck::bytes_of(&record));
    }
    data
}

/// Write a grid to disk, creating parent directories as needed.
pub fn save_map(path: &Path, grid: &HexGrid) -> Result<(), MapFileError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, encode_map(grid))?;
    Ok(())
}

// ============================================================================
// DECODE
// ============================================================================

fn read_u32(data: &[u8], offset: usize) -> Result<u32, MapFileError> {
    let bytes = data
        .get(offset..offset + 4)
        .ok_or(MapFileError::FileTooShort)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn river_direction(byte: u8) -> Result<Option<HexDirection>, MapFileError> {
    if byte == 0 {
        return Ok(None);
    }
    let Some(direction) = byte
        .checked_sub(RIVER_PRESENT)
        .and_then(HexDirection::from_index)
    else {
        return Err(MapFileError::InvalidRiverDirection(byte));
    };
    Ok(Some(direction))
}

/// Reconstruct a grid from a serialized map stream.
pub fn decode_map(data: &[u8]) -> Result<HexGrid, MapFileError> {
    let version = read_u32(data, 0)?;
    if version > MAP_FORMAT_VERSION {
        return Err(MapFileError::UnsupportedVersion(version));
    }

    let (width, height, mut cursor) = if version >= 1 {
        (read_u32(data, 4)?, read_u32(data, 8)?, HEADER_SIZE)
    } else {
        (LEGACY_MAP_WIDTH, LEGACY_MAP_HEIGHT, LEGACY_HEADER_SIZE)
    };

    let cell_count = (width as usize)
        .checked_mul(height as usize)
        .filter(|&count| count > 0)
        .ok_or(MapFileError::InvalidDimensions(width, height))?;

    let record_size = std::mem::size_of::<CellRecord>();
    if data.len() < cursor + cell_count * record_size {
        return Err(MapFileError::FileTooShort);
    }

    let mut grid = HexGrid::new(width, height);
    let mut rivers = Vec::new();
    let mut roads = Vec::new();

    for raw in 0..cell_count as u32 {
        let index = CellIndex(raw);
        let record: CellRecord =
            bytemuck::pod_read_unaligned(&data[cursor..cursor + record_size]);
        cursor += record_size;

        let cell = grid.restore_cell(index);
        cell.terrain_type_index = record.terrain_type_index;
        cell.elevation = record.elevation as i32;
        cell.water_level = record.water_level as i32;
        cell.urban_level = record.urban_level;
        cell.farm_level = record.farm_level;
        cell.plant_level = record.plant_level;
        cell.special_index = record.special_index;
        cell.walled = record.walled != 0;

        // Validate both river bytes; only the outgoing side is applied,
        // the incoming side is its mirror.
        river_direction(record.incoming_river)?;
        if let Some(direction) = river_direction(record.outgoing_river)? {
            rivers.push((index, direction));
        }
        for direction in HexDirection::ALL {
            if record.roads & (1 << direction as u8) != 0 {
                roads.push((index, direction));
            }
        }
    }

    // Roads appear on both sides of each edge; the canonical key dedups.
    for (index, direction) in rivers {
        grid.restore_river(index, direction);
    }
    for (index, direction) in roads {
        grid.restore_road(index, direction);
    }

    Ok(grid)
}

/// Read a map from disk.
pub fn load_map(path: &Path) -> Result<HexGrid, MapFileError> {
    let data = std::fs::read(path)?;
    decode_map(&data)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::coords::HexCoordinates;

    fn make_test_grid() -> HexGrid {
        let mut grid = HexGrid::new(4, 3);
        let a = grid.cell_at(HexCoordinates::from_offset(1, 1)).unwrap();
        let b = grid.cell_at(HexCoordinates::from_offset(2, 1)).unwrap();
        grid.set_elevation(a, 2);
        grid.set_elevation(b, 1);
        grid.set_water_level(b, 1);
        grid.set_terrain_type(a, 3);
        grid.set_urban_level(a, 2);
        grid.set_farm_level(b, 1);
        grid.set_plant_level(b, 3);
        grid.set_walled(a, true);
        assert!(grid.set_outgoing_river(a, HexDirection::E));
        assert!(grid.add_road(b, HexDirection::NE));
        let c = grid.cell_at(HexCoordinates::from_offset(0, 0)).unwrap();
        grid.set_special_index(c, 2);
        grid
    }

    #[test]
    fn test_record_size() {
        assert_eq!(std::mem::size_of::<CellRecord>(), 11);
    }

    #[test]
    fn test_round_trip_in_memory() {
        let grid = make_test_grid();
        let loaded = decode_map(&encode_map(&grid)).unwrap();

        assert_eq!(loaded.width(), grid.width());
        assert_eq!(loaded.height(), grid.height());
        for index in grid.indices() {
            let before = grid.cell(index);
            let after = loaded.cell(index);
            assert_eq!(after.elevation(), before.elevation());
            assert_eq!(after.water_level(), before.water_level());
            assert_eq!(after.terrain_type_index(), before.terrain_type_index());
            assert_eq!(after.urban_level(), before.urban_level());
            assert_eq!(after.farm_level(), before.farm_level());
            assert_eq!(after.plant_level(), before.plant_level());
            assert_eq!(after.special_index(), before.special_index());
            assert_eq!(after.walled(), before.walled());
            assert_eq!(loaded.incoming_river(index), grid.incoming_river(index));
            assert_eq!(loaded.outgoing_river(index), grid.outgoing_river(index));
            for direction in HexDirection::ALL {
                assert_eq!(
                    loaded.has_road_through_edge(index, direction),
                    grid.has_road_through_edge(index, direction)
                );
            }
        }
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = std::env::temp_dir().join("hexmap_test_round_trip");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test.hexmap");

        let grid = make_test_grid();
        save_map(&path, &grid).unwrap();
        let loaded = load_map(&path).unwrap();
        assert_eq!(encode_map(&loaded), encode_map(&grid));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unsupported_version() {
        let mut data = encode_map(&HexGrid::new(2, 2));
        data[0..4].copy_from_slice(&2u32.to_le_bytes());
        match decode_map(&data) {
            Err(MapFileError::UnsupportedVersion(2)) => {}
            other => panic!("expected UnsupportedVersion(2), got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_version_zero() {
        // Version 0 carries no dimensions; cells follow the version word.
        let mut data = 0u32.to_le_bytes().to_vec();
        let cell_count = (LEGACY_MAP_WIDTH * LEGACY_MAP_HEIGHT) as usize;
        data.extend(std::iter::repeat(0u8).take(cell_count * 11));
        let grid = decode_map(&data).unwrap();
        assert_eq!(grid.width(), LEGACY_MAP_WIDTH);
        assert_eq!(grid.height(), LEGACY_MAP_HEIGHT);
    }

    #[test]
    fn test_truncated_stream() {
        let mut data = encode_map(&make_test_grid());
        data.truncate(data.len() - 5);
        match decode_map(&data) {
            Err(MapFileError::FileTooShort) => {}
            other => panic!("expected FileTooShort, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let mut data = Vec::new();
        data.extend_from_slice(&MAP_FORMAT_VERSION.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&4u32.to_le_bytes());
        match decode_map(&data) {
            Err(MapFileError::InvalidDimensions(0, 4)) => {}
            other => panic!("expected InvalidDimensions, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_river_byte() {
        let mut data = encode_map(&HexGrid::new(2, 2));
        // Corrupt the first cell's outgoing river byte: 1..128 is invalid.
        data[HEADER_SIZE + 9] = 7;
        match decode_map(&data) {
            Err(MapFileError::InvalidRiverDirection(7)) => {}
            other => panic!("expected InvalidRiverDirection(7), got {other:?}"),
        }
        // Direction index past NW is invalid too.
        let mut data = encode_map(&HexGrid::new(2, 2));
        data[HEADER_SIZE + 9] = 128 + 6;
        assert!(matches!(
            decode_map(&data),
            Err(MapFileError::InvalidRiverDirection(134))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("hexmap_test_missing/none.hexmap");
        assert!(matches!(load_map(&path), Err(MapFileError::Io(_))));
    }
}
