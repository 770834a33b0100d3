//! Map Tool
//!
//! Command-line utility for working with `.hexmap` files: create blank
//! maps, inspect saved ones, and apply scripted brush strokes.
//!
//! An edit script is a JSON file of strokes, each pairing a brush preset
//! with a path of axial coordinates:
//!
//! ```json
//! {
//!   "strokes": [
//!     {
//!       "brush": { "elevation": 2, "brush_size": 1 },
//!       "path": [[3, 2], [4, 2], [5, 2]]
//!     },
//!     {
//!       "brush": { "river_mode": "Yes" },
//!       "path": [[5, 4], [4, 4], [3, 4]]
//!     }
//!   ]
//! }
//! ```

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Deserialize;

use hexmap_engine::editor::{BrushPreset, MapEditor};
use hexmap_engine::hex::{HexCoordinates, HexGrid};
use hexmap_engine::map_file;

#[derive(Parser, Debug)]
#[command(name = "map_tool")]
#[command(about = "Create, edit, and inspect hexmap files")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a blank map and save it
    New {
        path: PathBuf,
        /// Map width in cells
        #[arg(long, default_value_t = map_file::LEGACY_MAP_WIDTH)]
        width: u32,
        /// Map height in cells
        #[arg(long, default_value_t = map_file::LEGACY_MAP_HEIGHT)]
        height: u32,
        /// Uniform starting elevation
        #[arg(long, default_value_t = 0)]
        elevation: i32,
        /// Uniform starting terrain type index
        #[arg(long, default_value_t = 0)]
        terrain: u8,
    },
    /// Print a summary of a saved map
    Info { path: PathBuf },
    /// Apply a JSON edit script to a map
    Apply {
        map: PathBuf,
        script: PathBuf,
        /// Write the result here instead of back to the input map
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// One scripted brush stroke: configure the brush, then drag it along a
/// path of axial (x, z) coordinates.
#[derive(Debug, Deserialize)]
struct Stroke {
    brush: BrushPreset,
    path: Vec<[i32; 2]>,
}

#[derive(Debug, Deserialize)]
struct EditScript {
    strokes: Vec<Stroke>,
}

fn cmd_new(path: &Path, width: u32, height: u32, elevation: i32, terrain: u8) -> Result<(), Box<dyn Error>> {
    let mut grid = HexGrid::new(width, height);
    for cell in grid.indices().collect::<Vec<_>>() {
        grid.set_elevation(cell, elevation);
        grid.set_terrain_type(cell, terrain);
    }
    map_file::save_map(path, &grid)?;
    println!("wrote {}x{} map to {}", width, height, path.display());
    Ok(())
}

fn cmd_info(path: &Path) -> Result<(), Box<dyn Error>> {
    let grid = map_file::load_map(path)?;

    let mut river_cells = 0;
    let mut road_cells = 0;
    let mut underwater = 0;
    let mut special = 0;
    let mut walled = 0;
    let mut min_elevation = i32::MAX;
    let mut max_elevation = i32::MIN;
    for index in grid.indices() {
        let cell = grid.cell(index);
        min_elevation = min_elevation.min(cell.elevation());
        max_elevation = max_elevation.max(cell.elevation());
        if grid.has_river(index) {
            river_cells += 1;
        }
        if grid.has_roads(index) {
            road_cells += 1;
        }
        if cell.is_underwater() {
            underwater += 1;
        }
        if cell.is_special() {
            special += 1;
        }
        if cell.walled() {
            walled += 1;
        }
    }

    println!("{}", path.display());
    println!("  size:       {}x{}", grid.width(), grid.height());
    println!("  elevation:  {min_elevation}..{max_elevation}");
    println!("  rivers:     {river_cells} cells");
    println!("  roads:      {road_cells} cells");
    println!("  underwater: {underwater} cells");
    println!("  special:    {special} cells");
    println!("  walled:     {walled} cells");
    Ok(())
}

fn cmd_apply(map: &Path, script: &Path, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let mut grid = map_file::load_map(map)?;
    let script_text = std::fs::read_to_string(script)?;
    let script: EditScript = serde_json::from_str(&script_text)?;

    let mut editor = MapEditor::new();
    // A fresh editor applies elevation by default; scripts opt in per field.
    editor.apply_elevation = false;

    for stroke in &script.strokes {
        editor.apply_preset(&stroke.brush);
        for &[x, z] in &stroke.path {
            editor.paint(&mut grid, HexCoordinates::new(x, z));
        }
        editor.end_stroke();
    }

    let target = output.unwrap_or(map);
    map_file::save_map(target, &grid)?;
    println!(
        "applied {} strokes, wrote {}",
        script.strokes.len(),
        target.display()
    );
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command {
        Command::New {
            path,
            width,
            height,
            elevation,
            terrain,
        } => cmd_new(&path, width, height, elevation, terrain),
        Command::Info { path } => cmd_info(&path),
        Command::Apply {
            map,
            script,
            output,
        } => cmd_apply(&map, &script, output.as_deref()),
    }
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("map_tool: {e}");
        std::process::exit(1);
    }
}
