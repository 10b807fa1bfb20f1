//! Tile map for the tank combat simulation.
//!
//! Holds the static tile grid, derives obstacle rectangles from it, and
//! answers walkability and collision queries. Also reads and writes the
//! `o`/`x` map text format.

pub mod grid;
pub mod mapfile;
pub mod presets;

pub use grid::{GameMap, ObstacleQuery, WalkProbe};
pub use tankcombat_core as core;
