//! Built-in maps.

use tankcombat_core::enums::CellKind;

use crate::grid::GameMap;

/// Small arena with a few wall segments.
pub fn test_map(tile_size: u32) -> GameMap {
    const ROWS: [&str; 6] = [
        "oooxxxooo",
        "ooooooooo",
        "oooxxxxxx",
        "ooooooooo",
        "xxxxxxooo",
        "ooooooooo",
    ];
    let cells = ROWS
        .iter()
        .flat_map(|row| row.chars().map(|c| CellKind::from_symbol(c).unwrap_or_default()))
        .collect();
    GameMap::from_cells(cells, ROWS[0].len(), ROWS.len(), tile_size)
}

/// All-open map.
pub fn empty_map(width: usize, height: usize, tile_size: u32) -> GameMap {
    GameMap::from_cells(vec![CellKind::Open; width * height], width, height, tile_size)
}

/// Open map enclosed by a one-tile obstacle border.
pub fn border_map(width: usize, height: usize, tile_size: u32) -> GameMap {
    let cells = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if y == 0 || y + 1 == height || x == 0 || x + 1 == width {
                    CellKind::Obstacle
                } else {
                    CellKind::Open
                }
            })
        })
        .collect();
    GameMap::from_cells(cells, width, height, tile_size)
}
