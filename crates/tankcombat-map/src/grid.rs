//! GameMap: immutable tile grid with a cached obstacle list.

use tracing::warn;

use tankcombat_core::enums::CellKind;
use tankcombat_core::error::MapError;
use tankcombat_core::types::{Rect, Vec2};

/// Collision queries against a set of obstacle rectangles.
///
/// The provided methods scan linearly. An implementor holding a spatial
/// index can override them without changing callers.
pub trait ObstacleQuery {
    fn obstacles(&self) -> &[Rect];

    /// True if `rect` overlaps any obstacle.
    fn check_collision(&self, rect: &Rect) -> bool {
        self.obstacles().iter().any(|o| rect.intersects(o))
    }

    /// Every obstacle overlapping `rect`, in list order.
    fn get_colliding_obstacles(&self, rect: &Rect) -> Vec<Rect> {
        self.obstacles()
            .iter()
            .filter(|o| rect.intersects(o))
            .copied()
            .collect()
    }
}

impl ObstacleQuery for [Rect] {
    fn obstacles(&self) -> &[Rect] {
        self
    }
}

impl ObstacleQuery for Vec<Rect> {
    fn obstacles(&self) -> &[Rect] {
        self
    }
}

/// What to test for walkability: a single point or an area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WalkProbe {
    Point(Vec2),
    Area(Rect),
}

impl From<Vec2> for WalkProbe {
    fn from(point: Vec2) -> Self {
        WalkProbe::Point(point)
    }
}

impl From<Rect> for WalkProbe {
    fn from(rect: Rect) -> Self {
        WalkProbe::Area(rect)
    }
}

/// Static tile grid. Never edited cell by cell once built; swap the whole
/// map to change terrain.
#[derive(Debug, Clone, PartialEq)]
pub struct GameMap {
    /// Row-major cells, `height` rows of `width` cells.
    tiles: Vec<CellKind>,
    width: usize,
    height: usize,
    tile_size: u32,
    /// One rectangle per obstacle cell, in row-major scan order.
    obstacles: Vec<Rect>,
}

impl GameMap {
    /// Build a map from text rows of `o` (open) and `x` (obstacle).
    ///
    /// Unknown symbols become open cells and short rows are padded with open
    /// cells to the widest row; both are logged as warnings. Only an empty
    /// grid is rejected.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], tile_size: u32) -> Result<Self, MapError> {
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let mut len = 0;
            for (x, symbol) in row.chars().enumerate() {
                let cell = CellKind::from_symbol(symbol).unwrap_or_else(|| {
                    warn!(x, y, %symbol, "unknown map tile, treating as open");
                    CellKind::Open
                });
                tiles.push(cell);
                len += 1;
            }
            if len != width {
                warn!(row = y, len, expected = width, "ragged map row, padding with open tiles");
                tiles.extend(std::iter::repeat(CellKind::Open).take(width - len));
            }
        }

        Ok(Self::from_cells(tiles, width, rows.len(), tile_size))
    }

    /// Build a map from an already validated cell grid.
    ///
    /// `tiles.len()` must equal `width * height`; missing cells are open.
    pub fn from_cells(mut tiles: Vec<CellKind>, width: usize, height: usize, tile_size: u32) -> Self {
        tiles.resize(width * height, CellKind::Open);
        let tile_size = tile_size.max(1);
        let obstacles = build_obstacles(&tiles, width, tile_size);
        Self {
            tiles,
            width,
            height,
            tile_size,
            obstacles,
        }
    }

    /// Grid width in tiles.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in tiles.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Map extent in world units.
    pub fn map_size(&self) -> Vec2 {
        let ts = self.tile_size as f64;
        Vec2::new(self.width as f64 * ts, self.height as f64 * ts)
    }

    /// Cell at integer tile coordinates.
    pub fn cell(&self, tile_x: usize, tile_y: usize) -> Option<CellKind> {
        if tile_x < self.width && tile_y < self.height {
            Some(self.tiles[tile_y * self.width + tile_x])
        } else {
            None
        }
    }

    /// Cell under a world position, or `None` outside the grid or for a
    /// non-finite coordinate.
    pub fn tile_at(&self, world_x: f64, world_y: f64) -> Option<CellKind> {
        let ts = self.tile_size as f64;
        let tx = (world_x / ts).floor();
        let ty = (world_y / ts).floor();
        if !tx.is_finite() || !ty.is_finite() || tx < 0.0 || ty < 0.0 {
            return None;
        }
        self.cell(tx as usize, ty as usize)
    }

    /// Walkability of a point (tile lookup, off-map is blocked) or an area
    /// (no obstacle overlap). An area with no extent is tested as a point.
    pub fn is_walkable(&self, probe: impl Into<WalkProbe>) -> bool {
        match probe.into() {
            WalkProbe::Point(p) => self.point_walkable(p),
            WalkProbe::Area(rect) if rect.is_empty() => self.point_walkable(Vec2::new(rect.x, rect.y)),
            WalkProbe::Area(rect) => !self.check_collision(&rect),
        }
    }

    /// Text rows in the `o`/`x` format.
    pub fn rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    fn point_walkable(&self, p: Vec2) -> bool {
        matches!(self.tile_at(p.x, p.y), Some(CellKind::Open))
    }
}

impl ObstacleQuery for GameMap {
    fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }
}

fn build_obstacles(tiles: &[CellKind], width: usize, tile_size: u32) -> Vec<Rect> {
    let ts = tile_size as f64;
    tiles
        .iter()
        .enumerate()
        .filter(|(_, cell)| **cell == CellKind::Obstacle)
        .map(|(i, _)| {
            let x = (i % width) as f64 * ts;
            let y = (i / width) as f64 * ts;
            Rect::new(x, y, ts, ts)
        })
        .collect()
}
