//! Random terrain generation and the immutable tile grid it produces.

use foundry_core::{CellCoord, Tile};
use rand::Rng;

/// Dense row-major grid of terrain tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainGrid {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

impl TerrainGrid {
    /// Creates a grid where every tile is traversable.
    #[must_use]
    pub fn flat(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            tiles: vec![Tile::Traversable; columns as usize * rows as usize],
        }
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Tile at the provided cell, or `None` when the cell lies outside the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        self.index(cell).map(|index| self.tiles[index])
    }

    /// Reports whether the cell is inside the grid and obstructed.
    #[must_use]
    pub fn is_obstructed(&self, cell: CellCoord) -> bool {
        self.tile(cell).is_some_and(Tile::is_obstructed)
    }

    /// Iterates over every cell together with its tile, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
        let columns = self.columns.max(1) as usize;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let cell = CellCoord::new((index % columns) as i32, (index / columns) as i32);
            (cell, *tile)
        })
    }

    /// Number of obstructed tiles in the grid.
    #[must_use]
    pub fn obstructed_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_obstructed()).count()
    }

    /// Returns the grid with the provided cell forced to traversable ground.
    #[must_use]
    pub(crate) fn with_cleared(mut self, cell: CellCoord) -> Self {
        if let Some(index) = self.index(cell) {
            self.tiles[index] = Tile::Traversable;
        }
        self
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        let column = u32::try_from(cell.column()).ok()?;
        let row = u32::try_from(cell.row()).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(row as usize * self.columns as usize + column as usize)
    }
}

/// Generates a grid where each tile is independently obstructed with the given probability.
///
/// A probability of `0.0` yields flat traversable terrain and `1.0` obstructs every tile.
/// Values outside that range are clamped.
pub fn generate<R: Rng + ?Sized>(
    columns: u32,
    rows: u32,
    obstruction_probability: f64,
    rng: &mut R,
) -> TerrainGrid {
    let probability = if obstruction_probability.is_nan() {
        0.0
    } else {
        obstruction_probability.clamp(0.0, 1.0)
    };

    let mut grid = TerrainGrid::flat(columns, rows);
    if probability <= 0.0 {
        return grid;
    }

    for tile in &mut grid.tiles {
        if rng.gen::<f64>() < probability {
            *tile = Tile::Obstructed;
        }
    }
    grid
}
