//! Set of grid cells claimed by the hub, resource nodes and structures.

use std::collections::HashSet;

use foundry_core::CellCoord;

/// Tracks which cells already hold something.
///
/// Only additions are supported; nothing ever releases a claimed cell.
#[derive(Clone, Debug, Default)]
pub struct OccupancySet {
    cells: HashSet<CellCoord>,
}

impl OccupancySet {
    /// Creates an empty occupancy set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether the cell has been claimed.
    #[must_use]
    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Claims the cell, returning `false` when it was already claimed.
    pub fn claim(&mut self, cell: CellCoord) -> bool {
        self.cells.insert(cell)
    }

    /// Number of claimed cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether no cell has been claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over the claimed cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claiming_twice_is_idempotent() {
        let mut occupancy = OccupancySet::new();
        let cell = CellCoord::new(3, 4);

        assert!(occupancy.claim(cell));
        assert!(!occupancy.claim(cell));
        assert!(occupancy.is_occupied(cell));
        assert_eq!(occupancy.len(), 1);
    }

    #[test]
    fn unclaimed_cells_report_free() {
        let mut occupancy = OccupancySet::new();
        let _ = occupancy.claim(CellCoord::new(0, 0));

        assert!(!occupancy.is_occupied(CellCoord::new(0, 1)));
        assert!(!occupancy.is_occupied(CellCoord::new(-1, 0)));
    }
}
