//! Registry of structures committed through build placement.

use std::collections::BTreeMap;

use foundry_core::{BuildableId, CellCoord, StructureId};
use glam::Vec2;

/// Structure committed to the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedStructure {
    /// Identifier allocated by the world.
    pub id: StructureId,
    /// Catalog item that was built.
    pub item: BuildableId,
    /// Cell the structure was placed on.
    pub cell: CellCoord,
    /// Snapped world position of the structure.
    pub position: Vec2,
}

/// Stores structures and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct StructureRegistry {
    entries: BTreeMap<StructureId, PlacedStructure>,
    next_id: StructureId,
}

impl StructureRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: StructureId::new(0),
        }
    }

    pub(crate) fn insert(&mut self, item: BuildableId, cell: CellCoord, position: Vec2) -> StructureId {
        let id = self.next_id;
        self.next_id = StructureId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            PlacedStructure {
                id,
                item,
                cell,
                position,
            },
        );
        id
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &PlacedStructure> {
        self.entries.values()
    }

    pub(crate) fn at(&self, cell: CellCoord) -> impl Iterator<Item = &PlacedStructure> {
        self.entries.values().filter(move |entry| entry.cell == cell)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
