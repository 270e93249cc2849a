#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for Foundry.
//!
//! The world owns the terrain grid, the occupancy set, the hub, spawned
//! resource nodes and committed structures. It is mutated exclusively through
//! [`apply`] and inspected through the [`query`] module.

pub mod occupancy;
pub mod spawner;
mod structures;
pub mod terrain;

use std::time::Duration;

use foundry_core::{
    catalog, BuildableId, CellCoord, Command, Event, PlacementError, PlacementPolicy,
    PlacementRule, WorldLayout, WorldSettings,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::{
    occupancy::OccupancySet,
    spawner::PlacedResourceNode,
    structures::StructureRegistry,
    terrain::TerrainGrid,
};

pub use structures::PlacedStructure;

/// Represents the authoritative Foundry world state.
#[derive(Debug)]
pub struct World {
    layout: WorldLayout,
    terrain: TerrainGrid,
    occupancy: OccupancySet,
    hub: Option<CellCoord>,
    resource_nodes: Vec<PlacedResourceNode>,
    structures: StructureRegistry,
    placement: PlacementPolicy,
    tick_index: u64,
    elapsed: Duration,
}

impl World {
    /// Creates an unconfigured world with flat standard-sized terrain and nothing placed.
    #[must_use]
    pub fn new() -> Self {
        let layout = WorldLayout::STANDARD;
        Self {
            layout,
            terrain: TerrainGrid::flat(layout.columns(), layout.rows()),
            occupancy: OccupancySet::new(),
            hub: None,
            resource_nodes: Vec::new(),
            structures: StructureRegistry::new(),
            placement: PlacementPolicy::default(),
            tick_index: 0,
            elapsed: Duration::ZERO,
        }
    }

    fn configure(&mut self, settings: WorldSettings, out_events: &mut Vec<Event>) {
        let layout = settings.layout;
        let hub = layout.center_cell();
        let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);

        self.terrain = terrain::generate(
            layout.columns(),
            layout.rows(),
            settings.obstruction_probability,
            &mut rng,
        )
        .with_cleared(hub);
        self.layout = layout;
        self.placement = settings.placement;
        self.occupancy = OccupancySet::new();
        self.structures = StructureRegistry::new();
        self.tick_index = 0;
        self.elapsed = Duration::ZERO;

        info!(
            columns = layout.columns(),
            rows = layout.rows(),
            obstructed = self.terrain.obstructed_count(),
            seed = settings.seed,
            "generated terrain"
        );
        out_events.push(Event::WorldConfigured {
            columns: layout.columns(),
            rows: layout.rows(),
        });

        let _ = self.occupancy.claim(hub);
        self.hub = Some(hub);
        debug!(%hub, "hub placed at world centre");
        out_events.push(Event::HubPlaced { cell: hub });

        let report = spawner::spawn(
            &self.terrain,
            &mut self.occupancy,
            catalog::RESOURCES,
            &settings.spawn,
            layout.mapper(),
            &mut rng,
        );
        let (nodes, shortfalls) = report.into_parts();
        for node in &nodes {
            out_events.push(Event::ResourceNodeSpawned {
                resource: node.resource(),
                cell: node.cell(),
            });
        }
        for shortfall in shortfalls {
            out_events.push(Event::SpawnQuotaShortfall {
                resource: shortfall.resource,
                placed: shortfall.placed,
                requested: shortfall.requested,
            });
        }
        info!(nodes = nodes.len(), "resource nodes spawned");
        self.resource_nodes = nodes;
    }

    fn validate_placement(&self, item: BuildableId, cell: CellCoord) -> Result<(), PlacementError> {
        let config = catalog::buildable(item.as_str()).ok_or(PlacementError::Unsupported)?;
        if config.rule == PlacementRule::Deferred {
            return Err(PlacementError::Unsupported);
        }

        match self.placement {
            PlacementPolicy::Unchecked => Ok(()),
            PlacementPolicy::TerrainAware { .. } => {
                if !self.layout.contains(cell) {
                    return Err(PlacementError::OutOfBounds);
                }
                if self.terrain.is_obstructed(cell) {
                    return Err(PlacementError::Obstructed);
                }
                if self.occupancy.is_occupied(cell) {
                    return Err(PlacementError::Occupied);
                }
                Ok(())
            }
        }
    }

    fn place_structure(&mut self, item: BuildableId, cell: CellCoord, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.validate_placement(item, cell) {
            match reason {
                PlacementError::Unsupported => {
                    info!(%item, "placement logic for item not implemented yet");
                }
                _ => debug!(%item, %cell, %reason, "placement rejected"),
            }
            out_events.push(Event::PlacementRejected { item, cell, reason });
            return;
        }

        let position = self.layout.mapper().to_world_center(cell);
        let structure = self.structures.insert(item, cell, position);
        if let PlacementPolicy::TerrainAware {
            claim_occupancy: true,
        } = self.placement
        {
            let _ = self.occupancy.claim(cell);
        }

        info!(%item, %cell, x = position.x, y = position.y, "structure placed");
        out_events.push(Event::StructurePlaced {
            structure,
            item,
            cell,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureWorld { settings } => world.configure(settings, out_events),
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.elapsed = world.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::PlaceStructure { item, cell } => world.place_structure(item, cell, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use foundry_core::{CellCoord, PlacementPolicy, WorldLayout};

    use super::{OccupancySet, PlacedResourceNode, PlacedStructure, TerrainGrid, World};

    /// Validated world rectangle and tile size.
    #[must_use]
    pub fn layout(world: &World) -> WorldLayout {
        world.layout
    }

    /// Provides read-only access to the generated terrain.
    #[must_use]
    pub fn terrain(world: &World) -> &TerrainGrid {
        &world.terrain
    }

    /// Provides read-only access to the claimed cells.
    #[must_use]
    pub fn occupancy(world: &World) -> &OccupancySet {
        &world.occupancy
    }

    /// Reports whether the cell has been claimed.
    #[must_use]
    pub fn is_cell_occupied(world: &World, cell: CellCoord) -> bool {
        world.occupancy.is_occupied(cell)
    }

    /// Cell reserved by the hub, once the world has been configured.
    #[must_use]
    pub fn hub(world: &World) -> Option<CellCoord> {
        world.hub
    }

    /// Resource nodes spawned during configuration.
    #[must_use]
    pub fn resource_nodes(world: &World) -> &[PlacedResourceNode] {
        &world.resource_nodes
    }

    /// Iterates over committed structures ordered by identifier.
    pub fn structures(world: &World) -> impl Iterator<Item = &PlacedStructure> {
        world.structures.iter()
    }

    /// Iterates over structures committed at the provided cell.
    pub fn structures_at(world: &World, cell: CellCoord) -> impl Iterator<Item = &PlacedStructure> {
        world.structures.at(cell)
    }

    /// Number of committed structures.
    #[must_use]
    pub fn structure_count(world: &World) -> usize {
        world.structures.len()
    }

    /// Rules currently applied to structure placement.
    #[must_use]
    pub fn placement_policy(world: &World) -> PlacementPolicy {
        world.placement
    }

    /// Number of ticks processed since configuration.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Simulated time accumulated since configuration.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_core::SpawnSettings;

    fn settings(obstruction_probability: f64, seed: u64) -> WorldSettings {
        WorldSettings {
            layout: WorldLayout::STANDARD,
            obstruction_probability,
            spawn: SpawnSettings::default(),
            placement: PlacementPolicy::default(),
            seed,
        }
    }

    #[test]
    fn new_world_is_unconfigured() {
        let world = World::new();

        assert!(query::hub(&world).is_none());
        assert!(query::resource_nodes(&world).is_empty());
        assert!(query::occupancy(&world).is_empty());
    }

    #[test]
    fn hub_cell_is_never_obstructed() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureWorld {
                settings: settings(1.0, 4),
            },
            &mut events,
        );

        let hub = query::hub(&world).expect("hub placed");
        assert!(!query::terrain(&world).is_obstructed(hub));
        assert!(query::resource_nodes(&world).is_empty());
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::SpawnQuotaShortfall { placed: 0, .. })));
    }

    #[test]
    fn tick_accumulates_elapsed_time() {
        let mut world = World::new();
        let mut events = Vec::new();
        let dt = Duration::from_millis(16);

        apply(&mut world, Command::Tick { dt }, &mut events);
        apply(&mut world, Command::Tick { dt }, &mut events);

        assert_eq!(query::tick_index(&world), 2);
        assert_eq!(query::elapsed(&world), Duration::from_millis(32));
        assert_eq!(events, vec![Event::TimeAdvanced { dt }, Event::TimeAdvanced { dt }]);
    }
}
