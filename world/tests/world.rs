use foundry_core::{
    catalog, BuildableId, CellCoord, Command, Event, PlacementError, PlacementPolicy,
    SpawnSettings, Tile, WorldLayout, WorldSettings,
};
use foundry_world::{apply, query, World};

fn settings(obstruction_probability: f64, placement: PlacementPolicy, spawn: SpawnSettings) -> WorldSettings {
    WorldSettings {
        layout: WorldLayout::STANDARD,
        obstruction_probability,
        spawn,
        placement,
        seed: 0x5eed,
    }
}

fn configured(settings: WorldSettings) -> (World, Vec<Event>) {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(&mut world, Command::ConfigureWorld { settings }, &mut events);
    (world, events)
}

fn no_nodes() -> SpawnSettings {
    SpawnSettings {
        count_per_tier: 0,
        ..SpawnSettings::default()
    }
}

fn place(world: &mut World, item: BuildableId, cell: CellCoord) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, Command::PlaceStructure { item, cell }, &mut events);
    events
}

#[test]
fn standard_world_is_fifty_by_fifty_with_central_hub() {
    let (world, events) = configured(settings(0.0, PlacementPolicy::default(), SpawnSettings::default()));

    let terrain = query::terrain(&world);
    assert_eq!(terrain.columns(), 50);
    assert_eq!(terrain.rows(), 50);
    assert_eq!(query::hub(&world), Some(CellCoord::new(25, 25)));
    assert!(query::is_cell_occupied(&world, CellCoord::new(25, 25)));
    assert_eq!(events[0], Event::WorldConfigured { columns: 50, rows: 50 });
    assert_eq!(events[1], Event::HubPlaced { cell: CellCoord::new(25, 25) });
}

#[test]
fn flat_world_receives_full_resource_quota() {
    let (world, events) = configured(settings(0.0, PlacementPolicy::default(), SpawnSettings::default()));

    let nodes = query::resource_nodes(&world);
    assert_eq!(nodes.len(), 30);
    assert!(nodes.iter().all(|node| node.cell() != CellCoord::new(25, 25)));
    assert!(nodes.iter().all(|node| node.config().visual_key == "node1"));
    assert_eq!(query::occupancy(&world).len(), 31);

    let spawned = events
        .iter()
        .filter(|event| matches!(event, Event::ResourceNodeSpawned { .. }))
        .count();
    assert_eq!(spawned, 30);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::SpawnQuotaShortfall { .. })));
}

#[test]
fn rough_world_never_spawns_nodes_on_obstructed_tiles() {
    let (world, _) = configured(settings(0.4, PlacementPolicy::default(), SpawnSettings::default()));

    let terrain = query::terrain(&world);
    assert!(terrain.obstructed_count() > 0);
    for node in query::resource_nodes(&world) {
        assert_eq!(terrain.tile(node.cell()), Some(Tile::Traversable));
    }
}

#[test]
fn configuration_is_reproducible_for_a_seed() {
    let (first, _) = configured(settings(0.25, PlacementPolicy::default(), SpawnSettings::default()));
    let (second, _) = configured(settings(0.25, PlacementPolicy::default(), SpawnSettings::default()));

    assert_eq!(query::terrain(&first), query::terrain(&second));
    assert_eq!(query::resource_nodes(&first), query::resource_nodes(&second));
}

#[test]
fn miner_is_committed_on_free_cell() {
    let (mut world, _) = configured(settings(0.0, PlacementPolicy::default(), no_nodes()));
    let cell = CellCoord::new(2, 2);

    let events = place(&mut world, catalog::MINER, cell);

    assert!(matches!(
        events.as_slice(),
        [Event::StructurePlaced { item, cell: placed, .. }] if *item == catalog::MINER && *placed == cell
    ));
    let structure = query::structures(&world).next().expect("structure stored");
    assert_eq!(structure.position, glam::Vec2::new(160.0, 160.0));
    assert!(query::is_cell_occupied(&world, cell));
}

#[test]
fn terrain_aware_policy_rejects_invalid_cells() {
    let (mut world, _) = configured(settings(0.0, PlacementPolicy::default(), no_nodes()));

    let hub = place(&mut world, catalog::MINER, CellCoord::new(25, 25));
    let outside = place(&mut world, catalog::MINER, CellCoord::new(50, 3));
    let negative = place(&mut world, catalog::MINER, CellCoord::new(-1, 3));

    for (events, expected) in [
        (hub, PlacementError::Occupied),
        (outside, PlacementError::OutOfBounds),
        (negative, PlacementError::OutOfBounds),
    ] {
        assert!(matches!(
            events.as_slice(),
            [Event::PlacementRejected { reason, .. }] if *reason == expected
        ));
    }
    assert_eq!(query::structure_count(&world), 0);
}

#[test]
fn obstructed_cells_reject_placement() {
    let (mut world, _) = configured(settings(1.0, PlacementPolicy::default(), no_nodes()));

    let events = place(&mut world, catalog::MINER, CellCoord::new(0, 0));

    assert!(matches!(
        events.as_slice(),
        [Event::PlacementRejected {
            reason: PlacementError::Obstructed,
            ..
        }]
    ));
}

#[test]
fn second_placement_on_same_cell_is_occupied() {
    let (mut world, _) = configured(settings(0.0, PlacementPolicy::default(), no_nodes()));
    let cell = CellCoord::new(7, 9);

    let _ = place(&mut world, catalog::MINER, cell);
    let events = place(&mut world, catalog::MINER, cell);

    assert!(matches!(
        events.as_slice(),
        [Event::PlacementRejected {
            reason: PlacementError::Occupied,
            ..
        }]
    ));
}

#[test]
fn unchecked_policy_accepts_any_cell() {
    let (mut world, _) = configured(settings(1.0, PlacementPolicy::Unchecked, no_nodes()));

    let hub = place(&mut world, catalog::MINER, CellCoord::new(25, 25));
    let water = place(&mut world, catalog::MINER, CellCoord::new(0, 0));

    assert!(matches!(hub.as_slice(), [Event::StructurePlaced { .. }]));
    assert!(matches!(water.as_slice(), [Event::StructurePlaced { .. }]));
    assert_eq!(query::occupancy(&world).len(), 1);
}

#[test]
fn unclaimed_structures_may_stack() {
    let policy = PlacementPolicy::TerrainAware {
        claim_occupancy: false,
    };
    let (mut world, _) = configured(settings(0.0, policy, no_nodes()));
    let cell = CellCoord::new(3, 3);

    let _ = place(&mut world, catalog::MINER, cell);
    let _ = place(&mut world, catalog::MINER, cell);

    assert_eq!(query::structures_at(&world, cell).count(), 2);
    assert!(!query::is_cell_occupied(&world, cell));
}

#[test]
fn deferred_and_unknown_items_are_unsupported() {
    let (mut world, _) = configured(settings(0.0, PlacementPolicy::Unchecked, no_nodes()));

    let belt = place(&mut world, BuildableId::new("belt_t1"), CellCoord::new(1, 1));
    let unknown = place(&mut world, BuildableId::new("teleporter"), CellCoord::new(1, 1));

    for events in [belt, unknown] {
        assert!(matches!(
            events.as_slice(),
            [Event::PlacementRejected {
                reason: PlacementError::Unsupported,
                ..
            }]
        ));
    }
    assert_eq!(query::structure_count(&world), 0);
}

#[test]
fn reconfiguring_discards_previous_state() {
    let (mut world, _) = configured(settings(0.0, PlacementPolicy::default(), SpawnSettings::default()));
    let _ = place(&mut world, catalog::MINER, CellCoord::new(0, 0));

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ConfigureWorld {
            settings: settings(0.0, PlacementPolicy::default(), no_nodes()),
        },
        &mut events,
    );

    assert_eq!(query::structure_count(&world), 0);
    assert!(query::resource_nodes(&world).is_empty());
    assert_eq!(query::occupancy(&world).len(), 1);
}
