//! Static catalogs describing resources, belts and buildable items.
//!
//! The tables are `const` data: loaded once with the process and never mutated.

use std::fmt;

/// Catalog identifier of a resource node type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(&'static str);

impl ResourceId {
    /// Wraps a static identifier.
    #[must_use]
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// Underlying identifier string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Catalog identifier of an item the player may place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildableId(&'static str);

impl BuildableId {
    /// Wraps a static identifier.
    #[must_use]
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// Underlying identifier string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for BuildableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Static description of a resource node type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceNodeConfig {
    /// Catalog identifier.
    pub id: ResourceId,
    /// Human readable label.
    pub display_label: &'static str,
    /// Visual key used by the renderer.
    pub visual_key: &'static str,
    /// Progression tier, starting at 1.
    pub tier: u32,
}

/// Static description of a conveyor belt tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeltConfig {
    /// Buildable identifier of the belt.
    pub id: BuildableId,
    /// Visual key used by the renderer.
    pub visual_key: &'static str,
    /// Nominal transport speed in tiles per second.
    pub speed: f32,
    /// Progression tier, starting at 1.
    pub tier: u32,
}

/// Whether the world knows how to commit an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementRule {
    /// Occupies a single cell when committed.
    SingleCell,
    /// Selectable, but confirming it is rejected until placement logic exists.
    Deferred,
}

/// Static description of something the player may place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildableItemConfig {
    /// Catalog identifier.
    pub id: BuildableId,
    /// Visual key used by the renderer and the placement preview.
    pub visual_key: &'static str,
    /// Placement handling for the item.
    pub rule: PlacementRule,
}

/// Visual key of the central hub structure.
pub const HUB_VISUAL: &str = "hub";

/// Identifier of the miner, the only item with committed placement logic.
pub const MINER: BuildableId = BuildableId::new("buildMiner");

/// Resource node catalog.
pub const RESOURCES: &[ResourceNodeConfig] = &[ResourceNodeConfig {
    id: ResourceId::new("res1"),
    display_label: "Generic Node",
    visual_key: "node1",
    tier: 1,
}];

/// Conveyor belt catalog.
pub const BELTS: &[BeltConfig] = &[
    belt("belt_t1", "belt1", 1.0, 1),
    belt("belt_t2", "belt2", 2.0, 2),
    belt("belt_t3", "belt3", 3.0, 3),
    belt("belt_t4", "belt4", 4.0, 4),
    belt("belt_t5", "belt5", 5.0, 5),
];

/// Items offered by the build menu.
pub const BUILDABLES: &[BuildableItemConfig] = &[
    BuildableItemConfig {
        id: MINER,
        visual_key: "buildMiner",
        rule: PlacementRule::SingleCell,
    },
    deferred_belt(&BELTS[0]),
    deferred_belt(&BELTS[1]),
    deferred_belt(&BELTS[2]),
    deferred_belt(&BELTS[3]),
    deferred_belt(&BELTS[4]),
];

/// Resource names shown by the HUD counters.
pub const HUD_RESOURCES: &[&str] = &["Iron", "Copper", "Power"];

const fn belt(id: &'static str, visual_key: &'static str, speed: f32, tier: u32) -> BeltConfig {
    BeltConfig {
        id: BuildableId::new(id),
        visual_key,
        speed,
        tier,
    }
}

const fn deferred_belt(belt: &BeltConfig) -> BuildableItemConfig {
    BuildableItemConfig {
        id: belt.id,
        visual_key: belt.visual_key,
        rule: PlacementRule::Deferred,
    }
}

/// Looks up a buildable item by its identifier string.
#[must_use]
pub fn buildable(id: &str) -> Option<&'static BuildableItemConfig> {
    BUILDABLES.iter().find(|item| item.id.as_str() == id)
}

/// Looks up a resource node type by its identifier.
#[must_use]
pub fn resource(id: ResourceId) -> Option<&'static ResourceNodeConfig> {
    RESOURCES.iter().find(|config| config.id == id)
}

/// Every visual key a renderer must provide before the core activates.
pub fn required_visuals() -> impl Iterator<Item = &'static str> {
    ["grass", "water", HUB_VISUAL]
        .into_iter()
        .chain(RESOURCES.iter().map(|config| config.visual_key))
        .chain(BELTS.iter().map(|config| config.visual_key))
        .chain(BUILDABLES.iter().map(|config| config.visual_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buildable_lookup_finds_miner() {
        let miner = buildable("buildMiner").expect("miner is in the catalog");
        assert_eq!(miner.id, MINER);
        assert_eq!(miner.rule, PlacementRule::SingleCell);
        assert!(buildable("teleporter").is_none());
    }

    #[test]
    fn belts_are_buildable_but_deferred() {
        for config in BELTS {
            let item = buildable(config.id.as_str()).expect("belt listed in build menu");
            assert_eq!(item.rule, PlacementRule::Deferred);
            assert_eq!(item.visual_key, config.visual_key);
        }
    }

    #[test]
    fn belt_speed_tracks_tier() {
        assert_eq!(BELTS.len(), 5);
        for config in BELTS {
            assert!((config.speed - config.tier as f32).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn catalog_tiers_are_positive() {
        assert!(RESOURCES.iter().all(|config| config.tier >= 1));
        assert!(BELTS.iter().all(|config| config.tier >= 1));
    }

    #[test]
    fn required_visuals_cover_terrain_and_hub() {
        let visuals: Vec<_> = required_visuals().collect();
        for key in ["grass", "water", "hub", "node1", "belt3", "buildMiner"] {
            assert!(visuals.contains(&key), "missing {key}");
        }
    }
}
