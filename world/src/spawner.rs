//! Scatters resource nodes onto free traversable cells.

use foundry_core::{CellCoord, GridMapper, ResourceId, ResourceNodeConfig, SpawnSettings};
use glam::Vec2;
use rand::Rng;
use tracing::{debug, warn};

use crate::{occupancy::OccupancySet, terrain::TerrainGrid};

/// Resource node committed to the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedResourceNode {
    config: &'static ResourceNodeConfig,
    cell: CellCoord,
    position: Vec2,
}

impl PlacedResourceNode {
    /// Catalog entry describing the node.
    #[must_use]
    pub const fn config(&self) -> &'static ResourceNodeConfig {
        self.config
    }

    /// Catalog identifier of the node's resource.
    #[must_use]
    pub const fn resource(&self) -> ResourceId {
        self.config.id
    }

    /// Cell claimed by the node.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// World-space centre of the node's cell.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }
}

/// Catalog entry that ran out of attempts before meeting its quota.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnShortfall {
    /// Catalog identifier of the resource.
    pub resource: ResourceId,
    /// Nodes actually placed.
    pub placed: u32,
    /// Nodes requested.
    pub requested: u32,
}

/// Outcome of a spawn pass. Partial success is a normal result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnReport {
    nodes: Vec<PlacedResourceNode>,
    shortfalls: Vec<SpawnShortfall>,
}

impl SpawnReport {
    /// Nodes placed during the pass, in placement order.
    #[must_use]
    pub fn nodes(&self) -> &[PlacedResourceNode] {
        &self.nodes
    }

    /// Catalog entries that fell short of their quota.
    #[must_use]
    pub fn shortfalls(&self) -> &[SpawnShortfall] {
        &self.shortfalls
    }

    /// Reports whether every requested node was placed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.shortfalls.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<PlacedResourceNode>, Vec<SpawnShortfall>) {
        (self.nodes, self.shortfalls)
    }
}

/// Places up to `count_per_tier` nodes for every catalog entry whose tier is requested.
///
/// Each entry gets `count_per_tier * attempts_per_node` random draws. A draw landing on an
/// obstructed or already claimed cell is discarded. Placed nodes claim their cell.
pub fn spawn<R: Rng + ?Sized>(
    terrain: &TerrainGrid,
    occupancy: &mut OccupancySet,
    catalog: &'static [ResourceNodeConfig],
    settings: &SpawnSettings,
    mapper: GridMapper,
    rng: &mut R,
) -> SpawnReport {
    let mut report = SpawnReport::default();
    if terrain.columns() == 0 || terrain.rows() == 0 {
        return report;
    }

    for config in catalog
        .iter()
        .filter(|config| settings.tiers.contains(&config.tier))
    {
        let requested = settings.count_per_tier;
        let budget = requested.saturating_mul(settings.attempts_per_node);
        let mut placed = 0;
        let mut attempts = 0;

        while placed < requested && attempts < budget {
            attempts += 1;
            let cell = CellCoord::new(
                rng.gen_range(0..terrain.columns()) as i32,
                rng.gen_range(0..terrain.rows()) as i32,
            );
            if terrain.is_obstructed(cell) || !occupancy.claim(cell) {
                continue;
            }

            report.nodes.push(PlacedResourceNode {
                config,
                cell,
                position: mapper.to_world_center(cell),
            });
            placed += 1;
        }

        debug!(resource = %config.id, placed, attempts, "resource spawn pass finished");
        if placed < requested {
            warn!(
                resource = %config.id,
                placed,
                requested,
                "could not place all resource nodes within the attempt budget"
            );
            report.shortfalls.push(SpawnShortfall {
                resource: config.id,
                placed,
                requested,
            });
        }
    }

    report
}
