#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Foundry engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The session submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to within the same tick. Grid addressing ([`CellCoord`],
//! [`GridMapper`], [`WorldLayout`]) and the static catalogs live here so every
//! crate agrees on them.

pub mod catalog;

use std::{fmt, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::{
    BeltConfig, BuildableId, BuildableItemConfig, PlacementRule, ResourceId, ResourceNodeConfig,
};

/// Title used by adapters when opening the game window.
pub const WINDOW_TITLE: &str = "Foundry";

/// Classification of a single terrain tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Open ground that accepts resource nodes and structures.
    Traversable,
    /// Blocked ground (water) that never accepts placements.
    Obstructed,
}

impl Tile {
    /// Reports whether the tile blocks placement.
    #[must_use]
    pub const fn is_obstructed(self) -> bool {
        matches!(self, Self::Obstructed)
    }

    /// Visual key the renderer uses for the tile.
    #[must_use]
    pub const fn visual_key(self) -> &'static str {
        match self {
            Self::Traversable => "grass",
            Self::Obstructed => "water",
        }
    }
}

/// Integer address of a grid cell expressed as column and row.
///
/// Coordinates are signed because world positions left of or above the origin
/// floor to negative cells; such cells simply lie outside every grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.column, self.row)
    }
}

/// Pure conversion between continuous world coordinates and grid cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMapper {
    tile_size: f32,
}

impl GridMapper {
    /// Creates a mapper for square tiles of the provided side length.
    #[must_use]
    pub const fn new(tile_size: f32) -> Self {
        Self { tile_size }
    }

    /// Side length of a tile in world units.
    #[must_use]
    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Returns the cell containing the provided world position.
    ///
    /// No bounds checking is performed; callers validate against the grid.
    #[must_use]
    pub fn to_grid_cell(&self, world: Vec2) -> CellCoord {
        CellCoord::new(
            (world.x / self.tile_size).floor() as i32,
            (world.y / self.tile_size).floor() as i32,
        )
    }

    /// Returns the world-space centre of the provided cell.
    #[must_use]
    pub fn to_world_center(&self, cell: CellCoord) -> Vec2 {
        let half = self.tile_size / 2.0;
        Vec2::new(
            cell.column() as f32 * self.tile_size + half,
            cell.row() as f32 * self.tile_size + half,
        )
    }

    /// Snaps a world position to the centre of its containing cell.
    #[must_use]
    pub fn snap(&self, world: Vec2) -> Vec2 {
        self.to_world_center(self.to_grid_cell(world))
    }
}

/// Validated world rectangle and the tile grid derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldLayout {
    width: u32,
    height: u32,
    tile_size: u32,
}

impl WorldLayout {
    /// Standard 3200x3200 world tiled at 64 units (a 50x50 grid).
    pub const STANDARD: Self = Self {
        width: 3200,
        height: 3200,
        tile_size: 64,
    };

    /// Creates a layout, requiring both world extents to divide evenly by the tile size.
    pub fn new(width: u32, height: u32, tile_size: u32) -> Result<Self, GridError> {
        if tile_size == 0 {
            return Err(GridError::ZeroTileSize);
        }
        if width == 0 || height == 0 {
            return Err(GridError::EmptyWorld { width, height });
        }
        for extent in [width, height] {
            if extent % tile_size != 0 {
                return Err(GridError::UnevenDimensions { extent, tile_size });
            }
        }

        Ok(Self {
            width,
            height,
            tile_size,
        })
    }

    /// World width in world units.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// World height in world units.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Side length of a tile in world units.
    #[must_use]
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.width / self.tile_size
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.height / self.tile_size
    }

    /// Coordinate mapper matching the layout's tile size.
    #[must_use]
    pub fn mapper(&self) -> GridMapper {
        GridMapper::new(self.tile_size as f32)
    }

    /// Cell containing the centre of the world, reserved for the hub.
    #[must_use]
    pub fn center_cell(&self) -> CellCoord {
        self.mapper().to_grid_cell(self.center())
    }

    /// World-space centre of the world rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Reports whether the cell lies within the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.column() >= 0
            && cell.row() >= 0
            && (cell.column() as u32) < self.columns()
            && (cell.row() as u32) < self.rows()
    }
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Reasons a world layout cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Tiles must have a positive side length.
    #[error("tile size must be positive")]
    ZeroTileSize,
    /// The world rectangle has no area.
    #[error("world {width}x{height} has no area")]
    EmptyWorld {
        /// Requested world width.
        width: u32,
        /// Requested world height.
        height: u32,
    },
    /// A world extent is not a whole multiple of the tile size.
    #[error("world extent {extent} is not divisible by tile size {tile_size}")]
    UnevenDimensions {
        /// Extent that failed validation.
        extent: u32,
        /// Tile size used for the division.
        tile_size: u32,
    },
}

/// Unique identifier assigned to a placed structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructureId(u32);

impl StructureId {
    /// Creates a new structure identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Rules the world applies when committing a structure placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Every confirmed placement succeeds regardless of terrain or occupancy.
    Unchecked,
    /// Placements must target an in-bounds, traversable, unoccupied cell.
    TerrainAware {
        /// Whether committed structures claim their cell in the occupancy set.
        claim_occupancy: bool,
    },
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self::TerrainAware {
            claim_occupancy: true,
        }
    }
}

/// Reasons a structure placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The target cell lies outside the grid.
    #[error("cell out of bounds")]
    OutOfBounds,
    /// The target cell is obstructed terrain.
    #[error("cell obstructed")]
    Obstructed,
    /// The target cell is already claimed.
    #[error("cell occupied")]
    Occupied,
    /// The item has no placement logic yet.
    #[error("placement not implemented for this item")]
    Unsupported,
}

/// Resource spawn request parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    /// Number of nodes requested for each included catalog entry.
    pub count_per_tier: u32,
    /// Attempt budget multiplier; each entry may try `count_per_tier * attempts_per_node` cells.
    pub attempts_per_node: u32,
    /// Tiers whose catalog entries are spawned.
    pub tiers: Vec<u32>,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            count_per_tier: 30,
            attempts_per_node: 5,
            tiers: vec![1],
        }
    }
}

/// Everything the world needs to generate a fresh map.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldSettings {
    /// Validated world rectangle and tile size.
    pub layout: WorldLayout,
    /// Probability in `[0, 1]` that any tile is obstructed.
    pub obstruction_probability: f64,
    /// Resource node spawn parameters.
    pub spawn: SpawnSettings,
    /// Rules applied to structure placement.
    pub placement: PlacementPolicy,
    /// Seed driving terrain generation and resource spawning.
    pub seed: u64,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Regenerates terrain, reserves the hub and spawns resource nodes.
    ConfigureWorld {
        /// Generation parameters.
        settings: WorldSettings,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests placement of a buildable item at the provided cell.
    PlaceStructure {
        /// Catalog identifier of the item being placed.
        item: BuildableId,
        /// Target cell of the placement.
        cell: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a fresh grid was generated.
    WorldConfigured {
        /// Number of tile columns.
        columns: u32,
        /// Number of tile rows.
        rows: u32,
    },
    /// Confirms that the hub was placed and its cell reserved.
    HubPlaced {
        /// Cell occupied by the hub.
        cell: CellCoord,
    },
    /// Confirms that a resource node was spawned.
    ResourceNodeSpawned {
        /// Catalog identifier of the resource.
        resource: ResourceId,
        /// Cell occupied by the node.
        cell: CellCoord,
    },
    /// Reports that a catalog entry could not meet its quota within the attempt budget.
    SpawnQuotaShortfall {
        /// Catalog identifier of the resource.
        resource: ResourceId,
        /// Nodes actually placed.
        placed: u32,
        /// Nodes requested.
        requested: u32,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a structure was committed to the world.
    StructurePlaced {
        /// Identifier assigned to the structure.
        structure: StructureId,
        /// Catalog identifier of the placed item.
        item: BuildableId,
        /// Cell occupied by the structure.
        cell: CellCoord,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Catalog identifier of the requested item.
        item: BuildableId,
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
}

/// Two-state pause flag owned by the pause coordinator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PauseState {
    /// Input and simulation stepping are processed.
    #[default]
    Running,
    /// Input and simulation stepping are suppressed.
    Paused,
}

impl PauseState {
    /// Reports whether the state suppresses input.
    #[must_use]
    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Returns the opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Paused,
            Self::Paused => Self::Running,
        }
    }
}
