//! Tunables for a session, deserializable from a configuration file.

use foundry_core::{PlacementPolicy, SpawnSettings, WorldLayout, WorldSettings};
use foundry_system_camera::CameraConfig;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::SetupError;

/// World rectangle and tile size before validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldDimensions {
    /// World width in world units.
    pub width: u32,
    /// World height in world units.
    pub height: u32,
    /// Tile side length in world units.
    pub tile_size: u32,
}

impl Default for WorldDimensions {
    fn default() -> Self {
        let layout = WorldLayout::STANDARD;
        Self {
            width: layout.width(),
            height: layout.height(),
            tile_size: layout.tile_size(),
        }
    }
}

/// Initial viewport size in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl ViewportConfig {
    /// Size as a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Every tunable of a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// World rectangle and tile size.
    pub world: WorldDimensions,
    /// Probability in `[0, 1]` that a tile is obstructed. Zero yields flat terrain.
    pub obstruction_probability: f64,
    /// Seed for terrain and resource placement; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Resource node spawn parameters.
    pub resources: SpawnSettings,
    /// Rules the world applies when committing structures.
    pub placement: PlacementPolicy,
    /// Camera movement tunables.
    pub camera: CameraConfig,
    /// Initial viewport size.
    pub viewport: ViewportConfig,
}

impl SessionConfig {
    /// Validates the configuration and produces world generation settings.
    pub fn world_settings(&self, seed: u64) -> Result<WorldSettings, SetupError> {
        let probability = self.obstruction_probability;
        if !(0.0..=1.0).contains(&probability) {
            return Err(SetupError::InvalidObstructionProbability(probability));
        }
        let layout = WorldLayout::new(self.world.width, self.world.height, self.world.tile_size)?;
        validate_camera(&self.camera)?;

        Ok(WorldSettings {
            layout,
            obstruction_probability: probability,
            spawn: self.resources.clone(),
            placement: self.placement,
            seed,
        })
    }
}

fn validate_camera(camera: &CameraConfig) -> Result<(), SetupError> {
    let reason = if !(camera.min_zoom.is_finite() && camera.min_zoom > 0.0) {
        "min_zoom must be positive"
    } else if !(camera.max_zoom.is_finite() && camera.max_zoom >= camera.min_zoom) {
        "max_zoom must not be below min_zoom"
    } else if !camera.initial_zoom.is_finite() {
        "initial_zoom must be finite"
    } else if !(camera.zoom_increment.is_finite() && camera.zoom_increment >= 0.0) {
        "zoom_increment must not be negative"
    } else if !(camera.speed.is_finite() && camera.speed >= 0.0) {
        "speed must not be negative"
    } else {
        return Ok(());
    };
    Err(SetupError::InvalidCamera { reason })
}
