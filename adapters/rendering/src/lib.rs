#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Foundry adapters.

use anyhow::Result as AnyResult;
use foundry_core::{CellCoord, Tile};
use glam::Vec2;
use std::time::Duration;
use thiserror::Error;

/// Draw depths of world layers; higher values render on top.
pub mod depth {
    /// Terrain tiles.
    pub const TERRAIN: i32 = -1;
    /// Resource nodes.
    pub const RESOURCE_NODE: i32 = 0;
    /// The hub and player structures.
    pub const STRUCTURE: i32 = 1;
}

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the color with its alpha multiplied by `alpha`.
    #[must_use]
    pub fn fade(self, alpha: f32) -> Self {
        Self {
            alpha: self.alpha * alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Button presses captured by the HUD widgets during a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HudAction {
    /// The Menu button, which toggles pause.
    TogglePause,
    /// A build menu entry.
    SelectBuildItem(String),
    /// The Hub Upgrades button.
    HubUpgrades,
    /// Resume on the pause overlay.
    Resume,
    /// Save Game on the pause overlay.
    SaveGame,
    /// Main Menu on the pause overlay.
    MainMenu,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Pointer position in screen pixels.
    pub pointer_screen: Vec2,
    /// Current viewport size in screen pixels.
    pub viewport: Vec2,
    /// Left mouse button pressed over the world this frame.
    pub primary_click: bool,
    /// Right mouse button pressed over the world this frame.
    pub secondary_click: bool,
    /// Middle mouse button pressed over the world this frame.
    pub middle_click: bool,
    /// Vertical wheel movement this frame.
    pub wheel_delta_y: f32,
    /// Up arrow or W held.
    pub pan_up: bool,
    /// Down arrow or S held.
    pub pan_down: bool,
    /// Left arrow or A held.
    pub pan_left: bool,
    /// Right arrow or D held.
    pub pan_right: bool,
    /// HUD buttons pressed since the previous frame.
    pub hud_actions: Vec<HudAction>,
}

/// Terrain tiles of the world, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainPresentation {
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// Tile side length in world units.
    pub tile_size: f32,
    tiles: Vec<Tile>,
}

impl TerrainPresentation {
    /// Creates a terrain descriptor.
    ///
    /// Returns an error when the tile size is not positive or the tile count
    /// does not match the dimensions.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_size: f32,
        tiles: Vec<Tile>,
    ) -> Result<Self, RenderingError> {
        if tile_size.is_nan() || tile_size <= 0.0 {
            return Err(RenderingError::InvalidTileSize { tile_size });
        }
        let expected = columns as usize * rows as usize;
        if tiles.len() != expected {
            return Err(RenderingError::TileCountMismatch {
                expected,
                actual: tiles.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            tile_size,
            tiles,
        })
    }

    /// Creates an empty placeholder used before the first frame is populated.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            columns: 0,
            rows: 0,
            tile_size: 1.0,
            tiles: Vec::new(),
        }
    }

    /// Total width in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Total height in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Iterates over every tile with its cell.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
        let columns = self.columns.max(1) as usize;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let cell = CellCoord::new((index % columns) as i32, (index / columns) as i32);
            (cell, *tile)
        })
    }
}

/// A keyed visual placed in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpritePresentation {
    /// Visual key resolved by the backend.
    pub visual_key: &'static str,
    /// World-space centre.
    pub position: Vec2,
    /// Side length in world units.
    pub size: f32,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
    /// Draw depth; see [`depth`].
    pub depth: i32,
}

/// Camera transform applied to world content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPresentation {
    /// World position of the viewport's top-left corner.
    pub scroll: Vec2,
    /// Screen pixels per world unit.
    pub zoom: f32,
}

impl Default for CameraPresentation {
    fn default() -> Self {
        Self {
            scroll: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl CameraPresentation {
    /// Projects a world position into screen space.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.scroll) * self.zoom
    }
}

/// Build menu entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildButton {
    /// Buildable identifier sent back when pressed.
    pub id: String,
    /// Whether the entry is the active selection.
    pub selected: bool,
}

/// Everything the HUD widgets display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HudPresentation {
    /// Camera readout.
    pub coords_text: String,
    /// Resource counters in display order.
    pub resources: Vec<(String, i64)>,
    /// Build menu entries.
    pub build_items: Vec<BuildButton>,
    /// Whether the pause overlay is shown.
    pub paused: bool,
    /// Transient status line, such as a placement rejection.
    pub status: Option<String>,
}

/// Scene description combining terrain, world sprites and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Terrain tiles.
    pub terrain: TerrainPresentation,
    /// Hub, resource nodes and structures.
    pub sprites: Vec<SpritePresentation>,
    /// Placement preview following the pointer.
    pub preview: Option<SpritePresentation>,
    /// Camera transform.
    pub camera: CameraPresentation,
    /// Whether the system pointer should be drawn.
    pub cursor_visible: bool,
    /// HUD content.
    pub hud: HudPresentation,
}

impl Scene {
    /// Creates a scene with terrain only.
    #[must_use]
    pub fn new(terrain: TerrainPresentation, camera: CameraPresentation) -> Self {
        Self {
            terrain,
            sprites: Vec::new(),
            preview: None,
            camera,
            cursor_visible: true,
            hud: HudPresentation::default(),
        }
    }

    /// World sprites and the preview ordered back to front.
    #[must_use]
    pub fn draw_order(&self) -> Vec<SpritePresentation> {
        let mut ordered: Vec<_> = self.sprites.iter().copied().chain(self.preview).collect();
        ordered.sort_by_key(|sprite| sprite.depth);
        ordered
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Whether the render loop keeps going after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Render another frame.
    Continue,
    /// Close the window.
    Exit,
}

/// Rendering backend capable of presenting Foundry scenes.
pub trait RenderingBackend {
    /// Visual keys the backend can draw.
    fn available_visuals(&self) -> Vec<&'static str>;

    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, mutates the scene before it is
    /// rendered, and decides whether the loop continues.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Tiles must have a positive side length.
    #[error("tile size must be positive (received {tile_size})")]
    InvalidTileSize {
        /// Provided tile size that failed validation.
        tile_size: f32,
    },
    /// The tile list does not cover the grid exactly.
    #[error("expected {expected} tiles, received {actual}")]
    TileCountMismatch {
        /// Tiles implied by the dimensions.
        expected: usize,
        /// Tiles provided.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_creation_rejects_non_positive_tile_size() {
        let error = TerrainPresentation::new(2, 2, 0.0, vec![Tile::Traversable; 4])
            .expect_err("zero tile size must be rejected");

        assert_eq!(error, RenderingError::InvalidTileSize { tile_size: 0.0 });
    }

    #[test]
    fn terrain_creation_rejects_mismatched_tile_count() {
        let error = TerrainPresentation::new(3, 2, 64.0, vec![Tile::Traversable; 5])
            .expect_err("tile count must match dimensions");

        assert_eq!(
            error,
            RenderingError::TileCountMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn terrain_iterates_row_major() {
        let mut tiles = vec![Tile::Traversable; 6];
        tiles[4] = Tile::Obstructed;
        let terrain = TerrainPresentation::new(3, 2, 64.0, tiles).expect("valid terrain");

        let obstructed: Vec<_> = terrain
            .iter()
            .filter(|(_, tile)| tile.is_obstructed())
            .map(|(cell, _)| cell)
            .collect();

        assert_eq!(obstructed, vec![CellCoord::new(1, 1)]);
        assert_eq!(terrain.width(), 192.0);
    }

    #[test]
    fn preview_draws_above_world_sprites() {
        let mut scene = Scene::new(TerrainPresentation::empty(), CameraPresentation::default());
        let sprite = |visual_key, depth| SpritePresentation {
            visual_key,
            position: Vec2::ZERO,
            size: 64.0,
            alpha: 1.0,
            depth,
        };
        scene.preview = Some(sprite("buildMiner", 50));
        scene.sprites = vec![sprite("hub", depth::STRUCTURE), sprite("node1", depth::RESOURCE_NODE)];

        let keys: Vec<_> = scene.draw_order().iter().map(|sprite| sprite.visual_key).collect();

        assert_eq!(keys, ["node1", "hub", "buildMiner"]);
    }

    #[test]
    fn camera_projection_applies_scroll_then_zoom() {
        let camera = CameraPresentation {
            scroll: Vec2::new(100.0, 50.0),
            zoom: 2.0,
        };

        assert_eq!(camera.world_to_screen(Vec2::new(110.0, 60.0)), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn fade_scales_alpha() {
        let color = Color::from_rgb_u8(255, 0, 0).fade(0.6);

        assert!((color.alpha - 0.6).abs() < f32::EPSILON);
        assert_eq!(color.lighten(1.0).red, 1.0);
    }
}
