//! Translates session state into the scene consumed by the renderer.

use anyhow::Result;
use foundry_core::catalog;
use foundry_hud::HudDisplay;
use foundry_rendering::{
    depth, BuildButton, CameraPresentation, HudPresentation, Scene, SpritePresentation,
    TerrainPresentation,
};
use foundry_session::{Session, TickInput};
use foundry_system_builder::{CursorAffordance, PlacementPreview};
use foundry_system_camera::{PanInput, WorldView};
use foundry_world::query;

/// Builds the scene shown on the first frame.
pub(crate) fn initial_scene(session: &Session) -> Result<Scene> {
    let mut scene = Scene::new(terrain(session)?, camera(session.camera()));
    refresh_world(session, &mut scene);
    Ok(scene)
}

/// Converts the renderer's frame sample into session input.
pub(crate) fn tick_input(frame: &foundry_rendering::FrameInput) -> TickInput {
    let viewport = (frame.viewport.x > 0.0 && frame.viewport.y > 0.0).then_some(frame.viewport);
    TickInput {
        pointer_screen: frame.pointer_screen,
        viewport,
        primary_click: frame.primary_click,
        secondary_click: frame.secondary_click,
        middle_click: frame.middle_click,
        wheel_delta_y: frame.wheel_delta_y,
        pan: PanInput {
            up: frame.pan_up,
            down: frame.pan_down,
            left: frame.pan_left,
            right: frame.pan_right,
        },
    }
}

/// Rewrites every per-frame part of the scene.
pub(crate) fn refresh(session: &Session, display: &HudDisplay, scene: &mut Scene) {
    refresh_world(session, scene);
    scene.hud = hud(session, display);
}

fn refresh_world(session: &Session, scene: &mut Scene) {
    let world = session.world();
    let tile_size = session.mapper().tile_size();

    scene.camera = camera(session.camera());
    scene.sprites.clear();
    if let Some(hub) = query::hub(world) {
        scene.sprites.push(SpritePresentation {
            visual_key: catalog::HUB_VISUAL,
            position: session.mapper().to_world_center(hub),
            size: tile_size,
            alpha: 1.0,
            depth: depth::STRUCTURE,
        });
    }
    scene
        .sprites
        .extend(query::resource_nodes(world).iter().map(|node| SpritePresentation {
            visual_key: node.config().visual_key,
            position: node.position(),
            size: tile_size,
            alpha: 1.0,
            depth: depth::RESOURCE_NODE,
        }));
    scene.sprites.extend(query::structures(world).filter_map(|structure| {
        let config = catalog::buildable(structure.item.as_str())?;
        Some(SpritePresentation {
            visual_key: config.visual_key,
            position: structure.position,
            size: tile_size,
            alpha: 1.0,
            depth: depth::STRUCTURE,
        })
    }));

    let builder = session.builder();
    scene.preview = builder
        .preview()
        .map(|preview| preview_sprite(preview, tile_size));
    scene.cursor_visible = builder.cursor() == CursorAffordance::Default;
}

fn preview_sprite(preview: &PlacementPreview, size: f32) -> SpritePresentation {
    SpritePresentation {
        visual_key: preview.visual_key,
        position: preview.position,
        size,
        alpha: preview.alpha,
        depth: preview.depth,
    }
}

fn hud(session: &Session, display: &HudDisplay) -> HudPresentation {
    let selected = session.builder().selected();
    HudPresentation {
        coords_text: display.coords_text().to_owned(),
        resources: display
            .counters()
            .map(|(name, amount)| (name.to_owned(), amount))
            .collect(),
        build_items: catalog::BUILDABLES
            .iter()
            .map(|item| BuildButton {
                id: item.id.as_str().to_owned(),
                selected: selected == Some(item.id),
            })
            .collect(),
        paused: display.is_paused(),
        status: session
            .builder()
            .last_rejection()
            .map(|reason| format!("Cannot build here: {reason}")),
    }
}

fn terrain(session: &Session) -> Result<TerrainPresentation> {
    let grid = query::terrain(session.world());
    let tiles = grid.iter().map(|(_, tile)| tile).collect();
    Ok(TerrainPresentation::new(
        grid.columns(),
        grid.rows(),
        session.mapper().tile_size(),
        tiles,
    )?)
}

fn camera(view: &WorldView) -> CameraPresentation {
    CameraPresentation {
        scroll: view.scroll(),
        zoom: view.zoom_factor(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_core::SpawnSettings;
    use foundry_hud::HudBridge;
    use foundry_rendering::FrameInput;
    use foundry_session::{AssetManifest, SessionConfig};
    use glam::Vec2;

    fn session(bridge: &HudBridge) -> Session {
        let config = SessionConfig {
            seed: Some(3),
            resources: SpawnSettings {
                count_per_tier: 4,
                ..SpawnSettings::default()
            },
            ..SessionConfig::default()
        };
        let assets: AssetManifest = catalog::required_visuals().collect();
        Session::activate(&config, None, &assets, bridge).expect("session activates")
    }

    #[test]
    fn initial_scene_holds_terrain_hub_and_nodes() {
        let bridge = HudBridge::new();
        let session = session(&bridge);

        let scene = initial_scene(&session).expect("scene builds");

        assert_eq!(scene.terrain.columns, 50);
        assert_eq!(scene.terrain.rows, 50);
        assert_eq!(scene.terrain.iter().count(), 2500);
        let hubs = scene
            .sprites
            .iter()
            .filter(|sprite| sprite.visual_key == catalog::HUB_VISUAL)
            .count();
        assert_eq!(hubs, 1);
        let nodes = scene
            .sprites
            .iter()
            .filter(|sprite| sprite.depth == depth::RESOURCE_NODE)
            .count();
        assert_eq!(nodes, 4);
        assert!(scene.preview.is_none());
        assert!(scene.cursor_visible);
    }

    #[test]
    fn selecting_an_item_shows_preview_and_hides_cursor() {
        let bridge = HudBridge::new();
        let mut display = HudDisplay::attach(&bridge);
        let mut session = session(&bridge);
        let mut scene = initial_scene(&session).expect("scene builds");

        display.request_build_item("buildMiner");
        session.tick(std::time::Duration::from_millis(16), &TickInput::default());
        let _ = display.drain();
        refresh(&session, &display, &mut scene);

        let preview = scene.preview.expect("preview drawn");
        assert_eq!(preview.visual_key, "buildMiner");
        assert!(preview.alpha < 1.0);
        assert!(!scene.cursor_visible);
        let selected: Vec<_> = scene
            .hud
            .build_items
            .iter()
            .filter(|button| button.selected)
            .map(|button| button.id.as_str())
            .collect();
        assert_eq!(selected, vec!["buildMiner"]);
        assert!(scene.hud.coords_text.starts_with("World: ("));
        assert_eq!(scene.hud.resources.len(), catalog::HUD_RESOURCES.len());
    }

    #[test]
    fn zero_viewport_is_not_forwarded() {
        let frame = FrameInput {
            pointer_screen: Vec2::new(5.0, 6.0),
            pan_left: true,
            ..FrameInput::default()
        };

        let input = tick_input(&frame);

        assert!(input.viewport.is_none());
        assert_eq!(input.pointer_screen, Vec2::new(5.0, 6.0));
        assert!(input.pan.left);
        assert!(!input.pan.right);
    }
}
