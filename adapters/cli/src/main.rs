#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Foundry.

mod config;
mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use foundry_core::WINDOW_TITLE;
use foundry_hud::{HudBridge, HudDisplay};
use foundry_rendering::{Color, FrameControl, HudAction, Presentation, RenderingBackend, Scene};
use foundry_rendering_macroquad::MacroquadBackend;
use foundry_session::{AssetManifest, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments accepted by the Foundry binary.
#[derive(Debug, Parser)]
#[command(name = "foundry", about = "Top-down factory building prototype")]
struct Args {
    /// TOML file with session tunables.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for terrain and resource placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Probability in [0, 1] that a tile is water.
    #[arg(long, value_name = "PROBABILITY")]
    obstruction: Option<f64>,
    /// Save slot to restore; restoring is not supported yet and starts a new world.
    #[arg(long, value_name = "SLOT")]
    load_slot: Option<u32>,
    /// Commit structures without terrain or occupancy checks.
    #[arg(long)]
    unchecked_placement: bool,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    vsync: bool,
    /// Log frames per second once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Foundry command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = config::load(
        args.config.as_deref(),
        config::Overrides {
            seed: args.seed,
            obstruction_probability: args.obstruction,
            unchecked_placement: args.unchecked_placement,
        },
    )?;

    let viewport = config.viewport.size();
    let backend = MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .with_window_size(viewport.x as i32, viewport.y as i32);
    let assets: AssetManifest = backend.available_visuals().into_iter().collect();

    let bridge = HudBridge::new();
    let mut display = HudDisplay::attach(&bridge);
    let session = Session::activate(&config, args.load_slot, &assets, &bridge)
        .context("failed to start session")?;
    let presentation = window_presentation(scene::initial_scene(&session)?);

    let mut session = Some(session);
    backend.run(presentation, move |dt, frame, current| {
        let mut leave = false;
        for action in &frame.hud_actions {
            match action {
                HudAction::TogglePause => display.request_pause_toggle(),
                HudAction::Resume => {
                    if display.is_paused() {
                        display.request_pause_toggle();
                    }
                }
                HudAction::SelectBuildItem(id) => display.request_build_item(id),
                HudAction::HubUpgrades => info!("hub upgrades are not available yet"),
                HudAction::SaveGame => {
                    info!("saving is not implemented");
                    display.request_pause_toggle();
                }
                HudAction::MainMenu => leave = true,
            }
        }

        if leave {
            if let Some(active) = session.take() {
                active.deactivate();
            }
            let _ = display.drain();
            return FrameControl::Exit;
        }

        let Some(active) = session.as_mut() else {
            return FrameControl::Exit;
        };
        active.tick(dt, &scene::tick_input(&frame));
        let _ = display.drain();
        scene::refresh(active, &display, current);
        FrameControl::Continue
    })
}

fn window_presentation(initial: Scene) -> Presentation {
    Presentation::new(WINDOW_TITLE, Color::from_rgb_u8(18, 20, 24), initial)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_core::catalog;
    use foundry_rendering::{CameraPresentation, TerrainPresentation};

    #[test]
    fn defaults_enable_vsync_and_terrain_checks() {
        let args = Args::try_parse_from(["foundry"]).expect("no arguments parse");

        assert!(args.vsync);
        assert!(!args.unchecked_placement);
        assert!(args.config.is_none());
        assert!(args.load_slot.is_none());
    }

    #[test]
    fn vsync_can_be_disabled_and_seed_set() {
        let args = Args::try_parse_from(["foundry", "--vsync", "false", "--seed", "42"])
            .expect("arguments parse");

        assert!(!args.vsync);
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn palette_covers_required_visuals() {
        let assets: AssetManifest = MacroquadBackend::new()
            .available_visuals()
            .into_iter()
            .collect();

        assert_eq!(assets.first_missing(), None);
        assert!(catalog::required_visuals().all(|key| assets.contains(key)));
    }

    #[test]
    fn window_uses_shared_title() {
        let scene = Scene::new(TerrainPresentation::empty(), CameraPresentation::default());

        assert_eq!(window_presentation(scene).window_title, "Foundry");
    }
}
