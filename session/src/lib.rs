#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! The simulation component of Foundry.
//!
//! A [`Session`] owns the world, the placement, camera and pause systems, and
//! the simulation side of the HUD bridge. An external screen manager activates
//! it, feeds it one [`TickInput`] per frame, and deactivates it on exit.

mod config;

use std::{collections::BTreeSet, sync::mpsc::Receiver, time::Duration};

use foundry_core::{catalog, Command, Event, GridError, GridMapper, PauseState};
use foundry_hud::{HudBridge, HudEvent, HudIntent};
use foundry_system_builder::BuildPlacement;
use foundry_system_camera::{wheel_steps, PanInput, WorldView};
use foundry_system_pause::PauseCoordinator;
use foundry_world::{self as world, query, World};
use glam::Vec2;
use thiserror::Error;
use tracing::{debug, error, info, warn};

pub use config::{SessionConfig, ViewportConfig, WorldDimensions};

/// Fatal problems that abort activation.
#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    /// A visual the core draws was not loaded by the renderer.
    #[error("required asset `{key}` is not loaded")]
    MissingAsset {
        /// Missing visual key.
        key: String,
    },
    /// World dimensions do not form a valid grid.
    #[error("invalid world layout: {0}")]
    InvalidLayout(#[from] GridError),
    /// Obstruction probability is not a probability.
    #[error("obstruction probability {0} is outside [0, 1]")]
    InvalidObstructionProbability(f64),
    /// Camera tunables cannot produce a usable view.
    #[error("invalid camera configuration: {reason}")]
    InvalidCamera {
        /// Violated constraint.
        reason: &'static str,
    },
}

/// Visual keys the renderer has loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetManifest {
    keys: BTreeSet<String>,
}

impl AssetManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a loaded visual key.
    pub fn insert(&mut self, key: impl Into<String>) {
        let _ = self.keys.insert(key.into());
    }

    /// Reports whether the key was loaded.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// First visual the core requires that is absent from the manifest.
    #[must_use]
    pub fn first_missing(&self) -> Option<&'static str> {
        catalog::required_visuals().find(|key| !self.contains(key))
    }
}

impl<S: Into<String>> FromIterator<S> for AssetManifest {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Input sampled once per frame by the adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    /// Pointer position in screen pixels.
    pub pointer_screen: Vec2,
    /// Viewport size in screen pixels, when the adapter knows it.
    pub viewport: Option<Vec2>,
    /// Left button pressed this frame.
    pub primary_click: bool,
    /// Right button pressed this frame.
    pub secondary_click: bool,
    /// Middle button pressed this frame.
    pub middle_click: bool,
    /// Vertical wheel movement this frame.
    pub wheel_delta_y: f32,
    /// Held pan keys.
    pub pan: PanInput,
}

/// Live simulation owned by the screen manager between activation and deactivation.
#[derive(Debug)]
pub struct Session {
    world: World,
    builder: BuildPlacement,
    camera: WorldView,
    pause: PauseCoordinator,
    bridge: HudBridge,
    intents: Receiver<HudIntent>,
    mapper: GridMapper,
    pointer_world: Vec2,
    seed: u64,
    load_slot: Option<u32>,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Session {
    /// Verifies assets, generates the world, centres the camera and starts listening to the HUD.
    pub fn activate(
        config: &SessionConfig,
        load_slot: Option<u32>,
        assets: &AssetManifest,
        bridge: &HudBridge,
    ) -> Result<Self, SetupError> {
        Self::try_activate(config, load_slot, assets, bridge).map_err(|err| {
            error!(%err, "session setup failed");
            err
        })
    }

    fn try_activate(
        config: &SessionConfig,
        load_slot: Option<u32>,
        assets: &AssetManifest,
        bridge: &HudBridge,
    ) -> Result<Self, SetupError> {
        if let Some(key) = assets.first_missing() {
            return Err(SetupError::MissingAsset {
                key: key.to_owned(),
            });
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let settings = config.world_settings(seed)?;
        match load_slot {
            Some(slot) => warn!(slot, "restoring saved games is not supported; starting a new world"),
            None => info!("starting a new world"),
        }
        info!(seed, "world seed");

        let layout = settings.layout;
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(&mut world, Command::ConfigureWorld { settings }, &mut events);

        let world_size = Vec2::new(layout.width() as f32, layout.height() as f32);
        let mut camera = WorldView::new(config.camera, world_size, config.viewport.size());
        camera.center_on(layout.center());

        let session = Self {
            world,
            builder: BuildPlacement::new(),
            camera,
            pause: PauseCoordinator::new(),
            bridge: bridge.clone(),
            intents: bridge.subscribe_simulation(),
            mapper: layout.mapper(),
            pointer_world: layout.center(),
            seed,
            load_slot,
            commands: Vec::new(),
            events,
        };
        session.emit_camera_coords();
        info!(
            columns = layout.columns(),
            rows = layout.rows(),
            nodes = query::resource_nodes(&session.world).len(),
            policy = ?query::placement_policy(&session.world),
            "session activated"
        );
        Ok(session)
    }

    /// Advances the session by one frame.
    ///
    /// HUD intents are handled first, then the input sample drives placement,
    /// zoom, pan and preview tracking, then the world steps, then camera
    /// telemetry goes out. Everything but intents is suppressed while paused.
    pub fn tick(&mut self, dt: Duration, input: &TickInput) {
        self.events.clear();
        self.drain_intents();

        if let Some(viewport) = input.viewport {
            self.camera.set_viewport(viewport);
        }

        let pause = self.pause.state();
        if !pause.is_paused() {
            self.pointer_world = self.camera.screen_to_world(input.pointer_screen);
            self.handle_clicks(input);
            self.camera.zoom(wheel_steps(input.wheel_delta_y), pause);
            self.camera.pan(input.pan.direction(), dt, pause);
            self.pointer_world = self.camera.screen_to_world(input.pointer_screen);
            self.builder
                .update_preview(self.pointer_world, pause, &self.mapper);
            world::apply(&mut self.world, Command::Tick { dt }, &mut self.events);
        }

        self.emit_camera_coords();
    }

    /// Pushes a resource counter update to the display.
    pub fn report_resource_count(&self, resource: &str, amount: i64) {
        let _ = self.bridge.emit_to_display(HudEvent::ResourceCountChanged {
            resource: resource.to_owned(),
            amount,
        });
    }

    /// Leaves the session: resumes if paused, then tears down the HUD.
    pub fn deactivate(mut self) {
        if let Some(state) = self.pause.force_resume() {
            self.notify_pause(state);
        }
        self.bridge.teardown();
        info!(
            structures = query::structure_count(&self.world),
            "session deactivated"
        );
    }

    /// Authoritative world state.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Build placement state.
    #[must_use]
    pub fn builder(&self) -> &BuildPlacement {
        &self.builder
    }

    /// Camera state.
    #[must_use]
    pub fn camera(&self) -> &WorldView {
        &self.camera
    }

    /// Current pause state.
    #[must_use]
    pub fn pause_state(&self) -> PauseState {
        self.pause.state()
    }

    /// Grid mapper for the active world.
    #[must_use]
    pub fn mapper(&self) -> &GridMapper {
        &self.mapper
    }

    /// World position under the pointer as of the last tick.
    #[must_use]
    pub fn pointer_world(&self) -> Vec2 {
        self.pointer_world
    }

    /// Seed the world was generated from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Save slot requested at activation.
    #[must_use]
    pub fn load_slot(&self) -> Option<u32> {
        self.load_slot
    }

    fn drain_intents(&mut self) {
        while let Ok(intent) = self.intents.try_recv() {
            match intent {
                HudIntent::PauseToggleRequested => {
                    let state = self.pause.toggle();
                    self.notify_pause(state);
                }
                HudIntent::BuildItemSelectionRequested(id) => match catalog::buildable(&id) {
                    Some(item) => {
                        let _ = self
                            .builder
                            .select_or_toggle(item, self.pointer_world, &self.mapper);
                    }
                    None => warn!(%id, "unknown build item requested"),
                },
            }
        }
    }

    fn handle_clicks(&mut self, input: &TickInput) {
        if input.middle_click {
            debug!("middle click ignored");
        }
        if input.secondary_click && !self.builder.cancel() {
            debug!("right click with nothing selected");
        }
        if input.primary_click {
            let pause = self.pause.state();
            if self.builder.confirm_placement(
                self.pointer_world,
                pause,
                &self.mapper,
                &mut self.commands,
            ) {
                self.flush_commands();
            } else {
                debug!(
                    x = self.pointer_world.x,
                    y = self.pointer_world.y,
                    "left click with nothing selected"
                );
            }
        }
    }

    fn flush_commands(&mut self) {
        let start = self.events.len();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        let produced = &self.events[start..];
        for event in produced {
            if let Event::PlacementRejected { item, cell, reason } = event {
                warn!(%item, %cell, %reason, "placement rejected");
            }
        }
        self.builder.handle(produced);
    }

    fn notify_pause(&self, state: PauseState) {
        let _ = self.bridge.emit_to_display(HudEvent::PauseChanged {
            paused: state.is_paused(),
        });
    }

    fn emit_camera_coords(&self) {
        let center = self.camera.center_world_position();
        let _ = self.bridge.emit_to_display(HudEvent::CameraCoordsUpdated {
            x: center.x,
            y: center.y,
        });
    }
}
