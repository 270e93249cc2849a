#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! World view controller: camera scroll, zoom and world-bound clamping.
//!
//! `scroll` is the world position of the viewport's top-left corner. The
//! visible world rectangle spans `viewport / zoom` units from there, and zoom
//! changes keep the centre of that rectangle fixed.

use std::time::Duration;

use foundry_core::PauseState;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Tunables for camera movement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Pan speed in world units per second.
    pub speed: f32,
    /// Smallest permitted zoom factor.
    pub min_zoom: f32,
    /// Largest permitted zoom factor.
    pub max_zoom: f32,
    /// Zoom change per wheel step.
    pub zoom_increment: f32,
    /// Zoom factor applied on activation.
    pub initial_zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            speed: 500.0,
            min_zoom: 0.5,
            max_zoom: 1.5,
            zoom_increment: 0.1,
            initial_zoom: 1.0,
        }
    }
}

/// Snapshot of the camera for renderers and telemetry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// World x of the viewport's top-left corner.
    pub scroll_x: f32,
    /// World y of the viewport's top-left corner.
    pub scroll_y: f32,
    /// Zoom factor; screen pixels per world unit.
    pub zoom: f32,
}

/// Directional pan flags sampled from the keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanInput {
    /// Up arrow or W held.
    pub up: bool,
    /// Down arrow or S held.
    pub down: bool,
    /// Left arrow or A held.
    pub left: bool,
    /// Right arrow or D held.
    pub right: bool,
}

impl PanInput {
    /// Unit-length pan direction. Left wins over right and up wins over down.
    #[must_use]
    pub fn direction(self) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y).normalize_or_zero()
    }
}

/// Converts a wheel delta into zoom steps: scrolling up zooms in.
#[must_use]
pub fn wheel_steps(delta_y: f32) -> i32 {
    if delta_y < 0.0 {
        1
    } else if delta_y > 0.0 {
        -1
    } else {
        0
    }
}

/// Camera over a rectangular world.
#[derive(Clone, Debug)]
pub struct WorldView {
    config: CameraConfig,
    world: Vec2,
    viewport: Vec2,
    scroll: Vec2,
    zoom: f32,
}

impl WorldView {
    /// Creates a camera looking at the top-left corner of the world.
    #[must_use]
    pub fn new(config: CameraConfig, world: Vec2, viewport: Vec2) -> Self {
        let mut view = Self {
            config,
            world,
            viewport,
            scroll: Vec2::ZERO,
            zoom: clamp_zoom(config.initial_zoom, &config),
        };
        view.clamp_scroll();
        view
    }

    /// Moves the camera along `direction` for `dt`. Suppressed while paused.
    pub fn pan(&mut self, direction: Vec2, dt: Duration, pause: PauseState) {
        if pause.is_paused() || direction == Vec2::ZERO {
            return;
        }
        self.scroll += direction * self.config.speed * dt.as_secs_f32();
        self.clamp_scroll();
    }

    /// Applies `steps` zoom increments, clamped to the configured range. Suppressed while paused.
    pub fn zoom(&mut self, steps: i32, pause: PauseState) {
        if pause.is_paused() || steps == 0 {
            return;
        }
        let center = self.center_world_position();
        let target = self.zoom + steps as f32 * self.config.zoom_increment;
        self.zoom = clamp_zoom(target, &self.config);
        trace!(zoom = self.zoom, "camera zoom changed");
        self.center_on(center);
    }

    /// Centres the view on a world position, subject to bounds clamping.
    pub fn center_on(&mut self, world: Vec2) {
        self.scroll = world - self.visible_size() / 2.0;
        self.clamp_scroll();
    }

    /// Updates the viewport size in screen pixels, keeping the centre in place.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        if viewport == self.viewport {
            return;
        }
        let center = self.center_world_position();
        self.viewport = viewport;
        self.center_on(center);
    }

    /// World position under the centre of the viewport.
    #[must_use]
    pub fn center_world_position(&self) -> Vec2 {
        self.scroll + self.visible_size() / 2.0
    }

    /// World position under a screen-space point.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.scroll + screen / self.zoom
    }

    /// Screen-space point showing a world position.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.scroll) * self.zoom
    }

    /// Size of the visible world rectangle.
    #[must_use]
    pub fn visible_size(&self) -> Vec2 {
        self.viewport / self.zoom
    }

    /// Current zoom factor.
    #[must_use]
    pub fn zoom_factor(&self) -> f32 {
        self.zoom
    }

    /// World position of the viewport's top-left corner.
    #[must_use]
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Configuration the camera was created with.
    #[must_use]
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Snapshot for renderers and telemetry.
    #[must_use]
    pub fn state(&self) -> CameraState {
        CameraState {
            scroll_x: self.scroll.x,
            scroll_y: self.scroll.y,
            zoom: self.zoom,
        }
    }

    fn clamp_scroll(&mut self) {
        let visible = self.visible_size();
        self.scroll.x = clamp_axis(self.scroll.x, visible.x, self.world.x);
        self.scroll.y = clamp_axis(self.scroll.y, visible.y, self.world.y);
    }
}

fn clamp_zoom(zoom: f32, config: &CameraConfig) -> f32 {
    zoom.max(config.min_zoom).min(config.max_zoom)
}

fn clamp_axis(scroll: f32, visible: f32, world: f32) -> f32 {
    if visible >= world {
        (world - visible) / 2.0
    } else {
        scroll.clamp(0.0, world - visible)
    }
}
