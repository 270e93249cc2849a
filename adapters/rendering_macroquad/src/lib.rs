#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Foundry.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, so the adapter depends on macroquad without its default `audio`
//! feature.
//!
//! Visual keys are drawn as flat colored primitives from a fixed palette; the
//! palette doubles as the list of loaded visuals reported to the core. HUD
//! widgets live in the local `ui` module so Macroquad UI types stay out of the
//! rest of the renderer.

mod ui;

use self::ui::{draw_hud_ui, draw_pause_overlay_ui, HudUiContext, HUD_PANEL_WIDTH};
use anyhow::Result;
use foundry_rendering::{
    Color, FrameControl, FrameInput, HudAction, Presentation, RenderingBackend, Scene,
    SpritePresentation,
};
use glam::Vec2;
use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_pressed, mouse_position, mouse_wheel, show_mouse,
    KeyCode, MouseButton,
};
use std::time::Duration;
use tracing::info;

/// Visual keys this backend can draw, with the flat color used for each.
const PALETTE: &[(&str, Color)] = &[
    ("grass", Color::from_rgb_u8(86, 148, 70)),
    ("water", Color::from_rgb_u8(52, 102, 170)),
    ("hub", Color::from_rgb_u8(214, 176, 64)),
    ("node1", Color::from_rgb_u8(150, 150, 160)),
    ("buildMiner", Color::from_rgb_u8(196, 98, 52)),
    ("belt1", Color::from_rgb_u8(90, 90, 90)),
    ("belt2", Color::from_rgb_u8(110, 100, 80)),
    ("belt3", Color::from_rgb_u8(130, 110, 70)),
    ("belt4", Color::from_rgb_u8(150, 120, 60)),
    ("belt5", Color::from_rgb_u8(170, 130, 50)),
];

const MISSING_VISUAL: Color = Color::from_rgb_u8(255, 0, 255);

/// Tracks HUD-sourced interactions so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Debug, Default)]
pub struct HudInputState {
    latched: Vec<HudAction>,
}

impl HudInputState {
    /// Returns every latched HUD action in press order and clears the latch so each fires once.
    pub fn take_actions(&mut self) -> Vec<HudAction> {
        std::mem::take(&mut self.latched)
    }

    /// Records a HUD button press observed this frame.
    pub fn register(&mut self, action: HudAction) {
        self.latched.push(action);
    }
}

/// Snapshot of keyboard and mouse state observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct PointerObservations {
    pointer: Vec2,
    primary: bool,
    secondary: bool,
    middle: bool,
    wheel_y: f32,
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl PointerObservations {
    fn poll() -> Self {
        let (x, y) = mouse_position();
        let (_, wheel_y) = mouse_wheel();
        Self {
            pointer: Vec2::new(x, y),
            primary: is_mouse_button_pressed(MouseButton::Left),
            secondary: is_mouse_button_pressed(MouseButton::Right),
            middle: is_mouse_button_pressed(MouseButton::Middle),
            wheel_y,
            up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    window_size: (i32, i32),
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            window_size: (1280, 720),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures the initial window size in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_size = (width, height);
        self
    }
}

/// Averages frames per second over one-second windows.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn available_visuals(&self) -> Vec<&'static str> {
        PALETTE.iter().map(|(key, _)| *key).collect()
    }

    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            window_size,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_size.0,
            window_height: window_size.1,
            window_resizable: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut hud_input = HudInputState::default();

            loop {
                if is_key_pressed(KeyCode::Escape) {
                    hud_input.register(HudAction::TogglePause);
                }

                macroquad::window::clear_background(background);

                let viewport = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input_from_observations(
                    PointerObservations::poll(),
                    viewport,
                    scene.hud.paused,
                    hud_input.take_actions(),
                );

                if update_scene(frame_dt, frame_input, &mut scene) == FrameControl::Exit {
                    break;
                }

                show_mouse(scene.cursor_visible);
                draw_terrain(&scene, viewport);
                for sprite in scene.draw_order() {
                    draw_sprite(&sprite, &scene);
                }
                if let Some(status) = &scene.hud.status {
                    let _ = macroquad::text::draw_text(
                        status,
                        HUD_PANEL_WIDTH + 16.0,
                        viewport.y - 16.0,
                        22.0,
                        macroquad::color::WHITE,
                    );
                }

                let context = HudUiContext {
                    viewport: to_macroquad_vec(viewport),
                    hud: &scene.hud,
                };
                let mut root = macroquad::ui::root_ui();
                for action in draw_hud_ui(&mut root, &context) {
                    hud_input.register(action);
                }
                if scene.hud.paused {
                    for action in draw_pause_overlay_ui(&mut root, &context) {
                        hud_input.register(action);
                    }
                }
                drop(root);

                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    if show_fps {
                        info!(fps = per_second, "frame rate");
                    }
                }

                macroquad::window::next_frame().await;
            }

            show_mouse(true);
        });

        Ok(())
    }
}

/// Converts raw observations into frame input, keeping HUD clicks away from the world.
fn gather_frame_input_from_observations(
    observations: PointerObservations,
    viewport: Vec2,
    paused: bool,
    hud_actions: Vec<HudAction>,
) -> FrameInput {
    let over_hud = pointer_over_hud(observations.pointer, viewport, paused);
    let world_click = |pressed: bool| pressed && !over_hud;

    FrameInput {
        pointer_screen: observations.pointer,
        viewport,
        primary_click: world_click(observations.primary),
        secondary_click: world_click(observations.secondary),
        middle_click: world_click(observations.middle),
        wheel_delta_y: if over_hud { 0.0 } else { observations.wheel_y },
        pan_up: observations.up,
        pan_down: observations.down,
        pan_left: observations.left,
        pan_right: observations.right,
        hud_actions,
    }
}

fn pointer_over_hud(pointer: Vec2, viewport: Vec2, paused: bool) -> bool {
    if pointer.x < HUD_PANEL_WIDTH {
        return true;
    }
    paused && ui::pause_overlay_rect(to_macroquad_vec(viewport)).contains(to_macroquad_vec(pointer))
}

fn draw_terrain(scene: &Scene, viewport: Vec2) {
    let terrain = &scene.terrain;
    let camera = scene.camera;
    let step = terrain.tile_size * camera.zoom;
    if step <= f32::EPSILON {
        return;
    }

    for (cell, tile) in terrain.iter() {
        let origin = Vec2::new(
            cell.column() as f32 * terrain.tile_size,
            cell.row() as f32 * terrain.tile_size,
        );
        let screen = camera.world_to_screen(origin);
        let off_screen = screen.x > viewport.x
            || screen.y > viewport.y
            || screen.x + step < 0.0
            || screen.y + step < 0.0;
        if off_screen {
            continue;
        }
        let color = visual_color(tile.visual_key());
        macroquad::shapes::draw_rectangle(
            screen.x,
            screen.y,
            step,
            step,
            to_macroquad_color(color),
        );
        macroquad::shapes::draw_rectangle_lines(
            screen.x,
            screen.y,
            step,
            step,
            1.0,
            to_macroquad_color(color.lighten(0.15)),
        );
    }
}

fn draw_sprite(sprite: &SpritePresentation, scene: &Scene) {
    let camera = scene.camera;
    let center = camera.world_to_screen(sprite.position);
    let size = sprite.size * camera.zoom;
    let color = visual_color(sprite.visual_key).fade(sprite.alpha);
    let half = size / 2.0;

    macroquad::shapes::draw_rectangle(
        center.x - half,
        center.y - half,
        size,
        size,
        to_macroquad_color(color),
    );
    macroquad::shapes::draw_rectangle_lines(
        center.x - half,
        center.y - half,
        size,
        size,
        (size * 0.05).max(1.0),
        to_macroquad_color(color.lighten(0.4)),
    );
}

fn visual_color(key: &str) -> Color {
    PALETTE
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map_or(MISSING_VISUAL, |(_, color)| *color)
}

fn to_macroquad_vec(vec: Vec2) -> macroquad::math::Vec2 {
    macroquad::math::Vec2::new(vec.x, vec.y)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
