use std::time::Duration;

use foundry_core::PauseState;
use foundry_system_camera::{wheel_steps, CameraConfig, PanInput, WorldView};
use glam::Vec2;

const WORLD: Vec2 = Vec2::new(3200.0, 3200.0);
const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

fn view() -> WorldView {
    WorldView::new(CameraConfig::default(), WORLD, VIEWPORT)
}

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-3
}

#[test]
fn zooming_in_repeatedly_clamps_at_max() {
    let mut view = view();

    for _ in 0..20 {
        view.zoom(1, PauseState::Running);
        assert!(view.zoom_factor() <= 1.5 + f32::EPSILON);
    }

    assert!((view.zoom_factor() - 1.5).abs() < 1e-5);
}

#[test]
fn zooming_out_repeatedly_clamps_at_min() {
    let mut view = view();

    for _ in 0..20 {
        view.zoom(-1, PauseState::Running);
    }

    assert!((view.zoom_factor() - 0.5).abs() < 1e-5);
}

#[test]
fn zoom_keeps_view_centre_fixed() {
    let mut view = view();
    view.center_on(Vec2::new(1600.0, 1600.0));

    view.zoom(3, PauseState::Running);

    assert!(approx(view.center_world_position(), Vec2::new(1600.0, 1600.0)));
}

#[test]
fn pan_moves_at_configured_speed() {
    let mut view = view();
    let direction = PanInput {
        right: true,
        ..PanInput::default()
    }
    .direction();

    view.pan(direction, Duration::from_secs(1), PauseState::Running);

    assert!(approx(view.scroll(), Vec2::new(500.0, 0.0)));
}

#[test]
fn diagonal_pan_is_normalized() {
    let direction = PanInput {
        down: true,
        right: true,
        ..PanInput::default()
    }
    .direction();

    assert!((direction.length() - 1.0).abs() < 1e-5);
    assert!(direction.x > 0.0 && direction.y > 0.0);
}

#[test]
fn opposing_keys_prefer_left_and_up() {
    let direction = PanInput {
        up: true,
        down: true,
        left: true,
        right: true,
    }
    .direction();

    assert!(direction.x < 0.0);
    assert!(direction.y < 0.0);
    assert_eq!(PanInput::default().direction(), Vec2::ZERO);
}

#[test]
fn pan_clamps_visible_rect_inside_world() {
    let mut view = view();

    view.pan(Vec2::new(-1.0, 0.0), Duration::from_secs(2), PauseState::Running);
    assert!(approx(view.scroll(), Vec2::ZERO));

    view.pan(Vec2::new(1.0, 0.0), Duration::from_secs(60), PauseState::Running);
    view.pan(Vec2::new(0.0, 1.0), Duration::from_secs(60), PauseState::Running);
    assert!(approx(view.scroll(), Vec2::new(1920.0, 2480.0)));
}

#[test]
fn paused_camera_ignores_pan_and_zoom() {
    let mut view = view();
    let before = view.state();

    view.pan(Vec2::new(1.0, 0.0), Duration::from_secs(1), PauseState::Paused);
    view.zoom(2, PauseState::Paused);

    assert_eq!(view.state(), before);
}

#[test]
fn small_world_is_centred_in_viewport() {
    let mut view = WorldView::new(CameraConfig::default(), Vec2::new(640.0, 640.0), VIEWPORT);

    view.pan(Vec2::new(1.0, 0.0), Duration::from_secs(1), PauseState::Running);

    assert!(approx(view.scroll(), Vec2::new(-320.0, -40.0)));
    assert!(approx(view.center_world_position(), Vec2::new(320.0, 320.0)));
}

#[test]
fn screen_and_world_projection_agree() {
    let mut view = view();
    view.center_on(Vec2::new(1600.0, 1600.0));
    view.zoom(-5, PauseState::Running);

    let world = view.screen_to_world(VIEWPORT / 2.0);

    assert!(approx(world, Vec2::new(1600.0, 1600.0)));
    assert!(approx(view.world_to_screen(world), VIEWPORT / 2.0));
}

#[test]
fn wheel_direction_maps_to_zoom_steps() {
    assert_eq!(wheel_steps(-120.0), 1);
    assert_eq!(wheel_steps(53.0), -1);
    assert_eq!(wheel_steps(0.0), 0);
}

#[test]
fn inverted_zoom_range_settles_on_max_without_panicking() {
    let config = CameraConfig {
        min_zoom: 2.0,
        max_zoom: 1.0,
        ..CameraConfig::default()
    };

    let mut view = WorldView::new(config, WORLD, VIEWPORT);
    view.zoom(-3, PauseState::Running);

    assert!((view.zoom_factor() - 1.0).abs() < f32::EPSILON);
}
