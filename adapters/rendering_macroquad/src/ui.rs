//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use foundry_rendering::{HudAction, HudPresentation};
use macroquad::{
    color::{Color, WHITE},
    math::{Rect, RectOffset, Vec2},
    ui::{hash, Ui},
};

/// Width of the HUD panel docked to the left edge of the window.
pub(crate) const HUD_PANEL_WIDTH: f32 = 220.0;

const PANEL_BACKGROUND: Color = Color::new(0.1, 0.1, 0.12, 0.85);
const OVERLAY_SIZE: Vec2 = Vec2::new(240.0, 200.0);

/// Snapshot of the HUD layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HudUiContext<'a> {
    /// Viewport size in screen pixels.
    pub(crate) viewport: Vec2,
    /// Content supplied by the simulation.
    pub(crate) hud: &'a HudPresentation,
}

/// Screen rectangle covered by the pause overlay.
pub(crate) fn pause_overlay_rect(viewport: Vec2) -> Rect {
    let origin = (viewport - OVERLAY_SIZE) / 2.0;
    Rect::new(origin.x, origin.y, OVERLAY_SIZE.x, OVERLAY_SIZE.y)
}

/// Renders the HUD panel and returns the buttons pressed this frame.
pub(crate) fn draw_hud_ui(ui: &mut Ui, context: &HudUiContext<'_>) -> Vec<HudAction> {
    push_skin(ui);

    let mut actions = Vec::new();
    let size = Vec2::new(HUD_PANEL_WIDTH, context.viewport.y);
    let _ = ui.window(hash!("hud_panel"), Vec2::ZERO, size, |ui| {
        ui.label(None, &context.hud.coords_text);
        for (resource, amount) in &context.hud.resources {
            ui.label(None, &format!("{resource}: {amount}"));
        }

        if ui.button(None, "Menu") {
            actions.push(HudAction::TogglePause);
        }

        ui.label(None, "Build");
        for item in &context.hud.build_items {
            let label = if item.selected {
                format!("> {}", item.id)
            } else {
                item.id.clone()
            };
            if ui.button(None, label.as_str()) {
                actions.push(HudAction::SelectBuildItem(item.id.clone()));
            }
        }

        if ui.button(None, "Hub Upgrades") {
            actions.push(HudAction::HubUpgrades);
        }
    });

    ui.pop_skin();
    actions
}

/// Renders the pause overlay and returns the buttons pressed this frame.
pub(crate) fn draw_pause_overlay_ui(ui: &mut Ui, context: &HudUiContext<'_>) -> Vec<HudAction> {
    push_skin(ui);

    let mut actions = Vec::new();
    let rect = pause_overlay_rect(context.viewport);
    let _ = ui.window(
        hash!("pause_overlay"),
        Vec2::new(rect.x, rect.y),
        Vec2::new(rect.w, rect.h),
        |ui| {
            ui.label(None, "Paused");
            if ui.button(None, "Resume") {
                actions.push(HudAction::Resume);
            }
            if ui.button(None, "Save Game") {
                actions.push(HudAction::SaveGame);
            }
            if ui.button(None, "Main Menu") {
                actions.push(HudAction::MainMenu);
            }
        },
    );

    ui.pop_skin();
    actions
}

fn push_skin(ui: &mut Ui) {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    skin.window_style = ui
        .style_builder()
        .color(PANEL_BACKGROUND)
        .color_hovered(PANEL_BACKGROUND)
        .color_clicked(PANEL_BACKGROUND)
        .color_inactive(PANEL_BACKGROUND)
        .text_color(WHITE)
        .margin(RectOffset::new(12.0, 12.0, 12.0, 12.0))
        .build();

    skin.label_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();

    skin.button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .margin(RectOffset::new(4.0, 4.0, 6.0, 6.0))
        .build();

    ui.push_skin(&skin);
}
