//! Display-side model of the HUD: the text and counters a renderer draws.

use std::sync::mpsc::Receiver;

use foundry_core::catalog::HUD_RESOURCES;
use tracing::{debug, warn};

use crate::{HudBridge, HudEvent, HudIntent};

/// HUD state fed by bridge events; also the display's way to send intents.
#[derive(Debug)]
pub struct HudDisplay {
    bridge: HudBridge,
    events: Receiver<HudEvent>,
    coords_text: String,
    counters: Vec<(&'static str, i64)>,
    paused: bool,
    torn_down: bool,
}

impl HudDisplay {
    /// Subscribes a fresh display to the bridge.
    #[must_use]
    pub fn attach(bridge: &HudBridge) -> Self {
        Self {
            bridge: bridge.clone(),
            events: bridge.subscribe_display(),
            coords_text: coords_text(0.0, 0.0),
            counters: HUD_RESOURCES.iter().map(|name| (*name, 0)).collect(),
            paused: false,
            torn_down: false,
        }
    }

    /// Applies every pending event, returning how many were processed.
    pub fn drain(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
            processed += 1;
        }
        processed
    }

    /// Applies a single event.
    pub fn apply(&mut self, event: HudEvent) {
        match event {
            HudEvent::CameraCoordsUpdated { x, y } => self.coords_text = coords_text(x, y),
            HudEvent::ResourceCountChanged { resource, amount } => {
                match self
                    .counters
                    .iter_mut()
                    .find(|(name, _)| *name == resource)
                {
                    Some((_, count)) => *count = amount,
                    None => warn!(%resource, "unknown resource in HUD update"),
                }
            }
            HudEvent::PauseChanged { paused } => self.paused = paused,
            HudEvent::Teardown => {
                debug!("HUD torn down");
                self.torn_down = true;
            }
        }
    }

    /// Asks the simulation to pause or resume.
    pub fn request_pause_toggle(&self) {
        let _ = self.bridge.emit_to_simulation(HudIntent::PauseToggleRequested);
    }

    /// Asks the simulation to select or toggle a build item.
    pub fn request_build_item(&self, id: &str) {
        let _ = self
            .bridge
            .emit_to_simulation(HudIntent::BuildItemSelectionRequested(id.to_owned()));
    }

    /// Camera readout, e.g. `World: (1600, 1600)`.
    #[must_use]
    pub fn coords_text(&self) -> &str {
        &self.coords_text
    }

    /// Resource counters in display order.
    pub fn counters(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        self.counters.iter().copied()
    }

    /// Current amount for a named resource.
    #[must_use]
    pub fn resource_count(&self, resource: &str) -> Option<i64> {
        self.counters
            .iter()
            .find(|(name, _)| *name == resource)
            .map(|(_, amount)| *amount)
    }

    /// Whether the pause overlay should be shown.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the simulation has released the HUD.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

fn coords_text(x: f32, y: f32) -> String {
    format!("World: ({}, {})", x.round() as i64, y.round() as i64)
}
