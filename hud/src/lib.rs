#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Message bridge between the simulation and the HUD display layer.
//!
//! Delivery is synchronous fan-out to whoever is subscribed at the moment of
//! emission. Nothing is buffered for future subscribers: an event emitted with
//! no listener attached is dropped.

mod display;

use std::{
    cell::RefCell,
    rc::Rc,
    sync::mpsc::{self, Receiver, Sender},
};

use tracing::trace;

pub use display::HudDisplay;

/// Simulation to display notifications.
#[derive(Clone, Debug, PartialEq)]
pub enum HudEvent {
    /// World position under the centre of the viewport, sent every tick.
    CameraCoordsUpdated {
        /// World x coordinate.
        x: f32,
        /// World y coordinate.
        y: f32,
    },
    /// New amount for a named resource counter.
    ResourceCountChanged {
        /// Resource display name.
        resource: String,
        /// New amount.
        amount: i64,
    },
    /// Pause state changed.
    PauseChanged {
        /// Whether the simulation is now paused.
        paused: bool,
    },
    /// The simulation is shutting down; the display should release its resources.
    Teardown,
}

/// Display to simulation requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HudIntent {
    /// Player asked to pause or resume.
    PauseToggleRequested,
    /// Player picked an entry from the build menu.
    BuildItemSelectionRequested(String),
}

#[derive(Debug, Default)]
struct Listeners {
    display: Vec<Sender<HudEvent>>,
    simulation: Vec<Sender<HudIntent>>,
}

/// Cloneable handle to the shared listener registry.
#[derive(Clone, Debug, Default)]
pub struct HudBridge {
    listeners: Rc<RefCell<Listeners>>,
}

impl HudBridge {
    /// Creates a bridge with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a display-side listener.
    #[must_use]
    pub fn subscribe_display(&self) -> Receiver<HudEvent> {
        let (tx, rx) = mpsc::channel();
        self.listeners.borrow_mut().display.push(tx);
        rx
    }

    /// Registers a simulation-side listener.
    #[must_use]
    pub fn subscribe_simulation(&self) -> Receiver<HudIntent> {
        let (tx, rx) = mpsc::channel();
        self.listeners.borrow_mut().simulation.push(tx);
        rx
    }

    /// Delivers an event to every display listener, returning how many received it.
    pub fn emit_to_display(&self, event: HudEvent) -> usize {
        let mut listeners = self.listeners.borrow_mut();
        fan_out(&mut listeners.display, &event)
    }

    /// Delivers an intent to every simulation listener, returning how many received it.
    pub fn emit_to_simulation(&self, intent: HudIntent) -> usize {
        let mut listeners = self.listeners.borrow_mut();
        let delivered = fan_out(&mut listeners.simulation, &intent);
        if delivered == 0 {
            trace!(?intent, "no simulation listener; intent dropped");
        }
        delivered
    }

    /// Sends [`HudEvent::Teardown`] to the display and detaches every listener.
    pub fn teardown(&self) {
        let _ = self.emit_to_display(HudEvent::Teardown);
        let mut listeners = self.listeners.borrow_mut();
        listeners.display.clear();
        listeners.simulation.clear();
    }

    /// Number of attached display listeners.
    #[must_use]
    pub fn display_listeners(&self) -> usize {
        self.listeners.borrow().display.len()
    }

    /// Number of attached simulation listeners.
    #[must_use]
    pub fn simulation_listeners(&self) -> usize {
        self.listeners.borrow().simulation.len()
    }
}

/// Sends a clone to each sender, pruning those whose receiver is gone.
fn fan_out<T: Clone>(senders: &mut Vec<Sender<T>>, message: &T) -> usize {
    senders.retain(|sender| sender.send(message.clone()).is_ok());
    senders.len()
}
