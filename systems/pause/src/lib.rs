#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Single writer of the session's pause state.

use foundry_core::PauseState;
use tracing::info;

/// Owns the running/paused flag; every other component only reads it.
#[derive(Clone, Copy, Debug, Default)]
pub struct PauseCoordinator {
    state: PauseState,
}

impl PauseCoordinator {
    /// Creates a coordinator in the running state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: PauseState::Running,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> PauseState {
        self.state
    }

    /// Flips the state and returns the new one so callers can broadcast it.
    pub fn toggle(&mut self) -> PauseState {
        self.state = self.state.toggled();
        info!(paused = self.state.is_paused(), "pause state changed");
        self.state
    }

    /// Resumes if paused, returning the new state when a transition happened.
    pub fn force_resume(&mut self) -> Option<PauseState> {
        if !self.state.is_paused() {
            return None;
        }
        Some(self.toggle())
    }
}
