pub(crate) mod event;
pub(crate) mod model;
mod reducer;
mod state;

use iced::Task;

pub(crate) use self::event::{GateEffect, GateEvent, GateIntent};
use self::model::GateViewModel;
use self::state::GateState;

/// Access gate: combines provider auth state with allow-list decisions
/// and decides which top-level view is mounted.
pub(crate) struct GateWidget {
    state: GateState,
}

impl GateWidget {
    /// Create the gate in its initial loading state.
    pub(crate) fn new() -> Self {
        Self {
            state: GateState::default(),
        }
    }

    /// Reduce a gate intent event into state updates and effects.
    pub(crate) fn reduce(&mut self, event: GateIntent) -> Task<GateEvent> {
        reducer::reduce(&mut self.state, event)
    }

    /// Produce the gate view model for rendering.
    pub(crate) fn vm(&self) -> GateViewModel<'_> {
        GateViewModel {
            phase: self.state.phase(),
            is_verifying: self.state.is_verifying(),
        }
    }

    /// Apply an intent and return its effects without scheduling them.
    #[cfg(test)]
    pub(crate) fn apply(&mut self, event: GateIntent) -> Vec<GateEffect> {
        reducer::transition(&mut self.state, event)
    }

    /// Return read-only access to state for tests.
    #[cfg(test)]
    pub(crate) fn state(&self) -> &GateState {
        &self.state
    }
}
