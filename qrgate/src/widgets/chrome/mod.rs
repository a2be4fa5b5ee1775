pub(crate) mod event;
pub(crate) mod model;
mod reducer;
mod state;
pub(crate) mod view;

use iced::Task;

pub(crate) use self::event::{ChromeEffect, ChromeEvent, ChromeIntent};
use self::model::ChromeViewModel;
use self::state::ChromeState;

/// Header and footer shown around the generator while authorized.
pub(crate) struct ChromeWidget {
    state: ChromeState,
}

impl ChromeWidget {
    pub(crate) fn new() -> Self {
        Self {
            state: ChromeState::default(),
        }
    }

    /// Reduce a chrome intent event into state updates and effects.
    pub(crate) fn reduce(&mut self, event: ChromeIntent) -> Task<ChromeEvent> {
        reducer::reduce(&mut self.state, event)
    }

    /// Produce the chrome view model for rendering.
    pub(crate) fn vm(&self) -> ChromeViewModel<'_> {
        ChromeViewModel {
            identity: self.state.identity(),
            avatar: self.state.avatar_handle(),
        }
    }
}
