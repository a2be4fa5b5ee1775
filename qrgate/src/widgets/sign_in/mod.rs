pub(crate) mod event;
pub(crate) mod model;
mod reducer;
mod state;
pub(crate) mod view;

use iced::Task;

pub(crate) use self::event::{
    SignInEffect, SignInEvent, SignInIntent, SignInOutcome,
};
use self::model::SignInViewModel;
use self::state::SignInState;

/// Sign-in screen with a single provider action.
pub(crate) struct SignInWidget {
    state: SignInState,
}

impl SignInWidget {
    pub(crate) fn new() -> Self {
        Self {
            state: SignInState::default(),
        }
    }

    /// Reduce a sign-in intent event into state updates and effects.
    pub(crate) fn reduce(&mut self, event: SignInIntent) -> Task<SignInEvent> {
        reducer::reduce(&mut self.state, event)
    }

    /// Produce the view model; `error` and `is_verifying` come from the gate.
    pub(crate) fn vm<'a>(
        &self,
        error: Option<&'a str>,
        is_verifying: bool,
    ) -> SignInViewModel<'a> {
        SignInViewModel {
            error,
            is_busy: self.state.in_flight() || is_verifying,
        }
    }
}
