use iced::Task;

use super::event::{SignInEffect, SignInEvent, SignInIntent, SignInOutcome};
use super::state::SignInState;

/// Reduce a sign-in intent event into state updates and effects.
pub(crate) fn reduce(
    state: &mut SignInState,
    event: SignInIntent,
) -> Task<SignInEvent> {
    match event {
        SignInIntent::SignInPressed => {
            if !state.begin() {
                log::debug!("sign-in already in progress");
                return Task::none();
            }
            Task::done(SignInEvent::Effect(SignInEffect::StartSignIn))
        },
        SignInIntent::SignInFinished(outcome) => {
            state.finish();
            match outcome {
                SignInOutcome::SignedIn(email) => {
                    log::info!("signed in as {email}; checking access");
                },
                SignInOutcome::Cancelled => {
                    log::info!("sign-in cancelled by user");
                },
                SignInOutcome::Failed(message) => {
                    log::error!("error signing in: {message}");
                },
            }
            Task::none()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_idle_view_when_pressed_then_flow_starts() {
        let mut state = SignInState::default();

        let _task = reduce(&mut state, SignInIntent::SignInPressed);

        assert!(state.in_flight());
    }

    #[test]
    fn given_running_flow_when_pressed_again_then_state_is_kept() {
        let mut state = SignInState::default();
        let _task = reduce(&mut state, SignInIntent::SignInPressed);

        let _task = reduce(&mut state, SignInIntent::SignInPressed);

        assert!(state.in_flight());
    }

    #[test]
    fn given_failed_flow_when_finished_then_button_is_available_again() {
        let mut state = SignInState::default();
        let _task = reduce(&mut state, SignInIntent::SignInPressed);

        let _task = reduce(
            &mut state,
            SignInIntent::SignInFinished(SignInOutcome::Failed(String::from(
                "listener closed",
            ))),
        );

        assert!(!state.in_flight());
    }
}
