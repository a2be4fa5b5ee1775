use std::sync::Arc;

use iced::Task;
use qrgate_auth::{Identity, SignInError};

use crate::app::{App, AppEvent};
use crate::widgets::sign_in::{
    SignInEffect, SignInEvent, SignInIntent, SignInOutcome,
};

/// Route a sign-in event through the reducer or the identity provider.
pub(crate) fn route(app: &mut App, event: SignInEvent) -> Task<AppEvent> {
    match event {
        SignInEvent::Intent(intent) => {
            app.widgets.sign_in.reduce(intent).map(AppEvent::SignIn)
        },
        SignInEvent::Effect(SignInEffect::StartSignIn) => {
            let provider = Arc::clone(&app.services.identity);
            Task::perform(
                async move { provider.sign_in_with_popup().await },
                |result| {
                    AppEvent::SignIn(SignInEvent::Intent(
                        SignInIntent::SignInFinished(outcome(result)),
                    ))
                },
            )
        },
    }
}

/// The gate learns about a successful sign-in through the auth
/// subscription, so only the email is carried here.
fn outcome(result: Result<Identity, SignInError>) -> SignInOutcome {
    match result {
        Ok(identity) => SignInOutcome::SignedIn(identity.email),
        Err(err) if err.is_cancelled() => SignInOutcome::Cancelled,
        Err(err) => SignInOutcome::Failed(format!("{err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_declined_consent_when_mapped_then_outcome_is_cancelled() {
        let result = Err(SignInError::CallbackRejected {
            reason: String::from("access_denied"),
        });

        assert_eq!(outcome(result), SignInOutcome::Cancelled);
    }

    #[test]
    fn given_timeout_when_mapped_then_outcome_is_failure() {
        assert_eq!(
            outcome(Err(SignInError::Timeout)),
            SignInOutcome::Failed(String::from(
                "sign-in timed out waiting for the browser"
            ))
        );
    }
}
