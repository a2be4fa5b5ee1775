use std::sync::Arc;

use iced::Task;
use qrgate_auth::{Identity, force_sign_out, verify_access};

use crate::app::{App, AppEvent};
use crate::widgets::chrome::{ChromeEvent, ChromeIntent};
use crate::widgets::gate::{GateEffect, GateEvent, GateIntent};
use crate::widgets::generator::{GeneratorEvent, GeneratorIntent};

/// Route a gate event: intents go through the reducer, effects become
/// provider and allow-list tasks.
pub(crate) fn route(app: &mut App, event: GateEvent) -> Task<AppEvent> {
    match event {
        GateEvent::Intent(intent) => route_intent(app, intent),
        GateEvent::Effect(effect) => route_effect(app, effect),
    }
}

fn route_intent(app: &mut App, intent: GateIntent) -> Task<AppEvent> {
    app.widgets.gate.reduce(intent).map(AppEvent::Gate)
}

fn route_effect(app: &App, effect: GateEffect) -> Task<AppEvent> {
    match effect {
        GateEffect::VerifyAccess {
            request_id,
            identity,
        } => {
            let provider = Arc::clone(&app.services.identity);
            let allow_list = Arc::clone(&app.services.allow_list);
            Task::perform(
                async move {
                    verify_access(
                        provider.as_ref(),
                        allow_list.as_ref(),
                        identity,
                    )
                    .await
                },
                move |decision| {
                    gate_intent(GateIntent::DecisionReady {
                        request_id,
                        decision,
                    })
                },
            )
        },
        GateEffect::ForceSignOut => {
            let provider = Arc::clone(&app.services.identity);
            Task::future(
                async move { force_sign_out(provider.as_ref()).await },
            )
            .discard()
        },
        GateEffect::SignOut => {
            let provider = Arc::clone(&app.services.identity);
            Task::perform(
                async move {
                    provider.sign_out().await.map_err(|err| format!("{err}"))
                },
                |result| gate_intent(GateIntent::SignOutFinished(result)),
            )
        },
        GateEffect::Authorized(_) | GateEffect::LeftAuthorized => {
            Task::batch(follow_ups(&effect).into_iter().map(Task::done))
        },
    }
}

/// Widget events that follow a gate effect without any I/O.
pub(crate) fn follow_ups(effect: &GateEffect) -> Vec<AppEvent> {
    match effect {
        GateEffect::Authorized(identity) => {
            vec![chrome_identity(Some(identity.clone()))]
        },
        GateEffect::LeftAuthorized => vec![
            AppEvent::Generator(GeneratorEvent::Intent(GeneratorIntent::Reset)),
            chrome_identity(None),
        ],
        GateEffect::VerifyAccess { .. }
        | GateEffect::ForceSignOut
        | GateEffect::SignOut => Vec::new(),
    }
}

fn chrome_identity(identity: Option<Identity>) -> AppEvent {
    AppEvent::Chrome(ChromeEvent::Intent(ChromeIntent::IdentityChanged(
        identity,
    )))
}

fn gate_intent(intent: GateIntent) -> AppEvent {
    AppEvent::Gate(GateEvent::Intent(intent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_left_authorized_when_followed_then_form_and_chrome_are_cleared()
    {
        let events = follow_ups(&GateEffect::LeftAuthorized);

        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            AppEvent::Generator(GeneratorEvent::Intent(GeneratorIntent::Reset))
        ));
        assert!(matches!(
            events[1],
            AppEvent::Chrome(ChromeEvent::Intent(
                ChromeIntent::IdentityChanged(None)
            ))
        ));
    }

    #[test]
    fn given_authorized_when_followed_then_chrome_shows_identity() {
        let ada = Identity::new("ada@example.com");

        let events = follow_ups(&GateEffect::Authorized(ada.clone()));

        match events.as_slice() {
            [
                AppEvent::Chrome(ChromeEvent::Intent(
                    ChromeIntent::IdentityChanged(Some(identity)),
                )),
            ] => assert_eq!(identity, &ada),
            _ => panic!("expected a single chrome identity event"),
        }
    }

    #[test]
    fn given_io_effects_when_followed_then_no_widget_events() {
        assert!(follow_ups(&GateEffect::ForceSignOut).is_empty());
        assert!(follow_ups(&GateEffect::SignOut).is_empty());
    }
}
