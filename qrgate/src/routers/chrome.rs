use iced::Task;

use crate::app::{App, AppEvent};
use crate::widgets::chrome::{ChromeEffect, ChromeEvent, ChromeIntent};
use crate::widgets::gate::{GateEvent, GateIntent};

/// Route a chrome event through the reducer or map its effects.
pub(crate) fn route(app: &mut App, event: ChromeEvent) -> Task<AppEvent> {
    match event {
        ChromeEvent::Intent(intent) => {
            app.widgets.chrome.reduce(intent).map(AppEvent::Chrome)
        },
        ChromeEvent::Effect(effect) => route_effect(app, effect),
    }
}

fn route_effect(app: &App, effect: ChromeEffect) -> Task<AppEvent> {
    match effect {
        ChromeEffect::FetchAvatar(url) => {
            let avatars = app.services.avatars.clone();
            let request_url = url.clone();
            Task::perform(
                async move {
                    avatars
                        .fetch(&request_url)
                        .await
                        .map_err(|err| format!("{err}"))
                },
                move |result| {
                    AppEvent::Chrome(ChromeEvent::Intent(
                        ChromeIntent::AvatarLoaded { url, result },
                    ))
                },
            )
        },
        ChromeEffect::SignOut => Task::done(AppEvent::Gate(GateEvent::Intent(
            GateIntent::SignOutRequested,
        ))),
    }
}
