use std::sync::Arc;

use iced::Task;

use super::{App, AppEvent};
use crate::routers;

/// Thin dispatch: route each event to its owning router.
pub(super) fn update(app: &mut App, event: AppEvent) -> Task<AppEvent> {
    match event {
        AppEvent::IcedReady => restore_session(app),
        AppEvent::Gate(event) => routers::gate::route(app, event),
        AppEvent::SignIn(event) => routers::sign_in::route(app, event),
        AppEvent::Generator(event) => routers::generator::route(app, event),
        AppEvent::Chrome(event) => routers::chrome::route(app, event),
    }
}

/// Ask the provider for its persisted session; the outcome arrives through
/// the auth subscription.
fn restore_session(app: &App) -> Task<AppEvent> {
    let provider = Arc::clone(&app.services.identity);
    Task::future(async move { provider.restore_session().await }).discard()
}
