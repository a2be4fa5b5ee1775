use std::hash::{Hash, Hasher};
use std::sync::Arc;

use iced::Subscription;
use iced::futures::StreamExt;
use iced::futures::stream::{self, BoxStream};
use qrgate_auth::IdentityProvider;

use crate::app::{App, AppEvent};
use crate::widgets::gate::{GateEvent, GateIntent};

/// Build the active subscription set from current app state.
pub(super) fn subscription(app: &App) -> Subscription<AppEvent> {
    Subscription::run_with(
        AuthWatch(Arc::clone(&app.services.identity)),
        auth_events,
    )
}

/// Identity of the auth subscription: one stream per provider instance.
struct AuthWatch(Arc<dyn IdentityProvider>);

impl Hash for AuthWatch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as *const ()).hash(state);
    }
}

/// Forward conclusive auth states to the gate until the provider is gone.
fn auth_events(watch: &AuthWatch) -> BoxStream<'static, AppEvent> {
    stream::unfold(watch.0.subscribe(), |mut subscription| async move {
        let state = subscription.next().await?;
        log::debug!("auth state changed");
        let event = AppEvent::Gate(GateEvent::Intent(GateIntent::AuthChanged(
            state,
        )));
        Some((event, subscription))
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use qrgate_auth::testing::FakeIdentityProvider;
    use qrgate_auth::{AuthState, Identity};

    use super::*;

    fn auth_state(event: Option<AppEvent>) -> Option<AuthState> {
        match event {
            Some(AppEvent::Gate(GateEvent::Intent(GateIntent::AuthChanged(
                state,
            )))) => Some(state),
            _ => None,
        }
    }

    #[tokio::test]
    async fn given_provider_when_subscribed_then_current_state_comes_first() {
        let provider = Arc::new(FakeIdentityProvider::signed_out());
        let mut events = auth_events(&AuthWatch(provider.clone()));

        assert_eq!(auth_state(events.next().await), Some(AuthState::SignedOut));

        let ada = Identity::new("ada@example.com");
        provider.emit(AuthState::SignedIn(ada.clone()));

        assert_eq!(
            auth_state(events.next().await),
            Some(AuthState::SignedIn(ada))
        );
    }
}
