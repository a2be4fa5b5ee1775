use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            photo_url: None,
        }
    }

    /// Name to show in the UI, falling back to the email.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }

    /// Uppercase first character of [`Identity::label`].
    pub fn initial(&self) -> char {
        self.label()
            .chars()
            .next()
            .map(|ch| ch.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The provider is still restoring its own session.
    Pending,
    SignedOut,
    SignedIn(Identity),
}

impl AuthState {
    pub fn is_conclusive(&self) -> bool {
        !matches!(self, AuthState::Pending)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::SignedIn(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Long-lived stream of conclusive auth states.
///
/// The first call to [`AuthSubscription::next`] yields the current state as
/// soon as it is conclusive; later calls yield each change. Dropping the
/// subscription unsubscribes.
#[derive(Debug)]
pub struct AuthSubscription {
    receiver: watch::Receiver<AuthState>,
}

impl AuthSubscription {
    pub fn new(mut receiver: watch::Receiver<AuthState>) -> Self {
        receiver.mark_changed();
        Self { receiver }
    }

    /// Wait for the next conclusive state. Returns `None` once the provider
    /// is gone.
    pub async fn next(&mut self) -> Option<AuthState> {
        loop {
            self.receiver.changed().await.ok()?;
            let state = self.receiver.borrow_and_update().clone();
            if state.is_conclusive() {
                return Some(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_identity_without_name_when_labelled_then_email_is_used() {
        let identity = Identity::new("ada@example.com");

        assert_eq!(identity.label(), "ada@example.com");
        assert_eq!(identity.initial(), 'A');
    }

    #[test]
    fn given_identity_with_name_when_labelled_then_name_is_used() {
        let identity = Identity {
            display_name: Some(String::from("grace hopper")),
            ..Identity::new("grace@example.com")
        };

        assert_eq!(identity.label(), "grace hopper");
        assert_eq!(identity.initial(), 'G');
    }

    #[tokio::test]
    async fn given_pending_state_when_resolved_then_conclusive_state_fires() {
        let (tx, rx) = watch::channel(AuthState::Pending);
        let mut subscription = AuthSubscription::new(rx);

        tx.send_replace(AuthState::SignedOut);

        assert_eq!(subscription.next().await, Some(AuthState::SignedOut));
    }

    #[tokio::test]
    async fn given_conclusive_state_when_subscribed_then_it_fires_immediately() {
        let identity = Identity::new("ada@example.com");
        let (_tx, rx) = watch::channel(AuthState::SignedIn(identity.clone()));
        let mut subscription = AuthSubscription::new(rx);

        assert_eq!(
            subscription.next().await,
            Some(AuthState::SignedIn(identity))
        );
    }

    #[tokio::test]
    async fn given_state_changes_when_polled_then_each_change_is_delivered() {
        let identity = Identity::new("ada@example.com");
        let (tx, rx) = watch::channel(AuthState::SignedOut);
        let mut subscription = AuthSubscription::new(rx);
        assert_eq!(subscription.next().await, Some(AuthState::SignedOut));

        tx.send_replace(AuthState::SignedIn(identity.clone()));
        assert_eq!(
            subscription.next().await,
            Some(AuthState::SignedIn(identity))
        );

        tx.send_replace(AuthState::SignedOut);
        assert_eq!(subscription.next().await, Some(AuthState::SignedOut));
    }

    #[tokio::test]
    async fn given_dropped_provider_when_polled_then_stream_ends() {
        let (tx, rx) = watch::channel(AuthState::Pending);
        let mut subscription = AuthSubscription::new(rx);
        drop(tx);

        assert_eq!(subscription.next().await, None);
    }
}
