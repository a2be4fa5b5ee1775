use async_trait::async_trait;
use secrecy::SecretString;

use crate::errors::SignInError;
use crate::identity::{AuthSubscription, Identity};

/// Owner of the sign-in session.
///
/// Implementations publish every state change to all live subscriptions;
/// signing in or out through this trait is observed there, not through the
/// return values.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn subscribe(&self) -> AuthSubscription;

    /// Resolve the initial `Pending` state from whatever session the
    /// provider persisted earlier.
    async fn restore_session(&self);

    /// Run the interactive sign-in flow.
    async fn sign_in_with_popup(&self) -> Result<Identity, SignInError>;

    async fn sign_out(&self) -> Result<(), SignInError>;

    /// Access token of the current session, if any.
    fn bearer_token(&self) -> Option<SecretString>;
}
