use crate::allow_list::AllowList;
use crate::identity::Identity;
use crate::provider::IdentityProvider;

pub const DENIED_MESSAGE_PREFIX: &str = "Access denied. The email";
pub const FAULT_MESSAGE: &str =
    "Error verifying permissions. Please try again.";

/// Outcome of checking a signed-in identity against the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Authorized(Identity),
    Denied { email: String },
    Fault { reason: String },
}

impl AccessDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, AccessDecision::Authorized(_))
    }

    /// User-facing message for a refused decision.
    pub fn message(&self) -> Option<String> {
        match self {
            AccessDecision::Authorized(_) => None,
            AccessDecision::Denied { email } => Some(format!(
                "{DENIED_MESSAGE_PREFIX} {email} is not authorized."
            )),
            AccessDecision::Fault { .. } => Some(FAULT_MESSAGE.to_string()),
        }
    }
}

/// Look `identity` up in `allow_list` using the provider's current
/// credentials.
///
/// Refused decisions leave the session signed in; callers end it with
/// [`force_sign_out`] once the decision has been applied.
pub async fn verify_access(
    provider: &dyn IdentityProvider,
    allow_list: &dyn AllowList,
    identity: Identity,
) -> AccessDecision {
    let token = provider.bearer_token();
    match allow_list.contains(&identity.email, token.as_ref()).await {
        Ok(true) => {
            log::info!("access granted to {}", identity.email);
            AccessDecision::Authorized(identity)
        },
        Ok(false) => {
            log::info!("access denied to {}", identity.email);
            AccessDecision::Denied {
                email: identity.email,
            }
        },
        Err(err) => {
            log::error!("error checking authorization: {err}");
            AccessDecision::Fault {
                reason: err.to_string(),
            }
        },
    }
}

/// End the session after a refused decision. Failures are logged only.
pub async fn force_sign_out(provider: &dyn IdentityProvider) {
    if let Err(err) = provider.sign_out().await {
        log::warn!("forced sign-out failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeAllowList, FakeIdentityProvider};

    fn ada() -> Identity {
        Identity::new("ada@example.com")
    }

    #[tokio::test]
    async fn given_listed_email_when_verified_then_access_is_authorized() {
        let provider = FakeIdentityProvider::signed_in(ada());
        let allow_list = FakeAllowList::with_emails(["ada@example.com"]);

        let decision = verify_access(&provider, &allow_list, ada()).await;

        assert_eq!(decision, AccessDecision::Authorized(ada()));
        assert_eq!(decision.message(), None);
        assert_eq!(provider.sign_out_calls(), 0);
    }

    #[tokio::test]
    async fn given_unlisted_email_when_verified_then_access_is_denied() {
        let provider = FakeIdentityProvider::signed_in(ada());
        let allow_list = FakeAllowList::with_emails(["grace@example.com"]);

        let decision = verify_access(&provider, &allow_list, ada()).await;

        assert_eq!(
            decision.message().as_deref(),
            Some("Access denied. The email ada@example.com is not authorized.")
        );
        assert_eq!(provider.sign_out_calls(), 0);
    }

    #[tokio::test]
    async fn given_lookup_failure_when_verified_then_fault_is_reported() {
        let provider = FakeIdentityProvider::signed_in(ada());
        let allow_list = FakeAllowList::failing(500);

        let decision = verify_access(&provider, &allow_list, ada()).await;

        assert!(matches!(decision, AccessDecision::Fault { .. }));
        assert_eq!(decision.message().as_deref(), Some(FAULT_MESSAGE));
    }

    #[tokio::test]
    async fn given_bearer_token_when_verified_then_it_reaches_the_allow_list() {
        let provider = FakeIdentityProvider::signed_in(ada());
        let allow_list = FakeAllowList::with_emails(["ada@example.com"]);

        let _ = verify_access(&provider, &allow_list, ada()).await;

        assert_eq!(allow_list.lookups(), vec![(
            String::from("ada@example.com"),
            true
        )]);
    }

    #[tokio::test]
    async fn given_failing_sign_out_when_forced_then_error_is_swallowed() {
        let provider = FakeIdentityProvider::signed_in(ada());
        provider.fail_sign_out(true);

        force_sign_out(&provider).await;

        assert_eq!(provider.sign_out_calls(), 1);
    }
}
