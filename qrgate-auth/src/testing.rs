//! In-memory doubles for [`IdentityProvider`] and [`AllowList`].

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::watch;

use crate::allow_list::AllowList;
use crate::errors::{AllowListError, SignInError};
use crate::identity::{AuthState, AuthSubscription, Identity};
use crate::provider::IdentityProvider;

pub const FAKE_BEARER_TOKEN: &str = "fake-access-token";

/// Provider whose state is driven by the test.
#[derive(Debug)]
pub struct FakeIdentityProvider {
    state: watch::Sender<AuthState>,
    restored: Mutex<AuthState>,
    next_sign_in: Mutex<Option<Identity>>,
    sign_in_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
    fail_sign_out: AtomicBool,
}

impl FakeIdentityProvider {
    pub fn new(initial: AuthState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            restored: Mutex::new(AuthState::SignedOut),
            next_sign_in: Mutex::new(None),
            sign_in_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
            fail_sign_out: AtomicBool::new(false),
        }
    }

    pub fn signed_in(identity: Identity) -> Self {
        Self::new(AuthState::SignedIn(identity))
    }

    pub fn signed_out() -> Self {
        Self::new(AuthState::SignedOut)
    }

    /// Publish `state` to every subscription.
    pub fn emit(&self, state: AuthState) {
        self.state.send_replace(state);
    }

    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// State published by the next `restore_session` call.
    pub fn restore_to(&self, state: AuthState) {
        *lock(&self.restored) = state;
    }

    /// Identity returned by the next interactive sign-in; without one the
    /// flow fails as if the user closed the browser tab.
    pub fn sign_in_as(&self, identity: Identity) {
        *lock(&self.next_sign_in) = Some(identity);
    }

    pub fn fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    fn subscribe(&self) -> AuthSubscription {
        AuthSubscription::new(self.state.subscribe())
    }

    async fn restore_session(&self) {
        let restored = lock(&self.restored).clone();
        self.emit(restored);
    }

    async fn sign_in_with_popup(&self) -> Result<Identity, SignInError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        let identity = lock(&self.next_sign_in).take().ok_or_else(|| {
            SignInError::CallbackRejected {
                reason: String::from("access_denied"),
            }
        })?;
        self.emit(AuthState::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), SignInError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(SignInError::Status {
                endpoint: "revoke",
                status: 503,
            });
        }
        self.emit(AuthState::SignedOut);
        Ok(())
    }

    fn bearer_token(&self) -> Option<SecretString> {
        self.state
            .borrow()
            .identity()
            .map(|_| SecretString::from(FAKE_BEARER_TOKEN))
    }
}

/// Allow-list that records every lookup as `(email, had_credentials)`.
#[derive(Debug, Default)]
pub struct FakeAllowList {
    emails: BTreeSet<String>,
    failure: Option<u16>,
    lookups: Mutex<Vec<(String, bool)>>,
}

impl FakeAllowList {
    pub fn with_emails<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emails: emails.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Every lookup fails with HTTP `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            failure: Some(status),
            ..Self::default()
        }
    }

    pub fn lookups(&self) -> Vec<(String, bool)> {
        lock(&self.lookups).clone()
    }
}

#[async_trait]
impl AllowList for FakeAllowList {
    async fn contains(
        &self,
        email: &str,
        credentials: Option<&SecretString>,
    ) -> Result<bool, AllowListError> {
        lock(&self.lookups).push((email.to_string(), credentials.is_some()));
        match self.failure {
            Some(status) => Err(AllowListError::Status { status }),
            None => Ok(self.emails.contains(email)),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
