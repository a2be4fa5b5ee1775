use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignInError {
    #[error("google sign-in is not configured: missing client id")]
    NotConfigured,

    #[error("failed to open the browser: {0}")]
    Browser(#[source] io::Error),

    #[error("failed to listen for the sign-in callback: {0}")]
    Listener(#[source] io::Error),

    #[error("sign-in timed out waiting for the browser")]
    Timeout,

    #[error("sign-in callback rejected: {reason}")]
    CallbackRejected { reason: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: u16,
    },

    #[error("identity has no email address")]
    MissingEmail,

    #[error("token response has no id_token to exchange with firebase")]
    MissingIdToken,

    #[error("session store error: {0}")]
    SessionStore(#[from] SessionStoreError),
}

impl SignInError {
    /// The user closed or declined the consent screen.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            SignInError::CallbackRejected { reason } if reason == "access_denied"
        )
    }
}

#[derive(Debug, Error)]
pub enum AllowListError {
    #[error("allow-list request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("allow-list lookup returned HTTP {status}")]
    Status { status: u16 },

    #[error("invalid allow-list endpoint {base_url:?}")]
    InvalidEndpoint { base_url: String },
}

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("avatar request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("avatar is larger than {limit} bytes")]
    TooLarge { limit: usize },
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session file i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("session file is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}
