//! Google OAuth 2.0 identity provider.
//!
//! Interactive sign-in is the installed-app flow: an authorization-code
//! request with PKCE is opened in the system browser, and the redirect is
//! caught by a one-shot listener on `127.0.0.1`. The refresh token is kept
//! in a [`SessionStore`] so the next launch can skip the browser. When a
//! Firebase API key is configured, Google's ID token is exchanged for a
//! Firebase ID token, which is the bearer credential Firestore accepts.

mod oauth;
mod provider;
mod session;

pub use oauth::{
    AUTHORIZE_URL, CALLBACK_PATH, CALLBACK_TIMEOUT, FIREBASE_SIGN_IN_URL,
    REVOKE_URL, TOKEN_URL, USERINFO_URL,
};
pub use provider::{GoogleConfig, GoogleEndpoints, GoogleIdentityProvider};
pub use session::SessionStore;
