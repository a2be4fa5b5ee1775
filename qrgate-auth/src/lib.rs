//! Identity and authorization for qrgate.
//!
//! Two contracts sit at the seams:
//! - [`IdentityProvider`] owns the sign-in session and publishes
//!   [`AuthState`] changes through an [`AuthSubscription`],
//! - [`AllowList`] answers whether an email may use the application.
//!
//! [`verify_access`] composes them into an [`AccessDecision`]. The Google
//! implementation lives in [`google`]; in-memory fakes for tests live in
//! `testing` behind the `testing` feature.

mod access;
mod allow_list;
mod avatar;
mod errors;
pub mod google;
mod identity;
mod provider;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use access::{
    AccessDecision, DENIED_MESSAGE_PREFIX, FAULT_MESSAGE, force_sign_out,
    verify_access,
};
pub use allow_list::{
    AllowList, DEFAULT_COLLECTION, DEFAULT_FIRESTORE_BASE_URL,
    FirestoreAllowList, StaticAllowList,
};
pub use avatar::{AvatarFetcher, MAX_AVATAR_BYTES};
pub use errors::{
    AllowListError, AvatarError, SessionStoreError, SignInError,
};
pub use identity::{AuthState, AuthSubscription, Identity};
pub use provider::IdentityProvider;
