use qrgate_auth::{AccessDecision, AuthState, Identity};

/// Intent events handled by the gate reducer.
#[derive(Debug, Clone)]
pub(crate) enum GateIntent {
    /// The identity provider reported a conclusive state.
    AuthChanged(AuthState),
    /// An allow-list lookup finished.
    DecisionReady {
        request_id: u64,
        decision: AccessDecision,
    },
    /// The user asked to sign out.
    SignOutRequested,
    /// A manual sign-out request finished.
    SignOutFinished(Result<(), String>),
}

/// Effect events produced by the gate reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GateEffect {
    VerifyAccess { request_id: u64, identity: Identity },
    /// End the provider session after a refused decision.
    ForceSignOut,
    SignOut,
    Authorized(Identity),
    LeftAuthorized,
}

/// Gate event stream routed through the app update loop.
#[derive(Debug, Clone)]
pub(crate) enum GateEvent {
    Intent(GateIntent),
    Effect(GateEffect),
}
