use qrgate_auth::Identity;

/// What the root view should mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GatePhase<'a> {
    Loading,
    SignedOut { error: Option<&'a str> },
    Authorized(&'a Identity),
}

/// View model for the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GateViewModel<'a> {
    pub(crate) phase: GatePhase<'a>,
    /// An allow-list lookup is in flight.
    pub(crate) is_verifying: bool,
}
