use qrgate_auth::Identity;

use super::model::GatePhase;

/// In-memory record of the current sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Session {
    identity: Option<Identity>,
    authorized: bool,
    error: Option<String>,
}

impl Session {
    pub(crate) fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub(crate) fn is_authorized(&self) -> bool {
        self.authorized && self.identity.is_some()
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn grant(&mut self, identity: Identity) {
        self.identity = Some(identity);
        self.authorized = true;
        self.error = None;
    }

    fn refuse(&mut self, error: String) {
        self.identity = None;
        self.authorized = false;
        self.error = Some(error);
    }

    /// Drop identity and authorization, keeping any pending error.
    fn clear(&mut self) {
        self.identity = None;
        self.authorized = false;
    }
}

/// Gate state: session plus lookup bookkeeping.
#[derive(Debug, Default)]
pub(crate) struct GateState {
    session: Session,
    /// A conclusive answer has been applied at least once.
    resolved: bool,
    signing_out: bool,
    pending_request: Option<u64>,
    last_request_id: u64,
}

impl GateState {
    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn phase(&self) -> GatePhase<'_> {
        if !self.resolved || self.signing_out {
            return GatePhase::Loading;
        }

        match self.session.identity() {
            Some(identity) if self.session.is_authorized() => {
                GatePhase::Authorized(identity)
            },
            _ => GatePhase::SignedOut {
                error: self.session.error(),
            },
        }
    }

    pub(crate) fn is_verifying(&self) -> bool {
        self.pending_request.is_some()
    }

    pub(crate) fn pending_request(&self) -> Option<u64> {
        self.pending_request
    }

    /// Start a lookup for `identity`; any earlier lookup becomes stale.
    /// Returns the new request id and whether the session was authorized.
    pub(crate) fn begin_verification(
        &mut self,
        identity: Identity,
    ) -> (u64, bool) {
        let was_authorized = self.session.is_authorized();
        self.last_request_id += 1;
        self.pending_request = Some(self.last_request_id);
        self.session.identity = Some(identity);
        self.session.authorized = false;
        (self.last_request_id, was_authorized)
    }

    /// Return `true` when `request_id` answers the latest lookup.
    pub(crate) fn take_pending(&mut self, request_id: u64) -> bool {
        if self.pending_request != Some(request_id) {
            return false;
        }
        self.pending_request = None;
        true
    }

    pub(crate) fn grant(&mut self, identity: Identity) {
        self.resolved = true;
        self.session.grant(identity);
    }

    pub(crate) fn refuse(&mut self, error: String) {
        self.resolved = true;
        self.session.refuse(error);
    }

    /// Apply a signed-out report. Returns whether the session was
    /// authorized before.
    pub(crate) fn sign_out(&mut self) -> bool {
        let was_authorized = self.session.is_authorized();
        self.resolved = true;
        self.signing_out = false;
        self.pending_request = None;
        self.session.clear();
        was_authorized
    }

    pub(crate) fn set_signing_out(&mut self, signing_out: bool) {
        self.signing_out = signing_out;
    }
}
