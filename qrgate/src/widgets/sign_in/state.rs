/// Sign-in view state.
#[derive(Debug, Default)]
pub(crate) struct SignInState {
    in_flight: bool,
}

impl SignInState {
    /// Return whether an interactive flow is running.
    pub(crate) fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Mark a flow as started. Returns `false` if one was already running.
    pub(crate) fn begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub(crate) fn finish(&mut self) {
        self.in_flight = false;
    }
}
