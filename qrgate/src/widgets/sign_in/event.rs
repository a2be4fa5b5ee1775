/// How an interactive sign-in flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SignInOutcome {
    SignedIn(String),
    /// The user closed or declined the consent screen.
    Cancelled,
    Failed(String),
}

/// Intent events handled by the sign-in reducer.
#[derive(Debug, Clone)]
pub(crate) enum SignInIntent {
    SignInPressed,
    SignInFinished(SignInOutcome),
}

/// Effect events produced by the sign-in reducer.
#[derive(Debug, Clone)]
pub(crate) enum SignInEffect {
    /// Run the provider's interactive flow.
    StartSignIn,
}

/// Sign-in event stream routed through the app update loop.
#[derive(Debug, Clone)]
pub(crate) enum SignInEvent {
    Intent(SignInIntent),
    Effect(SignInEffect),
}
