use qrgate_auth::Identity;

/// Intent events handled by the chrome reducer.
#[derive(Debug, Clone)]
pub(crate) enum ChromeIntent {
    /// The gate granted or left an authorized session.
    IdentityChanged(Option<Identity>),
    AvatarLoaded {
        url: String,
        result: Result<Vec<u8>, String>,
    },
    SignOutPressed,
}

/// Effect events produced by the chrome reducer.
#[derive(Debug, Clone)]
pub(crate) enum ChromeEffect {
    FetchAvatar(String),
    SignOut,
}

/// Chrome event stream routed through the app update loop.
#[derive(Debug, Clone)]
pub(crate) enum ChromeEvent {
    Intent(ChromeIntent),
    Effect(ChromeEffect),
}
