/// View model for the sign-in screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SignInViewModel<'a> {
    /// Message left by the last refused access check.
    pub(crate) error: Option<&'a str>,
    /// A provider flow or the follow-up access check is running.
    pub(crate) is_busy: bool,
}
