use iced::widget::image;
use qrgate_auth::Identity;

/// View model for the header and footer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChromeViewModel<'a> {
    pub(crate) identity: Option<&'a Identity>,
    /// Decoded display image; `None` renders the initial badge.
    pub(crate) avatar: Option<&'a image::Handle>,
}
