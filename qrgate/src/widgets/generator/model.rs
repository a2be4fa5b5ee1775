use std::path::PathBuf;

use iced::widget::image;
use qrgate_render::HexColor;

/// Result of the last export, shown under the download button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExportStatus {
    Saved(PathBuf),
    Failed(String),
}

/// What the preview area shows.
#[derive(Debug, Clone, Copy)]
pub(crate) enum PreviewModel<'a> {
    /// Nothing to encode yet.
    Placeholder,
    /// The payload does not fit in a symbol.
    TooLong,
    /// The symbol has more modules than the chosen size has pixels.
    TooDense,
    Ready(&'a image::Handle),
}

/// View model for the generator form.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GeneratorViewModel<'a> {
    pub(crate) payload: &'a str,
    pub(crate) foreground_input: &'a str,
    pub(crate) background_input: &'a str,
    pub(crate) foreground: HexColor,
    pub(crate) background: HexColor,
    pub(crate) size: u32,
    pub(crate) preview: PreviewModel<'a>,
    pub(crate) can_download: bool,
    pub(crate) can_reset: bool,
    pub(crate) is_exporting: bool,
    pub(crate) export_status: Option<&'a ExportStatus>,
}
