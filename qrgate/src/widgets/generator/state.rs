use std::sync::Arc;

use iced::widget::image;
use qrgate_render::{
    HexColor, QrOptions, QrRaster, RenderError, is_hex_color_prefix,
    is_valid_size, render,
};

use super::model::{ExportStatus, PreviewModel};

/// Rendered preview, rebuilt whenever the options change.
#[derive(Debug, Clone, Default)]
pub(crate) enum Preview {
    #[default]
    Placeholder,
    TooLong,
    TooDense,
    Ready {
        raster: Arc<QrRaster>,
        handle: image::Handle,
    },
}

/// Which color input an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColorSlot {
    Foreground,
    Background,
}

/// Generator form state.
#[derive(Debug)]
pub(crate) struct GeneratorState {
    options: QrOptions,
    foreground_input: String,
    background_input: String,
    preview: Preview,
    export_status: Option<ExportStatus>,
    exporting: bool,
}

impl Default for GeneratorState {
    fn default() -> Self {
        let options = QrOptions::default();
        Self {
            foreground_input: options.foreground.to_string(),
            background_input: options.background.to_string(),
            options,
            preview: Preview::Placeholder,
            export_status: None,
            exporting: false,
        }
    }
}

impl GeneratorState {
    pub(crate) fn options(&self) -> &QrOptions {
        &self.options
    }

    pub(crate) fn color_input(&self, slot: ColorSlot) -> &str {
        match slot {
            ColorSlot::Foreground => &self.foreground_input,
            ColorSlot::Background => &self.background_input,
        }
    }

    #[cfg(test)]
    pub(crate) fn preview(&self) -> &Preview {
        &self.preview
    }

    pub(crate) fn preview_model(&self) -> PreviewModel<'_> {
        match &self.preview {
            Preview::Placeholder => PreviewModel::Placeholder,
            Preview::TooLong => PreviewModel::TooLong,
            Preview::TooDense => PreviewModel::TooDense,
            Preview::Ready { handle, .. } => PreviewModel::Ready(handle),
        }
    }

    pub(crate) fn export_status(&self) -> Option<&ExportStatus> {
        self.export_status.as_ref()
    }

    pub(crate) fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Export needs a payload and a rendered symbol.
    pub(crate) fn can_download(&self) -> bool {
        !self.exporting
            && self.options.has_payload()
            && matches!(self.preview, Preview::Ready { .. })
    }

    /// Reset stays available unless an export is writing.
    pub(crate) fn can_reset(&self) -> bool {
        !self.exporting
    }

    pub(crate) fn set_payload(&mut self, payload: String) {
        self.options.payload = payload;
        self.export_status = None;
        self.refresh_preview();
    }

    /// Accept `value` if it is a hex prefix; complete values update the
    /// options. Returns whether the input was accepted.
    pub(crate) fn set_color_input(
        &mut self,
        slot: ColorSlot,
        value: String,
    ) -> bool {
        if !is_hex_color_prefix(&value) {
            return false;
        }

        let parsed = HexColor::parse(&value).ok();
        match slot {
            ColorSlot::Foreground => self.foreground_input = value,
            ColorSlot::Background => self.background_input = value,
        }

        if let Some(color) = parsed {
            match slot {
                ColorSlot::Foreground => self.options.foreground = color,
                ColorSlot::Background => self.options.background = color,
            }
            self.refresh_preview();
        }
        true
    }

    pub(crate) fn set_size(&mut self, size: u32) -> bool {
        if !is_valid_size(size) || size == self.options.size {
            return false;
        }
        self.options.size = size;
        self.refresh_preview();
        true
    }

    /// Take the raster to export, marking an export as in flight.
    pub(crate) fn begin_export(&mut self) -> Option<Arc<QrRaster>> {
        if !self.can_download() {
            return None;
        }
        let Preview::Ready { raster, .. } = &self.preview else {
            return None;
        };
        let raster = Arc::clone(raster);
        self.exporting = true;
        self.export_status = None;
        Some(raster)
    }

    pub(crate) fn finish_export(&mut self, status: ExportStatus) {
        self.exporting = false;
        self.export_status = Some(status);
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    fn refresh_preview(&mut self) {
        self.preview = match render(&self.options) {
            Ok(raster) => {
                let handle = image::Handle::from_rgba(
                    raster.size(),
                    raster.size(),
                    raster.pixels().to_vec(),
                );
                Preview::Ready {
                    raster: Arc::new(raster),
                    handle,
                }
            },
            Err(RenderError::EmptyPayload) => Preview::Placeholder,
            Err(RenderError::Encode(err)) => {
                log::debug!("payload does not fit a qr code: {err}");
                Preview::TooLong
            },
            Err(err @ RenderError::TooDense { .. }) => {
                log::debug!("{err}");
                Preview::TooDense
            },
            Err(err) => {
                log::warn!("qr preview failed: {err}");
                Preview::Placeholder
            },
        };
    }
}
