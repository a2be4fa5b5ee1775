use std::path::PathBuf;
use std::sync::Arc;

use qrgate_render::QrRaster;

/// Intent events handled by the generator reducer.
#[derive(Debug, Clone)]
pub(crate) enum GeneratorIntent {
    PayloadChanged(String),
    ForegroundChanged(String),
    BackgroundChanged(String),
    SizeChanged(u32),
    Download,
    ExportFinished(Result<PathBuf, String>),
    /// Restore the default form, from the Reset button or on unmount.
    Reset,
}

/// Effect events produced by the generator reducer.
#[derive(Debug, Clone)]
pub(crate) enum GeneratorEffect {
    /// Write the rendered raster to the export directory.
    Export(Arc<QrRaster>),
}

/// Generator event stream routed through the app update loop.
#[derive(Debug, Clone)]
pub(crate) enum GeneratorEvent {
    Intent(GeneratorIntent),
    Effect(GeneratorEffect),
}
