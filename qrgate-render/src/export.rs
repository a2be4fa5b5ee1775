use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::raster::QrRaster;

pub const EXPORT_FILE_NAME: &str = "qrcode.png";
pub const EXPORT_MIME_TYPE: &str = "image/png";

/// Write `raster` as `qrcode.png` into `dir`, replacing any previous export.
pub fn export_png(raster: &QrRaster, dir: &Path) -> Result<PathBuf> {
    let bytes = raster.to_png()?;
    fs::create_dir_all(dir)?;

    let path = dir.join(EXPORT_FILE_NAME);
    let tmp_path = path.with_extension("png.tmp");
    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, &path)?;

    log::info!("qr code exported to {}", path.display());
    Ok(path)
}

/// Directory used when no export directory is configured.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
