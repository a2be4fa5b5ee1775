//! QR symbol rendering for qrgate.
//!
//! The crate turns a [`QrOptions`] configuration into a square RGBA
//! [`QrRaster`] and serializes that raster as PNG:
//! - [`render`] encodes the payload with a fixed high error-correction level
//!   and scales the module grid (plus quiet zone) to the requested edge size,
//! - [`QrRaster::to_png`] produces `image/png` bytes,
//! - [`export_png`] writes those bytes to `qrcode.png` inside a directory.
//!
//! Symbol encoding itself is delegated to the `qrcode` crate and pixel
//! storage / PNG encoding to `image`.

mod color;
mod errors;
mod export;
mod options;
mod raster;

pub use color::{HexColor, is_hex_color_prefix, is_valid_hex_color};
pub use errors::{RenderError, Result};
pub use export::{
    EXPORT_FILE_NAME, EXPORT_MIME_TYPE, default_export_dir, export_png,
};
pub use options::{
    DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE,
    QUIET_ZONE_MODULES, QrOptions, SIZE_STEP, is_valid_size,
};
pub use raster::{QrRaster, render};
