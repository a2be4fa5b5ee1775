use std::io;

use thiserror::Error;

/// Errors emitted while rendering or exporting a QR symbol.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to encode: payload is empty")]
    EmptyPayload,

    #[error("payload cannot be encoded: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("invalid color {value:?}, expected #rrggbb")]
    InvalidColor { value: String },

    #[error("invalid size {size}px")]
    InvalidSize { size: u32 },

    #[error("{modules} modules do not fit in {size}px")]
    TooDense { modules: usize, size: u32 },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
