use qrcode::EcLevel;

use crate::color::HexColor;

pub const MIN_SIZE: u32 = 128;
pub const MAX_SIZE: u32 = 512;
pub const SIZE_STEP: u32 = 32;
pub const DEFAULT_SIZE: u32 = 256;
pub const DEFAULT_FOREGROUND: &str = "#000000";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Light modules drawn around the symbol on every side.
pub const QUIET_ZONE_MODULES: usize = 4;

/// Error correction is not configurable.
pub(crate) const EC_LEVEL: EcLevel = EcLevel::H;

/// Everything needed to draw one QR symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrOptions {
    pub payload: String,
    pub foreground: HexColor,
    pub background: HexColor,
    pub size: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            payload: String::new(),
            foreground: HexColor::BLACK,
            background: HexColor::WHITE,
            size: DEFAULT_SIZE,
        }
    }
}

impl QrOptions {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            ..Self::default()
        }
    }

    pub fn with_colors(
        mut self,
        foreground: HexColor,
        background: HexColor,
    ) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn has_payload(&self) -> bool {
        !self.payload.is_empty()
    }
}

/// Return `true` for sizes the slider can produce.
pub fn is_valid_size(size: u32) -> bool {
    (MIN_SIZE..=MAX_SIZE).contains(&size) && (size - MIN_SIZE) % SIZE_STEP == 0
}
