use std::fmt;
use std::str::FromStr;

use crate::errors::RenderError;

/// An opaque sRGB color written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    pub const BLACK: Self = Self::from_rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::from_rgb(0xff, 0xff, 0xff);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a complete `#rrggbb` value (case-insensitive).
    pub fn parse(value: &str) -> Result<Self, RenderError> {
        if !is_valid_hex_color(value) {
            return Err(RenderError::InvalidColor {
                value: value.to_string(),
            });
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&value[range], 16).map_err(|_| {
                RenderError::InvalidColor {
                    value: value.to_string(),
                }
            })
        };

        Ok(Self {
            r: channel(1..3)?,
            g: channel(3..5)?,
            b: channel(5..7)?,
        })
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, u8::MAX]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = RenderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Return `true` for a complete `#rrggbb` value.
pub fn is_valid_hex_color(value: &str) -> bool {
    let mut chars = value.chars();
    if chars.next() != Some('#') || value.len() != 7 {
        return false;
    }
    chars.all(|ch| ch.is_ascii_hexdigit())
}

/// Return `true` while `value` can still grow into a valid color, e.g.
/// `#`, `#1a` or `#1a2b3c`.
pub fn is_hex_color_prefix(value: &str) -> bool {
    let mut chars = value.chars();
    if chars.next() != Some('#') || value.len() > 7 {
        return false;
    }
    chars.all(|ch| ch.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_mixed_case_hex_when_parsed_then_channels_are_decoded() {
        let color = HexColor::parse("#1A2b3C").expect("valid color");

        assert_eq!(color.rgb(), [0x1a, 0x2b, 0x3c]);
        assert_eq!(color.to_string(), "#1a2b3c");
    }

    #[test]
    fn given_short_or_unprefixed_value_when_parsed_then_error_is_returned() {
        assert!(HexColor::parse("#fff").is_err());
        assert!(HexColor::parse("000000").is_err());
        assert!(HexColor::parse("#00000g").is_err());
        assert!(HexColor::parse("#0000000").is_err());
    }

    #[test]
    fn given_partial_input_when_checked_then_prefix_rules_apply() {
        assert!(is_hex_color_prefix("#"));
        assert!(is_hex_color_prefix("#12ab"));
        assert!(is_hex_color_prefix("#12abef"));
        assert!(!is_hex_color_prefix(""));
        assert!(!is_hex_color_prefix("12"));
        assert!(!is_hex_color_prefix("#12abefa"));
        assert!(!is_hex_color_prefix("#xz"));
    }

    #[test]
    fn given_constants_when_formatted_then_defaults_match() {
        assert_eq!(HexColor::BLACK.to_string(), "#000000");
        assert_eq!(HexColor::WHITE.to_string(), "#ffffff");
        assert_eq!(HexColor::WHITE.rgba(), [255, 255, 255, 255]);
    }
}
