use iced::theme::Palette;
use iced::{Color, Theme};
use qrgate_render::HexColor;

/// Hex palette the UI is styled from.
#[derive(Debug, Clone)]
pub(crate) struct ColorPalette {
    pub(crate) foreground: String,
    pub(crate) background: String,
    pub(crate) surface: String,
    pub(crate) overlay: String,
    pub(crate) border: String,
    pub(crate) accent: String,
    pub(crate) dim_accent: String,
    pub(crate) accent_surface: String,
    pub(crate) danger: String,
    pub(crate) danger_surface: String,
    pub(crate) dim_foreground: String,
    pub(crate) bright_foreground: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            foreground: String::from("#374151"),
            background: String::from("#F9FAFB"),
            surface: String::from("#FFFFFF"),
            overlay: String::from("#F3F4F6"),
            border: String::from("#E5E7EB"),
            accent: String::from("#2563EB"),
            dim_accent: String::from("#1D4ED8"),
            accent_surface: String::from("#DBEAFE"),
            danger: String::from("#B91C1C"),
            danger_surface: String::from("#FEF2F2"),
            dim_foreground: String::from("#9CA3AF"),
            bright_foreground: String::from("#111827"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct IcedColorPalette {
    pub(crate) foreground: Color,
    pub(crate) background: Color,
    pub(crate) surface: Color,
    pub(crate) overlay: Color,
    pub(crate) border: Color,
    pub(crate) accent: Color,
    pub(crate) dim_accent: Color,
    pub(crate) accent_surface: Color,
    pub(crate) danger: Color,
    pub(crate) danger_surface: Color,
    pub(crate) dim_foreground: Color,
    pub(crate) bright_foreground: Color,
}

impl From<&ColorPalette> for IcedColorPalette {
    fn from(p: &ColorPalette) -> Self {
        Self {
            foreground: parse_hex_color(&p.foreground),
            background: parse_hex_color(&p.background),
            surface: parse_hex_color(&p.surface),
            overlay: parse_hex_color(&p.overlay),
            border: parse_hex_color(&p.border),
            accent: parse_hex_color(&p.accent),
            dim_accent: parse_hex_color(&p.dim_accent),
            accent_surface: parse_hex_color(&p.accent_surface),
            danger: parse_hex_color(&p.danger),
            danger_surface: parse_hex_color(&p.danger_surface),
            dim_foreground: parse_hex_color(&p.dim_foreground),
            bright_foreground: parse_hex_color(&p.bright_foreground),
        }
    }
}

/// Parse `#rrggbb` into an iced color; anything else renders magenta.
pub(crate) fn parse_hex_color(value: &str) -> Color {
    match HexColor::parse(value) {
        Ok(color) => hex_to_color(color),
        Err(_) => Color::from_rgb8(0xff, 0x00, 0xff),
    }
}

pub(crate) fn hex_to_color(color: HexColor) -> Color {
    let [r, g, b] = color.rgb();
    Color::from_rgb8(r, g, b)
}

/// Global application theme.
#[derive(Debug, Clone)]
pub(crate) struct AppTheme {
    id: String,
    iced_palette: IcedColorPalette,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::from_palette(String::from("qrgate-light"), &ColorPalette::default())
    }
}

impl From<&AppTheme> for Theme {
    fn from(value: &AppTheme) -> Self {
        let palette = &value.iced_palette;
        let palette = Palette {
            background: palette.background,
            text: palette.foreground,
            primary: palette.accent,
            success: Color::from_rgb8(0x16, 0xA3, 0x4A),
            danger: palette.danger,
            warning: Color::from_rgb8(0xD9, 0x77, 0x06),
        };

        Theme::custom(value.id.clone(), palette)
    }
}

impl AppTheme {
    pub(crate) fn from_palette(id: String, raw_palette: &ColorPalette) -> Self {
        Self {
            id,
            iced_palette: IcedColorPalette::from(raw_palette),
        }
    }

    pub(crate) fn iced_palette(&self) -> &IcedColorPalette {
        &self.iced_palette
    }
}

/// Theme props passed through App -> Widget -> Component.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ThemeProps<'a> {
    pub(crate) theme: &'a AppTheme,
}

impl<'a> ThemeProps<'a> {
    pub(crate) fn new(theme: &'a AppTheme) -> Self {
        Self { theme }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_hex_palette_when_converted_then_channels_match() {
        let palette = IcedColorPalette::from(&ColorPalette::default());

        assert_eq!(palette.surface, Color::WHITE);
        assert_eq!(palette.accent, Color::from_rgb8(0x25, 0x63, 0xEB));
    }

    #[test]
    fn given_invalid_hex_when_parsed_then_fallback_color_is_used() {
        assert_eq!(parse_hex_color("blue"), Color::from_rgb8(255, 0, 255));
    }
}
