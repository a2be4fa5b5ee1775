use iced::widget::text_input;
use iced::{Border, Theme};

use crate::theme::ThemeProps;

const INPUT_RADIUS: f32 = 8.0;

/// Text input style shared by form fields.
pub(crate) fn text_input_style(
    theme: ThemeProps<'_>,
) -> impl Fn(&Theme, text_input::Status) -> text_input::Style + 'static {
    let palette = theme.theme.iced_palette().clone();
    move |base: &Theme, status| {
        let mut style = text_input::default(base, status);
        let border_color = match status {
            text_input::Status::Focused { .. } => palette.accent,
            _ => palette.border,
        };
        style.background = palette.surface.into();
        style.border = Border {
            width: 1.0,
            color: border_color,
            radius: INPUT_RADIUS.into(),
        };
        style.value = palette.bright_foreground;
        style.placeholder = palette.dim_foreground;
        style.selection = palette.accent_surface;
        style
    }
}
