use iced::widget::button::Status as ButtonStatus;
use iced::widget::{button, container, row, svg, text};
use iced::{Color, Element, Length, Theme, alignment};

use crate::theme::{IcedColorPalette, ThemeProps};

const BUTTON_HEIGHT: f32 = 40.0;
const BUTTON_PADDING_X: f32 = 16.0;
const BUTTON_FONT_SIZE: f32 = 14.0;
const BUTTON_ICON_SIZE: f32 = 18.0;
const BUTTON_SPACING: f32 = 8.0;
const BUTTON_RADIUS: f32 = 8.0;
const DISABLED_ALPHA: f32 = 0.5;

/// UI events emitted by an action button.
#[derive(Debug, Clone)]
pub(crate) enum ActionButtonEvent {
    Pressed,
}

/// Visual variants for an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActionButtonVariant {
    /// Filled accent button for the main action of a screen.
    Primary,
    /// Bordered surface button.
    Secondary,
    /// Text-only button for low-emphasis actions.
    Subtle,
}

/// Props for rendering an action button.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ActionButtonProps<'a> {
    pub(crate) label: &'a str,
    pub(crate) icon: Option<&'static [u8]>,
    /// Paint the icon with the label color instead of its own colors.
    pub(crate) tint_icon: bool,
    pub(crate) enabled: bool,
    pub(crate) fill_width: bool,
    pub(crate) variant: ActionButtonVariant,
    pub(crate) theme: ThemeProps<'a>,
}

/// Render a labelled button that only emits when enabled.
pub(crate) fn view<'a>(
    props: ActionButtonProps<'a>,
) -> Element<'a, ActionButtonEvent, Theme, iced::Renderer> {
    let palette = props.theme.theme.iced_palette().clone();
    let enabled = props.enabled;
    let variant = props.variant;
    let tint_icon = props.tint_icon;
    let icon_color = button_style(
        &palette,
        ButtonStatus::Active,
        enabled,
        variant,
    )
    .text_color;

    let label = text(props.label)
        .size(BUTTON_FONT_SIZE)
        .align_x(alignment::Horizontal::Center);
    let mut content = row![].spacing(BUTTON_SPACING);
    if let Some(icon) = props.icon {
        let icon = svg::Svg::new(svg::Handle::from_memory(icon))
            .width(Length::Fixed(BUTTON_ICON_SIZE))
            .height(Length::Fixed(BUTTON_ICON_SIZE))
            .style(move |_, _| svg::Style {
                color: tint_icon.then_some(icon_color),
            });
        content = content.push(icon);
    }
    let content = content
        .push(label)
        .align_y(alignment::Vertical::Center);

    let width = if props.fill_width {
        Length::Fill
    } else {
        Length::Shrink
    };
    let content = container(content)
        .width(width)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center);

    let mut button = button(content)
        .padding([0.0, BUTTON_PADDING_X])
        .width(width)
        .height(Length::Fixed(BUTTON_HEIGHT))
        .style(move |_, status| {
            button_style(&palette, status, enabled, variant)
        });

    if enabled {
        button = button.on_press(ActionButtonEvent::Pressed);
    }

    button.into()
}

fn button_style(
    palette: &IcedColorPalette,
    status: ButtonStatus,
    enabled: bool,
    variant: ActionButtonVariant,
) -> iced::widget::button::Style {
    let hovered = enabled
        && matches!(status, ButtonStatus::Hovered | ButtonStatus::Pressed);

    let (background, text_color, border_color) = match variant {
        ActionButtonVariant::Primary => {
            let fill = if hovered {
                palette.dim_accent
            } else {
                palette.accent
            };
            (Some(fill), palette.surface, fill)
        },
        ActionButtonVariant::Secondary => {
            let fill = if hovered {
                palette.overlay
            } else {
                palette.surface
            };
            (Some(fill), palette.foreground, palette.border)
        },
        ActionButtonVariant::Subtle => {
            let color = if hovered {
                palette.bright_foreground
            } else {
                palette.dim_foreground
            };
            (None, color, Color::TRANSPARENT)
        },
    };

    let (background, text_color) = if enabled {
        (background, text_color)
    } else {
        (
            background.map(|color| with_alpha(color, DISABLED_ALPHA)),
            with_alpha(text_color, DISABLED_ALPHA),
        )
    };

    iced::widget::button::Style {
        background: background.map(Into::into),
        text_color,
        border: iced::Border {
            width: 1.0,
            color: border_color,
            radius: iced::border::Radius::from(BUTTON_RADIUS),
        },
        ..Default::default()
    }
}

fn with_alpha(mut color: Color, alpha: f32) -> Color {
    color.a = alpha;
    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ColorPalette;

    fn palette() -> IcedColorPalette {
        IcedColorPalette::from(&ColorPalette::default())
    }

    #[test]
    fn given_hovered_primary_when_styled_then_dim_accent_fills() {
        let palette = palette();

        let style = button_style(
            &palette,
            ButtonStatus::Hovered,
            true,
            ActionButtonVariant::Primary,
        );

        assert_eq!(style.background, Some(palette.dim_accent.into()));
        assert_eq!(style.text_color, palette.surface);
    }

    #[test]
    fn given_disabled_primary_when_hovered_then_fill_is_faded_accent() {
        let palette = palette();

        let style = button_style(
            &palette,
            ButtonStatus::Hovered,
            false,
            ActionButtonVariant::Primary,
        );

        assert_eq!(
            style.background,
            Some(with_alpha(palette.accent, DISABLED_ALPHA).into())
        );
    }

    #[test]
    fn given_subtle_variant_when_styled_then_background_is_absent() {
        let palette = palette();

        let style = button_style(
            &palette,
            ButtonStatus::Active,
            true,
            ActionButtonVariant::Subtle,
        );

        assert!(style.background.is_none());
        assert_eq!(style.text_color, palette.dim_foreground);
    }
}
