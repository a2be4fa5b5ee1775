use iced::widget::{Space, column, container, row, text, text_input};
use iced::{Color, Element, Length, Theme, alignment};
use qrgate_render::HexColor;

use super::input_style::text_input_style;
use crate::theme::{ThemeProps, hex_to_color};

const LABEL_FONT_SIZE: f32 = 13.0;
const INPUT_FONT_SIZE: f32 = 14.0;
const INPUT_PADDING_X: f32 = 10.0;
const INPUT_PADDING_Y: f32 = 8.0;
const SWATCH_SIZE: f32 = 36.0;
const SWATCH_BORDER: f32 = 1.0;
const SWATCH_RADIUS: f32 = 6.0;
const FIELD_SPACING: f32 = 6.0;
const ROW_SPACING: f32 = 8.0;

/// UI events emitted by a color field.
#[derive(Debug, Clone)]
pub(crate) enum ColorFieldEvent {
    Changed(String),
}

/// Props for rendering a hex color field with a live swatch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColorFieldProps<'a> {
    pub(crate) label: &'a str,
    /// Raw text as typed, possibly an incomplete hex value.
    pub(crate) value: &'a str,
    /// Last complete color, painted in the swatch.
    pub(crate) color: HexColor,
    pub(crate) theme: ThemeProps<'a>,
}

/// Render a labelled `#rrggbb` input next to a color swatch.
pub(crate) fn view<'a>(
    props: ColorFieldProps<'a>,
) -> Element<'a, ColorFieldEvent, Theme, iced::Renderer> {
    let palette = props.theme.theme.iced_palette();
    let label_color = palette.foreground;
    let border_color = palette.border;
    let swatch_color = hex_to_color(props.color);

    let label = text(props.label)
        .size(LABEL_FONT_SIZE)
        .style(move |_| iced::widget::text::Style {
            color: Some(label_color),
        });

    let input = text_input("#000000", props.value)
        .on_input(ColorFieldEvent::Changed)
        .padding([INPUT_PADDING_Y, INPUT_PADDING_X])
        .size(INPUT_FONT_SIZE)
        .width(Length::Fill)
        .style(text_input_style(props.theme));

    let swatch = container(Space::new())
        .width(Length::Fixed(SWATCH_SIZE))
        .height(Length::Fixed(SWATCH_SIZE))
        .style(move |_| swatch_style(swatch_color, border_color));

    let field = row![swatch, input]
        .spacing(ROW_SPACING)
        .align_y(alignment::Vertical::Center);

    column![label, field]
        .spacing(FIELD_SPACING)
        .width(Length::Fill)
        .into()
}

fn swatch_style(fill: Color, border: Color) -> container::Style {
    container::Style {
        background: Some(fill.into()),
        border: iced::Border {
            width: SWATCH_BORDER,
            color: border,
            radius: iced::border::Radius::from(SWATCH_RADIUS),
        },
        ..Default::default()
    }
}
