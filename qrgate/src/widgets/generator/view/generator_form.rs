use iced::widget::{
    Column, column, container, image, row, slider, text, text_input,
};
use iced::{Color, Element, Length, Shadow, Theme, Vector, alignment};
use qrgate_render::{MAX_SIZE, MIN_SIZE, SIZE_STEP};

use crate::components::primitive::action_button::{
    ActionButtonProps, ActionButtonVariant, view as action_button_view,
};
use crate::components::primitive::color_field::{
    ColorFieldEvent, ColorFieldProps, view as color_field_view,
};
use crate::components::primitive::input_style::text_input_style;
use crate::icons::DOWNLOAD;
use crate::theme::{IcedColorPalette, ThemeProps};
use crate::widgets::generator::event::{GeneratorEvent, GeneratorIntent};
use crate::widgets::generator::model::{
    ExportStatus, GeneratorViewModel, PreviewModel,
};

const CARD_MAX_WIDTH: f32 = 640.0;
const CARD_PADDING: f32 = 32.0;
const CARD_RADIUS: f32 = 12.0;
const CARD_SPACING: f32 = 24.0;

const TITLE_FONT_SIZE: f32 = 20.0;
const LABEL_FONT_SIZE: f32 = 13.0;
const INPUT_FONT_SIZE: f32 = 15.0;
const INPUT_PADDING_X: f32 = 16.0;
const INPUT_PADDING_Y: f32 = 12.0;
const FIELD_SPACING: f32 = 6.0;
const COLORS_SPACING: f32 = 16.0;

const PREVIEW_PADDING: f32 = 16.0;
/// Largest preview edge that fits inside the card padding.
const PREVIEW_MAX_EDGE: f32 =
    CARD_MAX_WIDTH - 2.0 * CARD_PADDING - 2.0 * PREVIEW_PADDING;
const ACTIONS_SPACING: f32 = 12.0;
const PREVIEW_RADIUS: f32 = 8.0;
const PLACEHOLDER_FONT_SIZE: f32 = 13.0;
const STATUS_FONT_SIZE: f32 = 12.0;

const PAYLOAD_PLACEHOLDER: &str = "Enter URL (e.g., https://example.com)";
const TOO_LONG_MESSAGE: &str = "Text is too long for a QR code.";
const TOO_DENSE_MESSAGE: &str =
    "Too much text for this size. Increase the size.";
const EMPTY_MESSAGE: &str = "Your QR code will appear here.";

/// Props for the generator form view.
pub(crate) struct GeneratorFormProps<'a> {
    pub(crate) vm: GeneratorViewModel<'a>,
    pub(crate) theme: ThemeProps<'a>,
}

/// Render the generator card: inputs, preview and export controls.
pub(crate) fn view(
    props: GeneratorFormProps<'_>,
) -> Element<'_, GeneratorEvent, Theme, iced::Renderer> {
    let palette = props.theme.theme.iced_palette().clone();
    let vm = props.vm;

    let title_color = palette.foreground;
    let title = text("Static QR Code Generator")
        .size(TITLE_FONT_SIZE)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .font(iced::Font {
            weight: iced::font::Weight::Semibold,
            ..iced::Font::DEFAULT
        })
        .style(move |_| iced::widget::text::Style {
            color: Some(title_color),
        });

    let payload = text_input(PAYLOAD_PLACEHOLDER, vm.payload)
        .on_input(|value| intent(GeneratorIntent::PayloadChanged(value)))
        .padding([INPUT_PADDING_Y, INPUT_PADDING_X])
        .size(INPUT_FONT_SIZE)
        .width(Length::Fill)
        .style(text_input_style(props.theme));

    let download_label = if vm.is_exporting {
        "Saving..."
    } else {
        "Download QR Code"
    };
    let download = action_button_view(ActionButtonProps {
        label: download_label,
        icon: Some(DOWNLOAD),
        tint_icon: true,
        enabled: vm.can_download,
        fill_width: false,
        variant: ActionButtonVariant::Primary,
        theme: props.theme,
    })
    .map(|_| intent(GeneratorIntent::Download));

    let reset = action_button_view(ActionButtonProps {
        label: "Reset",
        icon: None,
        tint_icon: false,
        enabled: vm.can_reset,
        fill_width: false,
        variant: ActionButtonVariant::Secondary,
        theme: props.theme,
    })
    .map(|_| intent(GeneratorIntent::Reset));

    let actions = row![download, reset].spacing(ACTIONS_SPACING);

    let mut content = Column::new()
        .spacing(CARD_SPACING)
        .align_x(alignment::Horizontal::Center)
        .push(title)
        .push(payload)
        .push(color_row(&vm, props.theme))
        .push(size_slider(&vm, &palette))
        .push(preview(&vm, &palette))
        .push(actions);

    if let Some(status) = vm.export_status {
        content = content.push(export_status_line(status, &palette));
    }

    let surface = palette.surface;
    container(content)
        .padding(CARD_PADDING)
        .max_width(CARD_MAX_WIDTH)
        .width(Length::Fill)
        .style(move |_| container::Style {
            background: Some(surface.into()),
            border: iced::Border {
                radius: CARD_RADIUS.into(),
                ..Default::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.10),
                offset: Vector::new(0.0, 8.0),
                blur_radius: 20.0,
            },
            ..Default::default()
        })
        .into()
}

fn intent(event: GeneratorIntent) -> GeneratorEvent {
    GeneratorEvent::Intent(event)
}

fn color_row<'a>(
    vm: &GeneratorViewModel<'a>,
    theme: ThemeProps<'a>,
) -> Element<'a, GeneratorEvent, Theme, iced::Renderer> {
    let foreground = color_field_view(ColorFieldProps {
        label: "Foreground",
        value: vm.foreground_input,
        color: vm.foreground,
        theme,
    })
    .map(|ColorFieldEvent::Changed(value)| {
        intent(GeneratorIntent::ForegroundChanged(value))
    });
    let background = color_field_view(ColorFieldProps {
        label: "Background",
        value: vm.background_input,
        color: vm.background,
        theme,
    })
    .map(|ColorFieldEvent::Changed(value)| {
        intent(GeneratorIntent::BackgroundChanged(value))
    });

    row![foreground, background]
        .spacing(COLORS_SPACING)
        .width(Length::Fill)
        .into()
}

fn size_slider<'a>(
    vm: &GeneratorViewModel<'a>,
    palette: &IcedColorPalette,
) -> Element<'a, GeneratorEvent, Theme, iced::Renderer> {
    let label_color = palette.foreground;
    let label = text(format!("Size: {} px", vm.size))
        .size(LABEL_FONT_SIZE)
        .style(move |_| iced::widget::text::Style {
            color: Some(label_color),
        });

    let control = slider(MIN_SIZE..=MAX_SIZE, vm.size, |size| {
        intent(GeneratorIntent::SizeChanged(size))
    })
    .step(SIZE_STEP)
    .width(Length::Fill);

    column![label, control]
        .spacing(FIELD_SPACING)
        .width(Length::Fill)
        .into()
}

fn preview<'a>(
    vm: &GeneratorViewModel<'a>,
    palette: &IcedColorPalette,
) -> Element<'a, GeneratorEvent, Theme, iced::Renderer> {
    let edge = Length::Fixed(preview_edge(vm.size));
    let dim = palette.dim_foreground;
    let danger = palette.danger;

    let body: Element<'a, GeneratorEvent, Theme, iced::Renderer> =
        match vm.preview {
            PreviewModel::Ready(handle) => image(handle.clone())
                .width(edge)
                .height(edge)
                .filter_method(image::FilterMethod::Nearest)
                .into(),
            PreviewModel::Placeholder => {
                placeholder(EMPTY_MESSAGE, dim, edge, palette.overlay)
            },
            PreviewModel::TooLong => {
                placeholder(TOO_LONG_MESSAGE, danger, edge, palette.overlay)
            },
            PreviewModel::TooDense => {
                placeholder(TOO_DENSE_MESSAGE, danger, edge, palette.overlay)
            },
        };

    let surface = palette.surface;
    let border = palette.border;
    container(body)
        .padding(PREVIEW_PADDING)
        .style(move |_| container::Style {
            background: Some(surface.into()),
            border: iced::Border {
                width: 1.0,
                color: border,
                radius: PREVIEW_RADIUS.into(),
            },
            ..Default::default()
        })
        .into()
}

/// On-screen edge of the preview; the export keeps the full size.
fn preview_edge(size: u32) -> f32 {
    (size as f32).min(PREVIEW_MAX_EDGE)
}

fn placeholder<'a>(
    message: &'a str,
    color: Color,
    edge: Length,
    fill: Color,
) -> Element<'a, GeneratorEvent, Theme, iced::Renderer> {
    let label = text(message)
        .size(PLACEHOLDER_FONT_SIZE)
        .align_x(alignment::Horizontal::Center)
        .style(move |_| iced::widget::text::Style { color: Some(color) });

    container(label)
        .width(edge)
        .height(edge)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(move |_| container::Style {
            background: Some(Color { a: 0.6, ..fill }.into()),
            border: iced::Border {
                radius: PREVIEW_RADIUS.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

fn export_status_line<'a>(
    status: &'a ExportStatus,
    palette: &IcedColorPalette,
) -> Element<'a, GeneratorEvent, Theme, iced::Renderer> {
    let (message, color) = match status {
        ExportStatus::Saved(path) => {
            (format!("Saved to {}", path.display()), palette.dim_foreground)
        },
        ExportStatus::Failed(reason) => {
            (format!("Export failed: {reason}"), palette.danger)
        },
    };

    text(message)
        .size(STATUS_FONT_SIZE)
        .style(move |_| iced::widget::text::Style { color: Some(color) })
        .into()
}

#[cfg(test)]
mod tests {
    use qrgate_render::{DEFAULT_SIZE, MAX_SIZE};

    use super::*;

    #[test]
    fn given_largest_size_when_previewed_then_it_fits_inside_the_card() {
        let edge = preview_edge(MAX_SIZE);

        assert!(
            edge + 2.0 * PREVIEW_PADDING
                <= CARD_MAX_WIDTH - 2.0 * CARD_PADDING
        );
        assert_eq!(edge, MAX_SIZE as f32);
    }

    #[test]
    fn given_default_size_when_previewed_then_edge_matches_pixels() {
        assert_eq!(preview_edge(DEFAULT_SIZE), DEFAULT_SIZE as f32);
    }
}
