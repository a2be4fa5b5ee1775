use iced::widget::{Column, column, container, row, svg, text};
use iced::{Color, Element, Length, Shadow, Theme, Vector, alignment};

use crate::components::primitive::action_button::{
    ActionButtonProps, ActionButtonVariant, view as action_button_view,
};
use crate::icons::{GOOGLE, SHIELD_ALERT, SIGN_IN};
use crate::theme::{IcedColorPalette, ThemeProps};
use crate::widgets::sign_in::event::{SignInEvent, SignInIntent};
use crate::widgets::sign_in::model::SignInViewModel;

const CARD_MAX_WIDTH: f32 = 448.0;
const CARD_PADDING: f32 = 32.0;
const CARD_RADIUS: f32 = 16.0;
const CARD_SPACING: f32 = 24.0;
const PAGE_PADDING: f32 = 16.0;

const BADGE_SIZE: f32 = 64.0;
const BADGE_ICON_SIZE: f32 = 32.0;

const TITLE_FONT_SIZE: f32 = 24.0;
const SUBTITLE_FONT_SIZE: f32 = 15.0;
const HEADING_SPACING: f32 = 8.0;

const ERROR_FONT_SIZE: f32 = 13.0;
const ERROR_ICON_SIZE: f32 = 20.0;
const ERROR_PADDING: f32 = 16.0;
const ERROR_SPACING: f32 = 12.0;
const ERROR_RADIUS: f32 = 8.0;

const NOTE_FONT_SIZE: f32 = 12.0;

const SIGN_IN_LABEL: &str = "Sign in with Google";
const SIGNING_IN_LABEL: &str = "Signing in...";

/// Props for the sign-in screen.
pub(crate) struct SignInPanelProps<'a> {
    pub(crate) vm: SignInViewModel<'a>,
    pub(crate) theme: ThemeProps<'a>,
}

/// Render the centred sign-in card.
pub(crate) fn view(
    props: SignInPanelProps<'_>,
) -> Element<'_, SignInEvent, Theme, iced::Renderer> {
    let palette = props.theme.theme.iced_palette().clone();

    let mut card = Column::new()
        .spacing(CARD_SPACING)
        .align_x(alignment::Horizontal::Center)
        .push(badge(&palette))
        .push(heading(&palette));

    if let Some(error) = props.vm.error {
        card = card.push(error_box(error, &palette));
    }

    let label = if props.vm.is_busy {
        SIGNING_IN_LABEL
    } else {
        SIGN_IN_LABEL
    };
    let sign_in = action_button_view(ActionButtonProps {
        label,
        icon: Some(GOOGLE),
        tint_icon: false,
        enabled: !props.vm.is_busy,
        fill_width: true,
        variant: ActionButtonVariant::Secondary,
        theme: props.theme,
    })
    .map(|_| SignInEvent::Intent(SignInIntent::SignInPressed));

    let note_color = palette.dim_foreground;
    let note = text("Only authorized users can access this application.")
        .size(NOTE_FONT_SIZE)
        .style(move |_| iced::widget::text::Style {
            color: Some(note_color),
        });

    let card = card.push(sign_in).push(note);

    let surface = palette.surface;
    let card = container(card)
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
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.12),
                offset: Vector::new(0.0, 12.0),
                blur_radius: 24.0,
            },
            ..Default::default()
        });

    let background = palette.background;
    container(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(PAGE_PADDING)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(move |_| container::Style {
            background: Some(background.into()),
            ..Default::default()
        })
        .into()
}

fn badge<'a>(
    palette: &IcedColorPalette,
) -> Element<'a, SignInEvent, Theme, iced::Renderer> {
    let icon_color = palette.accent;
    let fill = palette.accent_surface;

    let icon = svg::Svg::new(svg::Handle::from_memory(SIGN_IN))
        .width(Length::Fixed(BADGE_ICON_SIZE))
        .height(Length::Fixed(BADGE_ICON_SIZE))
        .style(move |_, _| svg::Style {
            color: Some(icon_color),
        });

    container(icon)
        .width(Length::Fixed(BADGE_SIZE))
        .height(Length::Fixed(BADGE_SIZE))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(move |_| container::Style {
            background: Some(fill.into()),
            border: iced::Border {
                radius: (BADGE_SIZE / 2.0).into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

fn heading<'a>(
    palette: &IcedColorPalette,
) -> Element<'a, SignInEvent, Theme, iced::Renderer> {
    let title_color = palette.bright_foreground;
    let subtitle_color = palette.dim_foreground;

    column![
        text("Welcome Back")
            .size(TITLE_FONT_SIZE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..iced::Font::DEFAULT
            })
            .style(move |_| iced::widget::text::Style {
                color: Some(title_color),
            }),
        text("Sign in to access the QR Code Generator")
            .size(SUBTITLE_FONT_SIZE)
            .style(move |_| iced::widget::text::Style {
                color: Some(subtitle_color),
            }),
    ]
    .spacing(HEADING_SPACING)
    .align_x(alignment::Horizontal::Center)
    .into()
}

fn error_box<'a>(
    message: &'a str,
    palette: &IcedColorPalette,
) -> Element<'a, SignInEvent, Theme, iced::Renderer> {
    let danger = palette.danger;
    let fill = palette.danger_surface;
    let border = Color { a: 0.3, ..danger };

    let icon = svg::Svg::new(svg::Handle::from_memory(SHIELD_ALERT))
        .width(Length::Fixed(ERROR_ICON_SIZE))
        .height(Length::Fixed(ERROR_ICON_SIZE))
        .style(move |_, _| svg::Style {
            color: Some(danger),
        });
    let message = text(message)
        .size(ERROR_FONT_SIZE)
        .width(Length::Fill)
        .style(move |_| iced::widget::text::Style {
            color: Some(danger),
        });

    container(
        row![icon, message]
            .spacing(ERROR_SPACING)
            .align_y(alignment::Vertical::Top),
    )
    .padding(ERROR_PADDING)
    .width(Length::Fill)
    .style(move |_| container::Style {
        background: Some(fill.into()),
        border: iced::Border {
            width: 1.0,
            color: border,
            radius: ERROR_RADIUS.into(),
        },
        ..Default::default()
    })
    .into()
}
