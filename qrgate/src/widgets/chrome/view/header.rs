use iced::widget::{Space, column, container, image, row, svg, text};
use iced::{Element, Length, Theme, alignment};
use qrgate_auth::Identity;

use crate::components::primitive::action_button::{
    ActionButtonProps, ActionButtonVariant, view as action_button_view,
};
use crate::icons::{LOGO, SIGN_OUT};
use crate::theme::{IcedColorPalette, ThemeProps};
use crate::widgets::chrome::event::{ChromeEvent, ChromeIntent};
use crate::widgets::chrome::model::ChromeViewModel;

pub(crate) const HEADER_HEIGHT: f32 = 64.0;
const HEADER_PADDING_X: f32 = 24.0;
const HEADER_SPACING: f32 = 12.0;
const LOGO_SIZE: f32 = 28.0;
const TITLE_FONT_SIZE: f32 = 18.0;
const AVATAR_SIZE: f32 = 32.0;
const INITIAL_FONT_SIZE: f32 = 14.0;
const NAME_FONT_SIZE: f32 = 13.0;
const EMAIL_FONT_SIZE: f32 = 11.0;

/// Props for rendering the header bar.
pub(crate) struct HeaderProps<'a> {
    pub(crate) title: &'a str,
    pub(crate) vm: ChromeViewModel<'a>,
    pub(crate) theme: ThemeProps<'a>,
}

/// Render the title bar with the signed-in account and sign-out action.
pub(crate) fn view(
    props: HeaderProps<'_>,
) -> Element<'_, ChromeEvent, Theme, iced::Renderer> {
    let palette = props.theme.theme.iced_palette().clone();
    let accent = palette.accent;
    let title_color = palette.bright_foreground;

    let logo = svg::Svg::new(svg::Handle::from_memory(LOGO))
        .width(Length::Fixed(LOGO_SIZE))
        .height(Length::Fixed(LOGO_SIZE))
        .style(move |_, _| svg::Style {
            color: Some(accent),
        });
    let title = text(props.title)
        .size(TITLE_FONT_SIZE)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..iced::Font::DEFAULT
        })
        .style(move |_| iced::widget::text::Style {
            color: Some(title_color),
        });

    let mut bar = row![logo, title, Space::new().width(Length::Fill)]
        .spacing(HEADER_SPACING)
        .align_y(alignment::Vertical::Center);

    if let Some(identity) = props.vm.identity {
        let sign_out = action_button_view(ActionButtonProps {
            label: "Sign out",
            icon: Some(SIGN_OUT),
            tint_icon: true,
            enabled: true,
            fill_width: false,
            variant: ActionButtonVariant::Subtle,
            theme: props.theme,
        })
        .map(|_| ChromeEvent::Intent(ChromeIntent::SignOutPressed));

        bar = bar
            .push(avatar(identity, props.vm.avatar, &palette))
            .push(account_label(identity, &palette))
            .push(sign_out);
    }

    let surface = palette.surface;
    let border = palette.border;
    container(bar)
        .width(Length::Fill)
        .height(Length::Fixed(HEADER_HEIGHT))
        .padding([0.0, HEADER_PADDING_X])
        .align_y(alignment::Vertical::Center)
        .style(move |_| container::Style {
            background: Some(surface.into()),
            border: iced::Border {
                width: 1.0,
                color: border,
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

fn avatar<'a>(
    identity: &'a Identity,
    handle: Option<&'a image::Handle>,
    palette: &IcedColorPalette,
) -> Element<'a, ChromeEvent, Theme, iced::Renderer> {
    let edge = Length::Fixed(AVATAR_SIZE);
    if let Some(handle) = handle {
        return image(handle.clone())
            .width(edge)
            .height(edge)
            .into();
    }

    let fill = palette.accent_surface;
    let color = palette.dim_accent;
    let initial = text(identity.initial().to_string())
        .size(INITIAL_FONT_SIZE)
        .style(move |_| iced::widget::text::Style { color: Some(color) });

    container(initial)
        .width(edge)
        .height(edge)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(move |_| container::Style {
            background: Some(fill.into()),
            border: iced::Border {
                radius: (AVATAR_SIZE / 2.0).into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

fn account_label<'a>(
    identity: &'a Identity,
    palette: &IcedColorPalette,
) -> Element<'a, ChromeEvent, Theme, iced::Renderer> {
    let name_color = palette.bright_foreground;
    let email_color = palette.dim_foreground;

    let name = text(identity.label())
        .size(NAME_FONT_SIZE)
        .style(move |_| iced::widget::text::Style {
            color: Some(name_color),
        });
    let mut label = column![name];
    if identity.label() != identity.email {
        let email = text(identity.email.as_str())
            .size(EMAIL_FONT_SIZE)
            .style(move |_| iced::widget::text::Style {
                color: Some(email_color),
            });
        label = label.push(email);
    }

    label.into()
}
