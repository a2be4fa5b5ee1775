use iced::widget::{container, text};
use iced::{Element, Length, Theme, alignment};

use crate::theme::ThemeProps;
use crate::widgets::chrome::event::ChromeEvent;
use crate::widgets::chrome::model::ChromeViewModel;

pub(crate) const FOOTER_HEIGHT: f32 = 40.0;
const FOOTER_FONT_SIZE: f32 = 12.0;

/// Props for rendering the footer line.
pub(crate) struct FooterProps<'a> {
    pub(crate) vm: ChromeViewModel<'a>,
    pub(crate) theme: ThemeProps<'a>,
}

/// Render a single line naming the signed-in account.
pub(crate) fn view(
    props: FooterProps<'_>,
) -> Element<'_, ChromeEvent, Theme, iced::Renderer> {
    let palette = props.theme.theme.iced_palette();
    let color = palette.dim_foreground;
    let message = props
        .vm
        .identity
        .map(|identity| format!("Signed in as {}", identity.email))
        .unwrap_or_default();

    container(
        text(message)
            .size(FOOTER_FONT_SIZE)
            .style(move |_| iced::widget::text::Style { color: Some(color) }),
    )
    .width(Length::Fill)
    .height(Length::Fixed(FOOTER_HEIGHT))
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Center)
    .into()
}
