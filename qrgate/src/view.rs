use iced::widget::{column, container, scrollable, text};
use iced::{Element, Length, Theme, alignment};

use super::{App, AppEvent};
use crate::theme::ThemeProps;
use crate::widgets::chrome::view::footer::{self, FooterProps};
use crate::widgets::chrome::view::header::{self, HeaderProps};
use crate::widgets::gate::model::GatePhase;
use crate::widgets::generator::view::generator_form::{
    self, GeneratorFormProps,
};
use crate::widgets::sign_in::view::sign_in_panel::{self, SignInPanelProps};

const CONTENT_PADDING: f32 = 24.0;
const LOADING_FONT_SIZE: f32 = 14.0;

/// Mount the view the gate allows: loading, sign-in, or the generator.
pub(crate) fn view(app: &App) -> Element<'_, AppEvent, Theme, iced::Renderer> {
    let theme = ThemeProps::new(&app.theme);
    let gate = app.widgets.gate.vm();

    match gate.phase {
        GatePhase::Loading => loading_view(theme),
        GatePhase::SignedOut { error } => sign_in_panel::view(SignInPanelProps {
            vm: app.widgets.sign_in.vm(error, gate.is_verifying),
            theme,
        })
        .map(AppEvent::SignIn),
        GatePhase::Authorized(_) => authorized_view(app, theme),
    }
}

fn loading_view(
    theme: ThemeProps<'_>,
) -> Element<'_, AppEvent, Theme, iced::Renderer> {
    let palette = theme.theme.iced_palette();
    let color = palette.dim_foreground;
    let background = palette.background;

    container(
        text("Loading...")
            .size(LOADING_FONT_SIZE)
            .style(move |_| iced::widget::text::Style { color: Some(color) }),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Center)
    .style(move |_| container::Style {
        background: Some(background.into()),
        ..Default::default()
    })
    .into()
}

fn authorized_view<'a>(
    app: &'a App,
    theme: ThemeProps<'a>,
) -> Element<'a, AppEvent, Theme, iced::Renderer> {
    let chrome = app.widgets.chrome.vm();
    let background = theme.theme.iced_palette().background;

    let header = header::view(HeaderProps {
        title: super::APP_TITLE,
        vm: chrome,
        theme,
    })
    .map(AppEvent::Chrome);

    let form = generator_form::view(GeneratorFormProps {
        vm: app.widgets.generator.vm(),
        theme,
    })
    .map(AppEvent::Generator);
    let body = scrollable(
        container(form)
            .width(Length::Fill)
            .padding(CONTENT_PADDING)
            .align_x(alignment::Horizontal::Center),
    )
    .height(Length::Fill);

    let footer =
        footer::view(FooterProps { vm: chrome, theme }).map(AppEvent::Chrome);

    container(column![header, body, footer])
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| container::Style {
            background: Some(background.into()),
            ..Default::default()
        })
        .into()
}
