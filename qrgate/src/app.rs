#[path = "subscription.rs"]
mod subscription;
#[path = "update.rs"]
mod update;
#[path = "view.rs"]
pub(crate) mod view;

use iced::{Element, Subscription, Task, Theme};

use crate::services::Services;
use crate::theme::AppTheme;
use crate::widgets::chrome::{ChromeEvent, ChromeWidget};
use crate::widgets::gate::{GateEvent, GateWidget};
use crate::widgets::generator::{GeneratorEvent, GeneratorWidget};
use crate::widgets::sign_in::{SignInEvent, SignInWidget};

pub(crate) const APP_TITLE: &str = "QR Code Generator";
pub(crate) const WINDOW_WIDTH: f32 = 960.0;
pub(crate) const WINDOW_HEIGHT: f32 = 900.0;
pub(crate) const MIN_WINDOW_WIDTH: f32 = 480.0;
pub(crate) const MIN_WINDOW_HEIGHT: f32 = 560.0;

/// App-wide events that drive the root update loop.
#[derive(Debug, Clone)]
pub(crate) enum AppEvent {
    IcedReady,
    // Identity gate
    Gate(GateEvent),
    // Sign-in screen
    SignIn(SignInEvent),
    // Generator form
    Generator(GeneratorEvent),
    // Header and footer
    Chrome(ChromeEvent),
}

/// Container for all widget instances.
pub(crate) struct Widgets {
    pub(crate) gate: GateWidget,
    pub(crate) sign_in: SignInWidget,
    pub(crate) generator: GeneratorWidget,
    pub(crate) chrome: ChromeWidget,
}

/// Root application state.
pub(crate) struct App {
    pub(crate) services: Services,
    pub(crate) theme: AppTheme,
    pub(crate) widgets: Widgets,
}

impl App {
    /// Initialize the application and return the first task.
    pub(crate) fn new(services: Services) -> (Self, Task<AppEvent>) {
        let widgets = Widgets {
            gate: GateWidget::new(),
            sign_in: SignInWidget::new(),
            generator: GeneratorWidget::new(),
            chrome: ChromeWidget::new(),
        };

        let app = App {
            services,
            theme: AppTheme::default(),
            widgets,
        };

        (app, Task::done(AppEvent::IcedReady))
    }

    /// Return the window title.
    pub(crate) fn title(&self) -> String {
        String::from(APP_TITLE)
    }

    /// Return the current iced theme.
    pub(crate) fn theme(&self) -> Theme {
        Theme::from(&self.theme)
    }

    /// Return active subscriptions.
    pub(crate) fn subscription(&self) -> Subscription<AppEvent> {
        subscription::subscription(self)
    }

    /// Handle an incoming event.
    pub(crate) fn update(&mut self, event: AppEvent) -> Task<AppEvent> {
        update::update(self, event)
    }

    /// Render the root view.
    pub(crate) fn view(&self) -> Element<'_, AppEvent, Theme, iced::Renderer> {
        view::view(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use qrgate_auth::testing::{FakeAllowList, FakeIdentityProvider};
    use qrgate_auth::{AccessDecision, AuthState, Identity};

    use super::*;
    use crate::routers;
    use crate::widgets::gate::GateIntent;
    use crate::widgets::gate::model::GatePhase;
    use crate::widgets::generator::GeneratorIntent;

    fn app() -> App {
        let services = Services::fake(
            Arc::new(FakeIdentityProvider::signed_out()),
            Arc::new(FakeAllowList::with_emails(["ada@example.com"])),
        );
        let (app, _task) = App::new(services);
        app
    }

    fn ada() -> Identity {
        Identity::new("ada@example.com")
    }

    /// Feed an intent to the gate and deliver the widget events its
    /// effects lead to, as the runtime would.
    fn gate(app: &mut App, intent: GateIntent) {
        for effect in app.widgets.gate.apply(intent) {
            for event in routers::gate::follow_ups(&effect) {
                let _task = app.update(event);
            }
        }
    }

    fn authorize(app: &mut App) {
        gate(app, GateIntent::AuthChanged(AuthState::SignedIn(ada())));
        let request_id = app
            .widgets
            .gate
            .state()
            .pending_request()
            .expect("lookup should be pending");
        gate(
            app,
            GateIntent::DecisionReady {
                request_id,
                decision: AccessDecision::Authorized(ada()),
            },
        );
    }

    #[test]
    fn given_new_app_when_booted_then_gate_is_loading() {
        let app = app();

        assert_eq!(app.widgets.gate.vm().phase, GatePhase::Loading);
        assert_eq!(app.title(), APP_TITLE);
    }

    #[test]
    fn given_lookup_in_flight_when_viewed_then_sign_in_is_busy() {
        let mut app = app();
        gate(&mut app, GateIntent::AuthChanged(AuthState::SignedOut));

        gate(&mut app, GateIntent::AuthChanged(AuthState::SignedIn(ada())));

        let gate_vm = app.widgets.gate.vm();
        assert!(gate_vm.is_verifying);
        assert!(app.widgets.sign_in.vm(None, gate_vm.is_verifying).is_busy);
    }

    #[test]
    fn given_authorized_session_when_decided_then_generator_is_mounted() {
        let mut app = app();

        authorize(&mut app);

        assert_eq!(app.widgets.gate.vm().phase, GatePhase::Authorized(&ada()));
    }

    #[test]
    fn given_authorized_session_when_decided_then_header_shows_identity() {
        let mut app = app();

        authorize(&mut app);

        assert_eq!(app.widgets.chrome.vm().identity, Some(&ada()));
    }

    #[test]
    fn given_edited_form_when_session_ends_then_form_is_reset() {
        let mut app = app();
        authorize(&mut app);
        let _task = app.update(AppEvent::Generator(GeneratorEvent::Intent(
            GeneratorIntent::PayloadChanged(String::from("hello")),
        )));
        assert_eq!(app.widgets.generator.vm().payload, "hello");

        gate(&mut app, GateIntent::AuthChanged(AuthState::SignedOut));

        assert_eq!(
            app.widgets.gate.vm().phase,
            GatePhase::SignedOut { error: None }
        );
        assert!(app.widgets.generator.vm().payload.is_empty());
        assert!(app.widgets.chrome.vm().identity.is_none());
    }

    #[test]
    fn given_denied_session_when_signed_out_then_error_stays_visible() {
        let mut app = app();
        gate(&mut app, GateIntent::AuthChanged(AuthState::SignedIn(ada())));
        let request_id = app
            .widgets
            .gate
            .state()
            .pending_request()
            .expect("lookup should be pending");
        gate(
            &mut app,
            GateIntent::DecisionReady {
                request_id,
                decision: AccessDecision::Denied {
                    email: ada().email,
                },
            },
        );

        gate(&mut app, GateIntent::AuthChanged(AuthState::SignedOut));

        assert!(matches!(
            app.widgets.gate.vm().phase,
            GatePhase::SignedOut { error: Some(_) }
        ));
        assert!(app.widgets.chrome.vm().identity.is_none());
    }
}
