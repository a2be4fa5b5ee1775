use iced::Task;

use super::event::{ChromeEffect, ChromeEvent, ChromeIntent};
use super::state::ChromeState;

/// Reduce a chrome intent event into state updates and effects.
pub(crate) fn reduce(
    state: &mut ChromeState,
    event: ChromeIntent,
) -> Task<ChromeEvent> {
    match event {
        ChromeIntent::IdentityChanged(identity) => {
            match state.set_identity(identity) {
                Some(url) => Task::done(ChromeEvent::Effect(
                    ChromeEffect::FetchAvatar(url),
                )),
                None => Task::none(),
            }
        },
        ChromeIntent::AvatarLoaded { url, result } => {
            if !state.apply_avatar(&url, result) {
                log::debug!("dropping avatar for a previous identity");
            }
            Task::none()
        },
        ChromeIntent::SignOutPressed => {
            Task::done(ChromeEvent::Effect(ChromeEffect::SignOut))
        },
    }
}
