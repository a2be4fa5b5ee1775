pub(crate) mod event;
pub(crate) mod model;
mod reducer;
mod state;
pub(crate) mod view;

use iced::Task;

pub(crate) use self::event::{
    GeneratorEffect, GeneratorEvent, GeneratorIntent,
};
use self::model::GeneratorViewModel;
use self::state::{ColorSlot, GeneratorState};

/// QR generator form: payload, colors, size, live preview and export.
pub(crate) struct GeneratorWidget {
    state: GeneratorState,
}

impl GeneratorWidget {
    /// Create the generator with the default form.
    pub(crate) fn new() -> Self {
        Self {
            state: GeneratorState::default(),
        }
    }

    /// Reduce a generator intent event into state updates and effects.
    pub(crate) fn reduce(
        &mut self,
        event: GeneratorIntent,
    ) -> Task<GeneratorEvent> {
        reducer::reduce(&mut self.state, event)
    }

    /// Produce the generator view model for rendering.
    pub(crate) fn vm(&self) -> GeneratorViewModel<'_> {
        let options = self.state.options();
        GeneratorViewModel {
            payload: &options.payload,
            foreground_input: self.state.color_input(ColorSlot::Foreground),
            background_input: self.state.color_input(ColorSlot::Background),
            foreground: options.foreground,
            background: options.background,
            size: options.size,
            preview: self.state.preview_model(),
            can_download: self.state.can_download(),
            can_reset: self.state.can_reset(),
            is_exporting: self.state.is_exporting(),
            export_status: self.state.export_status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use qrgate_render::{DEFAULT_SIZE, MAX_SIZE};

    use super::model::PreviewModel;
    use super::*;

    #[test]
    fn given_empty_form_when_viewed_then_reset_is_offered_but_not_download() {
        let widget = GeneratorWidget::new();

        let vm = widget.vm();

        assert!(vm.can_reset);
        assert!(!vm.can_download);
    }

    #[test]
    fn given_edited_form_when_reset_pressed_then_defaults_are_shown() {
        let mut widget = GeneratorWidget::new();
        let _task = widget
            .reduce(GeneratorIntent::PayloadChanged(String::from("hello")));
        let _task = widget.reduce(GeneratorIntent::SizeChanged(MAX_SIZE));
        let _task = widget.reduce(GeneratorIntent::ForegroundChanged(
            String::from("#1d4ed8"),
        ));

        let _task = widget.reduce(GeneratorIntent::Reset);

        let vm = widget.vm();
        assert_eq!(vm.payload, "");
        assert_eq!(vm.foreground_input, "#000000");
        assert_eq!(vm.background_input, "#ffffff");
        assert_eq!(vm.size, DEFAULT_SIZE);
        assert!(matches!(vm.preview, PreviewModel::Placeholder));
    }

    #[test]
    fn given_export_in_flight_when_viewed_then_reset_waits() {
        let mut widget = GeneratorWidget::new();
        let _task = widget
            .reduce(GeneratorIntent::PayloadChanged(String::from("hello")));

        let _task = widget.reduce(GeneratorIntent::Download);

        assert!(!widget.vm().can_reset);
    }
}
