use iced::Task;

use super::event::{GeneratorEffect, GeneratorEvent, GeneratorIntent};
use super::model::ExportStatus;
use super::state::{ColorSlot, GeneratorState};

/// Reduce a generator intent event into state updates and effects.
pub(crate) fn reduce(
    state: &mut GeneratorState,
    event: GeneratorIntent,
) -> Task<GeneratorEvent> {
    match event {
        GeneratorIntent::PayloadChanged(payload) => {
            state.set_payload(payload);
            Task::none()
        },
        GeneratorIntent::ForegroundChanged(value) => {
            state.set_color_input(ColorSlot::Foreground, value);
            Task::none()
        },
        GeneratorIntent::BackgroundChanged(value) => {
            state.set_color_input(ColorSlot::Background, value);
            Task::none()
        },
        GeneratorIntent::SizeChanged(size) => {
            state.set_size(size);
            Task::none()
        },
        GeneratorIntent::Download => match state.begin_export() {
            Some(raster) => Task::done(GeneratorEvent::Effect(
                GeneratorEffect::Export(raster),
            )),
            None => {
                log::debug!("nothing to export");
                Task::none()
            },
        },
        GeneratorIntent::ExportFinished(Ok(path)) => {
            state.finish_export(ExportStatus::Saved(path));
            Task::none()
        },
        GeneratorIntent::ExportFinished(Err(message)) => {
            log::error!("qr code export failed: {message}");
            state.finish_export(ExportStatus::Failed(message));
            Task::none()
        },
        GeneratorIntent::Reset => {
            state.reset();
            Task::none()
        },
    }
}
