use iced::Task;

use crate::app::{App, AppEvent};
use crate::widgets::generator::{
    GeneratorEffect, GeneratorEvent, GeneratorIntent,
};

/// Route a generator event through the reducer or the PNG exporter.
pub(crate) fn route(app: &mut App, event: GeneratorEvent) -> Task<AppEvent> {
    match event {
        GeneratorEvent::Intent(intent) => {
            app.widgets.generator.reduce(intent).map(AppEvent::Generator)
        },
        GeneratorEvent::Effect(GeneratorEffect::Export(raster)) => {
            let dir = app.services.export_dir.clone();
            Task::perform(
                async move {
                    qrgate_render::export_png(&raster, &dir)
                        .map_err(|err| format!("{err}"))
                },
                |result| {
                    AppEvent::Generator(GeneratorEvent::Intent(
                        GeneratorIntent::ExportFinished(result),
                    ))
                },
            )
        },
    }
}
