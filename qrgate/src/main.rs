mod app;
mod components;
mod config;
mod icons;
mod routers;
mod services;
mod theme;
mod widgets;

use env_logger::Env;
use iced::{Size, window};

use crate::app::{
    App, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crate::services::Services;

fn main() -> iced::Result {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = config::load_with_env();
    let services = Services::from_config(config, config::config_dir());

    iced::application(
        move || App::new(services.clone()),
        App::update,
        App::view,
    )
    .title(App::title)
    .theme(App::theme)
    .antialiasing(true)
    .window(window::Settings {
        size: Size {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
        },
        min_size: Some(Size {
            width: MIN_WINDOW_WIDTH,
            height: MIN_WINDOW_HEIGHT,
        }),
        icon: icons::app_icon(),
        ..window::Settings::default()
    })
    .subscription(App::subscription)
    .run()
}
