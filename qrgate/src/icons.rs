use qrgate_render::{MIN_SIZE, QrOptions, render};

pub(crate) const LOGO: &[u8] = include_bytes!("../../assets/svg/qr.svg");
pub(crate) const SIGN_IN: &[u8] =
    include_bytes!("../../assets/svg/sign-in.svg");
pub(crate) const SIGN_OUT: &[u8] =
    include_bytes!("../../assets/svg/sign-out.svg");
pub(crate) const SHIELD_ALERT: &[u8] =
    include_bytes!("../../assets/svg/shield-alert.svg");
pub(crate) const GOOGLE: &[u8] =
    include_bytes!("../../assets/svg/google.svg");
pub(crate) const DOWNLOAD: &[u8] =
    include_bytes!("../../assets/svg/download.svg");

const APP_ICON_PAYLOAD: &str = "qrgate";

/// Window icon drawn as a QR symbol of the app name.
pub(crate) fn app_icon() -> Option<iced::window::Icon> {
    let options = QrOptions::new(APP_ICON_PAYLOAD).with_size(MIN_SIZE);
    let raster = match render(&options) {
        Ok(raster) => raster,
        Err(err) => {
            log::warn!("window icon render failed: {err}");
            return None;
        },
    };

    iced::window::icon::from_rgba(
        raster.pixels().to_vec(),
        raster.size(),
        raster.size(),
    )
    .map_err(|err| log::warn!("window icon rejected: {err}"))
    .ok()
}
