use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use qrcode::{Color, QrCode};

use crate::errors::{RenderError, Result};
use crate::options::{EC_LEVEL, QUIET_ZONE_MODULES, QrOptions, is_valid_size};

/// A rendered symbol: `size × size` RGBA pixels plus the module grid it was
/// drawn from.
#[derive(Debug, Clone)]
pub struct QrRaster {
    image: RgbaImage,
    modules: usize,
}

impl QrRaster {
    /// Edge length in pixels.
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    /// Modules per side of the symbol, quiet zone excluded.
    pub fn modules(&self) -> usize {
        self.modules
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(self.image.clone())
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Encode `options.payload` and scale it to `options.size` pixels.
pub fn render(options: &QrOptions) -> Result<QrRaster> {
    if !options.has_payload() {
        return Err(RenderError::EmptyPayload);
    }
    if !is_valid_size(options.size) {
        return Err(RenderError::InvalidSize { size: options.size });
    }

    let code = QrCode::with_error_correction_level(
        options.payload.as_bytes(),
        EC_LEVEL,
    )?;
    let modules = code.width();
    let colors = code.to_colors();

    let cells = modules + 2 * QUIET_ZONE_MODULES;
    let size = options.size as usize;
    // Every cell needs at least one pixel or scaling drops modules.
    if cells > size {
        return Err(RenderError::TooDense {
            modules,
            size: options.size,
        });
    }
    let dark = Rgba(options.foreground.rgba());
    let light = Rgba(options.background.rgba());

    let image = RgbaImage::from_fn(options.size, options.size, |x, y| {
        let col = cell_index(x as usize, size, cells);
        let row = cell_index(y as usize, size, cells);
        match module_at(&colors, modules, col, row) {
            Color::Dark => dark,
            Color::Light => light,
        }
    });

    Ok(QrRaster { image, modules })
}

fn cell_index(px: usize, size: usize, cells: usize) -> usize {
    px * cells / size
}

fn module_at(
    colors: &[Color],
    modules: usize,
    col: usize,
    row: usize,
) -> Color {
    let inside = QUIET_ZONE_MODULES..QUIET_ZONE_MODULES + modules;
    if !inside.contains(&col) || !inside.contains(&row) {
        return Color::Light;
    }

    let index = (row - QUIET_ZONE_MODULES) * modules + col - QUIET_ZONE_MODULES;
    colors.get(index).copied().unwrap_or(Color::Light)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::options::{MAX_SIZE, MIN_SIZE};

    fn sample(raster: &QrRaster, col: usize, row: usize) -> [u8; 4] {
        let cells = raster.modules() + 2 * QUIET_ZONE_MODULES;
        let size = raster.size() as usize;
        let x = ((2 * col + 1) * size) / (2 * cells);
        let y = ((2 * row + 1) * size) / (2 * cells);
        raster.image().get_pixel(x as u32, y as u32).0
    }

    #[test]
    fn given_empty_payload_when_rendered_then_nothing_is_drawn() {
        let result = render(&QrOptions::default());

        assert!(matches!(result, Err(RenderError::EmptyPayload)));
    }

    #[test]
    fn given_off_step_size_when_rendered_then_size_is_rejected() {
        let options = QrOptions::new("https://example.com").with_size(300);

        let result = render(&options);

        assert!(matches!(result, Err(RenderError::InvalidSize { size: 300 })));
    }

    #[test]
    fn given_url_when_rendered_then_raster_matches_requested_size() {
        let options = QrOptions::new("https://example.com").with_size(MAX_SIZE);

        let raster = render(&options).expect("render");

        assert_eq!(raster.size(), MAX_SIZE);
        assert_eq!(raster.image().height(), MAX_SIZE);
        assert_eq!(
            raster.pixels().len(),
            (MAX_SIZE * MAX_SIZE * 4) as usize
        );
    }

    #[test]
    fn given_custom_colors_when_rendered_then_only_those_colors_appear() {
        let fg = HexColor::parse("#123456").expect("fg");
        let bg = HexColor::parse("#fedcba").expect("bg");
        let options = QrOptions::new("hello").with_colors(fg, bg);

        let raster = render(&options).expect("render");

        assert!(
            raster
                .image()
                .pixels()
                .all(|px| px.0 == fg.rgba() || px.0 == bg.rgba())
        );
        assert_eq!(raster.image().get_pixel(0, 0).0, bg.rgba());
    }

    #[test]
    fn given_rendered_raster_when_module_centres_sampled_then_symbol_matches() {
        let options = QrOptions::new("https://example.com").with_size(MAX_SIZE);
        let code = QrCode::with_error_correction_level(
            options.payload.as_bytes(),
            EC_LEVEL,
        )
        .expect("encode");
        let expected = code.to_colors();

        let raster = render(&options).expect("render");

        assert_eq!(raster.modules(), code.width());
        for row in 0..code.width() {
            for col in 0..code.width() {
                let pixel = sample(
                    &raster,
                    col + QUIET_ZONE_MODULES,
                    row + QUIET_ZONE_MODULES,
                );
                let want = match expected[row * code.width() + col] {
                    Color::Dark => HexColor::BLACK.rgba(),
                    Color::Light => HexColor::WHITE.rgba(),
                };
                assert_eq!(pixel, want, "module ({col}, {row})");
            }
        }
    }

    #[test]
    fn given_payload_over_capacity_when_rendered_then_encode_error_is_returned()
    {
        let options = QrOptions::new("x".repeat(4000));

        let result = render(&options);

        assert!(matches!(result, Err(RenderError::Encode(_))));
    }

    #[test]
    fn given_dense_payload_at_small_size_when_rendered_then_too_dense() {
        let payload = "x".repeat(1200);

        let small =
            render(&QrOptions::new(payload.clone()).with_size(MIN_SIZE));
        let large = render(&QrOptions::new(payload).with_size(MAX_SIZE));

        match small {
            Err(RenderError::TooDense { modules, size }) => {
                assert!(modules + 2 * QUIET_ZONE_MODULES > size as usize);
                assert_eq!(size, MIN_SIZE);
            },
            other => panic!("expected too dense, got {other:?}"),
        }
        let large = large.expect("fits at the largest size");
        let cells = large.modules() + 2 * QUIET_ZONE_MODULES;
        assert!(cells <= MAX_SIZE as usize);
    }

    #[test]
    fn given_raster_when_encoded_then_png_signature_is_written() {
        let raster = render(&QrOptions::new("png")).expect("render");

        let bytes = raster.to_png().expect("png");

        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
