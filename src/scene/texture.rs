use crate::core::color::Color;
use crate::error::{RenderError, Result};
use image::RgbImage;
use log::info;
use nalgebra::Vector2;
use std::path::Path;

/// A decoded RGB texture map. Read-only after load.
#[derive(Debug, Clone)]
pub struct Texture {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let image = image::open(path_ref)?.to_rgb8();
        let (width, height) = image.dimensions();
        ensure_not_empty(width, height)?;

        info!("Loaded texture: {:?} ({}x{})", path_ref, width, height);

        Ok(Self { image, width, height })
    }

    /// Wraps raw row-major RGB8 pixels. Zero-sized images are rejected.
    pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        ensure_not_empty(width, height)?;
        let expected = width as usize * height as usize * 3;
        let actual = pixels.len();
        let image = RgbImage::from_raw(width, height, pixels).ok_or(RenderError::InvalidPixelData {
            width,
            height,
            expected,
            actual,
        })?;
        Ok(Self { image, width, height })
    }

    /// Nearest-neighbor lookup.
    ///
    /// `uv` (0, 0) is the first pixel of the first row; coordinates outside
    /// [0, 1] clamp to the border. Channels come back in [0, 1].
    pub fn sample(&self, uv: &Vector2<f32>) -> Color {
        let x = texel_index(uv.x, self.width);
        let y = texel_index(uv.y, self.height);
        let pixel = self.image.get_pixel(x, y);

        Color::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }
}

fn ensure_not_empty(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyTexture { width, height });
    }
    Ok(())
}

#[inline]
fn texel_index(coord: f32, size: u32) -> u32 {
    let max = size.saturating_sub(1) as i64;
    ((coord * size as f32) as i64).clamp(0, max) as u32
}
