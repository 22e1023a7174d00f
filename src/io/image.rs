use crate::core::framebuffer::FrameBuffer;
use crate::error::Result;
use crate::pipeline::present::to_rgb_image;
use log::info;
use std::path::Path;

/// Saves the color buffer as an image; the format follows the extension.
pub fn save_framebuffer<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    to_rgb_image(framebuffer).save(path)?;
    info!(
        "Saved {}x{} frame to {:?}",
        framebuffer.width, framebuffer.height, path
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_reload_png() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.clear(0x00646464);
        fb.set_pixel(1, 2, 0x00FF0000);

        let path = std::env::temp_dir().join(format!("softraster_save_{}.png", std::process::id()));
        save_framebuffer(&fb, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.dimensions(), (4, 4));
        assert_eq!(loaded.get_pixel(1, 2).0, [255, 0, 0]);
        assert_eq!(loaded.get_pixel(0, 0).0, [100, 100, 100]);
    }
}
