use crate::core::color::channels;
use crate::core::framebuffer::FrameBuffer;
use image::RgbImage;
use rayon::prelude::*;

/// Copies the color buffer into an [`RgbImage`].
pub fn to_rgb_image(framebuffer: &FrameBuffer) -> RgbImage {
    let mut image = RgbImage::new(framebuffer.width as u32, framebuffer.height as u32);
    image
        .par_chunks_mut(framebuffer.width.max(1) * 3)
        .zip(framebuffer.color_buffer().par_chunks(framebuffer.width.max(1)))
        .for_each(|(row, pixels)| {
            for (dst, &packed) in row.chunks_exact_mut(3).zip(pixels) {
                dst.copy_from_slice(&channels(packed));
            }
        });
    image
}
