//! Conversions between [`FrameBuffer`] and image files, for headless use.
//!
//! Images are read as-is into `[0, 1]` floats with no color-space
//! conversion, which is also what the GPU path does with an RGBA8 texture.
//! Values above 1.0 survive in the frame and are only clamped when encoding
//! back to 8 bits.

use flare_core::FrameBuffer;
use glam::Vec3;
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

use crate::error::Result;

pub fn frame_from_image(image: &DynamicImage) -> FrameBuffer {
    let rgb = image.to_rgb32f();
    let (width, height) = rgb.dimensions();
    let mut frame = FrameBuffer::new(width, height);
    for (dst, src) in frame.pixels_mut().iter_mut().zip(rgb.pixels()) {
        *dst = Vec3::from_array(src.0);
    }
    frame
}

pub fn frame_to_image(frame: &FrameBuffer) -> RgbImage {
    let (width, height) = frame.dimensions();
    let mut image = RgbImage::new(width, height);
    for (dst, src) in image.pixels_mut().zip(frame.pixels()) {
        *dst = Rgb(to_rgb8(*src));
    }
    image
}

fn to_rgb8(color: Vec3) -> [u8; 3] {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8]
}

pub fn load_frame(path: &Path) -> Result<FrameBuffer> {
    let image = image::open(path)?;
    log::info!("loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(frame_from_image(&image))
}

pub fn save_frame(path: &Path, frame: &FrameBuffer) -> Result<()> {
    frame_to_image(frame).save(path)?;
    log::info!("wrote {} ({}x{})", path.display(), frame.width(), frame.height());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_to_frame_normalizes() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([255, 0, 51]));
        image.put_pixel(1, 0, Rgb([0, 255, 0]));
        let frame = frame_from_image(&DynamicImage::ImageRgb8(image));

        assert_eq!(frame.dimensions(), (2, 1));
        let p = frame.get(0, 0);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert_eq!(p.y, 0.0);
        assert!((p.z - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_frame_to_image_clamps_hdr() {
        let mut frame = FrameBuffer::new(3, 1);
        frame.set(0, 0, Vec3::new(2.5, -1.0, 0.5));
        frame.set(2, 0, Vec3::splat(1.0));
        let image = frame_to_image(&frame);

        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 128]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(2, 0).0, [255, 255, 255]);
    }
}
