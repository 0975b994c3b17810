//! Fixtures shared by unit tests.
use std::io::Cursor;
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage, Rgba, RgbaImage};

/// Encodes a solid magenta RGBA image as PNG.
pub(crate) fn rgba_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([255, 0, 255, 255]));
    encode(DynamicImage::ImageRgba8(image))
}

/// Encodes a solid RGB image as PNG.
pub(crate) fn rgb_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([10, 20, 30]));
    encode(DynamicImage::ImageRgb8(image))
}

fn encode(image: DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png).unwrap();
    bytes
}
