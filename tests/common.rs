use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use img_batcher::model::SourceImage;
use std::io::Cursor;

/// Encode a real in-memory test image so decode paths are exercised.
pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

pub fn png_source(name: &str, width: u32, height: u32) -> SourceImage {
    SourceImage::new(name, "image/png", image_bytes(width, height, ImageFormat::Png))
}

pub fn jpeg_source(name: &str, width: u32, height: u32) -> SourceImage {
    SourceImage::new(
        name,
        "image/jpeg",
        image_bytes(width, height, ImageFormat::Jpeg),
    )
}

/// Bytes that no decoder accepts, declared as PNG.
pub fn corrupt_source(name: &str) -> SourceImage {
    SourceImage::new(name, "image/png", b"this is not an image".to_vec())
}
