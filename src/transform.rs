use crate::constants::{
    DEFAULT_QUALITY, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, MAX_QUALITY, MAX_SCALE,
    MIN_QUALITY, MIN_SCALE, ZOPFLI_ITERATIONS,
};
use crate::error::{BatchError, Result};
use crate::model::{Dimensions, SourceImage};
use crate::probe::DimensionCache;
use image::{DynamicImage, ImageFormat};
use oxipng::{Deflaters, Options};
use std::io::Cursor;
use std::num::NonZeroU8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode {
    ConvertOnly,
    Resize { scale_percent: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    /// Re-encode in the source's own format.
    Original,
    /// Lossy WebP at the requested quality.
    WebP,
}

/// Immutable parameters governing every item in a batch.
#[derive(Debug, Clone)]
pub struct TransformSpec {
    pub mode: TransformMode,
    pub target: TargetFormat,
    pub quality: u8,
}

impl TransformSpec {
    pub fn new(mode: TransformMode, target: TargetFormat, quality: Option<u8>) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(BatchError::InvalidQuality(quality));
        }
        if let TransformMode::Resize { scale_percent } = mode {
            if !(MIN_SCALE..=MAX_SCALE).contains(&scale_percent) {
                return Err(BatchError::InvalidScale(scale_percent));
            }
        }

        Ok(Self {
            mode,
            target,
            quality,
        })
    }

    pub fn convert_only(target: TargetFormat, quality: Option<u8>) -> Result<Self> {
        Self::new(TransformMode::ConvertOnly, target, quality)
    }

    pub fn resize(scale_percent: u8, target: TargetFormat, quality: Option<u8>) -> Result<Self> {
        Self::new(TransformMode::Resize { scale_percent }, target, quality)
    }
}

#[derive(Debug)]
pub struct TransformOutput {
    pub bytes: Vec<u8>,
    pub original_size: u64,
    pub converted_size: u64,
    pub original_dimensions: Option<Dimensions>,
    pub new_dimensions: Option<Dimensions>,
}

/// Convert or resize a single source image.
///
/// Resize mode reads the original dimensions through the batch's
/// dimension cache and scales both axes by the same percentage, each
/// rounded independently. Naming of the output is the caller's concern.
pub fn transform_image(
    source: &SourceImage,
    spec: &TransformSpec,
    cache: &mut DimensionCache,
) -> Result<TransformOutput> {
    let original_size = source.byte_size();
    let img = image::load_from_memory(&source.bytes)
        .map_err(|e| BatchError::Decode(e.to_string()))?;

    let (img, original_dimensions, new_dimensions) = match spec.mode {
        TransformMode::ConvertOnly => (img, None, None),
        TransformMode::Resize { scale_percent } => {
            let original = cache.get_or_probe(&source.name, &source.bytes)?;
            let scaled = scaled_dimensions(original, scale_percent);
            if scaled.width == 0 || scaled.height == 0 {
                return Err(BatchError::Encode(format!(
                    "scaling {} to {}% leaves no pixels",
                    source.name, scale_percent
                )));
            }
            let resized = if scaled == original {
                img
            } else {
                img.resize_exact(
                    scaled.width,
                    scaled.height,
                    image::imageops::FilterType::Lanczos3,
                )
            };
            (resized, Some(original), Some(scaled))
        }
    };

    let bytes = match spec.target {
        TargetFormat::WebP => encode_webp(&img, spec.quality),
        TargetFormat::Original => encode_original(&img, source, spec.quality),
    }?;
    if bytes.is_empty() {
        return Err(BatchError::Encode("encoder produced no output".to_string()));
    }

    Ok(TransformOutput {
        original_size,
        converted_size: bytes.len() as u64,
        original_dimensions,
        new_dimensions,
        bytes,
    })
}

/// Scale both axes by `scale_percent`, rounding each independently.
/// Rounding per axis can drift from a strict aspect ratio by up to 1px.
pub fn scaled_dimensions(original: Dimensions, scale_percent: u8) -> Dimensions {
    let scale = scale_percent as f64 / 100.0;
    Dimensions {
        width: (original.width as f64 * scale).round() as u32,
        height: (original.height as f64 * scale).round() as u32,
    }
}

/// Resolve the source's own format, preferring content sniffing over the
/// declared MIME type.
pub fn source_format(source: &SourceImage) -> Result<ImageFormat> {
    if let Ok(format) = image::guess_format(&source.bytes) {
        return Ok(format);
    }
    match source.mime_type.to_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Ok(ImageFormat::Jpeg),
        "image/png" => Ok(ImageFormat::Png),
        "image/webp" => Ok(ImageFormat::WebP),
        "image/gif" => Ok(ImageFormat::Gif),
        other => Err(BatchError::Decode(format!(
            "unrecognized image format: {}",
            other
        ))),
    }
}

fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgba = img.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
    let encoded = encoder.encode(quality as f32);
    Ok(encoded.to_vec())
}

fn encode_original(img: &DynamicImage, source: &SourceImage, quality: u8) -> Result<Vec<u8>> {
    let format = source_format(source)?;
    let mut cursor = Cursor::new(Vec::new());

    match format {
        ImageFormat::Png => {
            img.write_to(&mut cursor, ImageFormat::Png)
                .map_err(|e| BatchError::Encode(e.to_string()))?;
            optimize_png(&cursor.into_inner(), quality)
        }
        ImageFormat::Jpeg => {
            // The JPEG encoder rejects alpha channels.
            DynamicImage::ImageRgb8(img.to_rgb8())
                .write_to(&mut cursor, ImageFormat::Jpeg)
                .map_err(|e| BatchError::Encode(e.to_string()))?;
            Ok(cursor.into_inner())
        }
        ImageFormat::WebP | ImageFormat::Gif => {
            img.write_to(&mut cursor, format)
                .map_err(|e| BatchError::Encode(e.to_string()))?;
            Ok(cursor.into_inner())
        }
        other => Err(BatchError::Encode(format!(
            "unsupported output format: {:?}",
            other
        ))),
    }
}

/// Lossless structural optimization for PNG outputs. The deflate effort
/// follows the quality setting; pixel data is unaffected.
fn optimize_png(png: &[u8], quality: u8) -> Result<Vec<u8>> {
    let mut options = Options::from_preset(4);
    options.force = true;

    options.deflate = if quality >= 90 {
        Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap(),
        }
    } else if quality >= 70 {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    };

    oxipng::optimize_from_memory(png, &options).map_err(|e| BatchError::Encode(e.to_string()))
}
