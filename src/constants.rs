pub const DEFAULT_QUALITY: u8 = 80;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const MIN_SCALE: u8 = 1;
pub const MAX_SCALE: u8 = 100;

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;

pub const DEFAULT_PORT: u16 = 3030;

/// Upper bound for a whole multipart upload body.
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Extensions accepted when gathering CLI inputs.
pub const SUPPORTED_INPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Declared MIME types the upload endpoints accept.
pub const ALLOWED_UPLOAD_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

pub const CONVERT_ARTIFACT_KIND: &str = "converted-images";
pub const RESIZE_ARTIFACT_KIND: &str = "resized-images";
