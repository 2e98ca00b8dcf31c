use crate::error::Result;
use crate::model::SourceImage;
use crate::probe::probe_dimensions;
use crate::transform::source_format;
use crate::utils::format_file_size;
use std::path::Path;

/// Print basic information about a single image file.
pub fn print_image_info(input_path: &Path) -> Result<()> {
    let source = SourceImage::from_path(input_path)?;
    let dims = probe_dimensions(&source.bytes)?;
    let format = source_format(&source)?;

    println!("📋 File: {:?}", input_path);
    println!("  📏 Dimensions: {}x{} pixels", dims.width, dims.height);
    println!(
        "  📦 File size: {} ({} bytes)",
        format_file_size(source.byte_size()),
        source.byte_size()
    );
    println!("  🎭 Format: {:?}", format);
    println!(
        "  📐 Aspect ratio: {:.2}:1",
        dims.width as f64 / dims.height as f64
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BatchError;

    #[test]
    fn test_print_image_info_not_found() {
        let result = print_image_info(Path::new("nonexistent.jpg"));
        assert!(matches!(result, Err(BatchError::FileNotFound(_))));
    }
}
