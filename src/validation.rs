use crate::constants::ALLOWED_UPLOAD_MIME_TYPES;
use crate::error::{BatchError, Result};
use crate::model::SourceImage;

/// Pre-flight check for an upload batch, run before any processing
/// starts. A non-empty list of offending file names aborts the whole
/// request; nothing is partially processed.
pub fn validate_upload_batch(sources: &[SourceImage]) -> Result<()> {
    if sources.is_empty() {
        return Err(BatchError::EmptyBatch);
    }

    let offending: Vec<String> = sources
        .iter()
        .filter(|s| !is_allowed_mime(&s.mime_type))
        .map(|s| s.name.clone())
        .collect();

    if !offending.is_empty() {
        return Err(BatchError::Validation(offending));
    }
    Ok(())
}

pub fn is_allowed_mime(mime: &str) -> bool {
    ALLOWED_UPLOAD_MIME_TYPES.contains(&mime.to_ascii_lowercase().as_str())
}
