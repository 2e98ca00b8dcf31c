use crate::error::{BatchError, Result};
use crate::model::Dimensions;
use image::ImageReader;
use std::collections::HashMap;
use std::io::Cursor;

/// Read pixel dimensions from image bytes without a full pixel decode.
pub fn probe_dimensions(bytes: &[u8]) -> Result<Dimensions> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| BatchError::Decode(e.to_string()))?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| BatchError::Decode(e.to_string()))?;
    Ok(Dimensions { width, height })
}

/// Dimension cache scoped to one batch run.
///
/// Entries are keyed by the original file name, not by content: two
/// sources sharing a name within a batch reuse the first probe.
#[derive(Debug, Default)]
pub struct DimensionCache {
    entries: HashMap<String, Dimensions>,
}

impl DimensionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_probe(&mut self, name: &str, bytes: &[u8]) -> Result<Dimensions> {
        if let Some(dims) = self.entries.get(name) {
            return Ok(*dims);
        }
        let dims = probe_dimensions(bytes)?;
        self.entries.insert(name.to_string(), dims);
        Ok(dims)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
