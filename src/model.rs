use crate::error::{BatchError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One input image as selected by the user, immutable for the whole batch.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a source image from disk; the MIME type is derived from the
    /// file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BatchError::FileNotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        let mime_type = path
            .extension()
            .and_then(|e| e.to_str())
            .map(mime_for_extension)
            .unwrap_or("application/octet-stream")
            .to_string();

        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }

    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Per-file outcome of one batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ItemResult {
    Success(ItemSuccess),
    Failure(ItemFailure),
}

impl ItemResult {
    pub fn original_name(&self) -> &str {
        match self {
            ItemResult::Success(s) => &s.original_name,
            ItemResult::Failure(f) => &f.original_name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ItemResult::Success(_))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSuccess {
    pub original_name: String,
    pub output_name: String,
    pub original_size: u64,
    pub converted_size: u64,
    pub compression_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_dimensions: Option<Dimensions>,
    /// Base64-encoded output bytes; set only by the JSON endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFailure {
    pub original_name: String,
    pub error_message: String,
}

/// Aggregate accounting for a batch run. `successful_count + failed_count`
/// always equals `total_files`, and `results` keeps submission order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub total_files: usize,
    pub successful_count: usize,
    pub failed_count: usize,
    pub results: Vec<ItemResult>,
}
