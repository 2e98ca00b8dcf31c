use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Unsupported file type(s): {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("No files were provided")]
    EmptyBatch,

    #[error("Archive packaging failed: {0}")]
    Packaging(String),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid scale value: {0}. Must be between 1 and 100")]
    InvalidScale(u8),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("No image files found in input path: {0}")]
    NoImageFilesFound(String),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, BatchError>;
