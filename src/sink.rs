use crate::error::{BatchError, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// What a finished sink hands back to the caller.
#[derive(Debug)]
pub enum Delivery {
    /// Paths written by a [`DirectorySink`], in submission order.
    Files(Vec<PathBuf>),
    /// A single archive built by a [`ZipSink`].
    Archive { file_name: String, bytes: Vec<u8> },
    /// In-memory outputs collected by a [`BufferSink`].
    Buffered(Vec<(String, Vec<u8>)>),
}

/// Delivery strategy selected once per batch. The orchestrator hands each
/// successful output to `accept` and finalizes with `finish` exactly once.
pub trait OutputSink {
    fn accept(&mut self, name: &str, bytes: &[u8]) -> Result<()>;
    fn finish(&mut self) -> Result<Delivery>;
}

/// Writes each output as an individual file under one directory.
/// Duplicate output names overwrite earlier files.
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|_| BatchError::DirectoryCreationFailed(dir.clone()))?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl OutputSink for DirectorySink {
    fn accept(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, bytes)?;
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> Result<Delivery> {
        Ok(Delivery::Files(std::mem::take(&mut self.written)))
    }
}

/// Accumulates all outputs into one in-memory ZIP archive named after the
/// batch start time. Duplicate entry names are appended as-is, without
/// de-duplication. An all-failure batch finalizes to a valid empty archive.
pub struct ZipSink {
    file_name: String,
    writer: Option<ZipWriter<Cursor<Vec<u8>>>>,
}

impl ZipSink {
    pub fn new(artifact_kind: &str) -> Self {
        Self::with_start_time(artifact_kind, Utc::now())
    }

    pub fn with_start_time(artifact_kind: &str, started: DateTime<Utc>) -> Self {
        Self {
            file_name: archive_file_name(artifact_kind, started),
            writer: Some(ZipWriter::new(Cursor::new(Vec::new()))),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl OutputSink for ZipSink {
    fn accept(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| BatchError::Packaging("archive already finalized".to_string()))?;
        writer
            .start_file(name, SimpleFileOptions::default())
            .map_err(|e| BatchError::Packaging(e.to_string()))?;
        writer.write_all(bytes)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<Delivery> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| BatchError::Packaging("archive already finalized".to_string()))?;
        let cursor = writer
            .finish()
            .map_err(|e| BatchError::Packaging(e.to_string()))?;
        Ok(Delivery::Archive {
            file_name: self.file_name.clone(),
            bytes: cursor.into_inner(),
        })
    }
}

/// Collects named outputs in memory, in submission order.
#[derive(Debug, Default)]
pub struct BufferSink {
    items: Vec<(String, Vec<u8>)>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputSink for BufferSink {
    fn accept(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.items.push((name.to_string(), bytes.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> Result<Delivery> {
        Ok(Delivery::Buffered(std::mem::take(&mut self.items)))
    }
}

/// Archive download name: `<artifact-kind>-<timestamp>.zip`, timestamp at
/// second precision with `:` and `.` replaced by `-`.
pub fn archive_file_name(artifact_kind: &str, started: DateTime<Utc>) -> String {
    let stamp = started
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
        .replace([':', '.'], "-");
    format!("{}-{}.zip", artifact_kind, stamp)
}
