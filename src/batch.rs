use crate::constants::{CONVERT_ARTIFACT_KIND, RESIZE_ARTIFACT_KIND, SUPPORTED_INPUT_EXTENSIONS};
use crate::error::{BatchError, Result};
use crate::model::{BatchResult, ItemFailure, ItemResult, ItemSuccess, SourceImage};
use crate::probe::DimensionCache;
use crate::sink::{Delivery, DirectorySink, OutputSink, ZipSink};
use crate::transform::{transform_image, TargetFormat, TransformMode, TransformSpec};
use crate::utils::{calculate_compression_ratio, format_file_size};
use chrono::Utc;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Receives progress updates from a batch run. Percent values are
/// monotonically non-decreasing and reach exactly 100 on the last item;
/// `finished` marks the reset back to zero once the batch is done.
pub trait ProgressObserver {
    fn progress(&self, _percent: f64) {}
    fn finished(&self) {}
}

/// Observer that ignores every update.
pub struct NullProgress;

impl ProgressObserver for NullProgress {}

/// Compute the delivered file name for one source: the original extension
/// is stripped, and `.webp` appended iff the target format is WebP.
pub fn output_name(original: &str, target: TargetFormat) -> String {
    let path = Path::new(original);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(original);

    match target {
        TargetFormat::WebP => format!("{}.webp", stem),
        TargetFormat::Original => match path.extension().and_then(|s| s.to_str()) {
            Some(ext) => format!("{}.{}", stem, ext),
            None => stem.to_string(),
        },
    }
}

/// Drive the transformer over every source in submission order.
///
/// Item failures are recorded and never abort the batch; the sink receives
/// each successful output as soon as it is produced and is finalized once
/// at the end. An empty source list is a no-op: zeroed counts, sink left
/// untouched, no delivery.
pub fn run_batch(
    sources: &[SourceImage],
    spec: &TransformSpec,
    sink: &mut dyn OutputSink,
    progress: &dyn ProgressObserver,
) -> Result<(BatchResult, Option<Delivery>)> {
    let total_files = sources.len();
    if total_files == 0 {
        return Ok((
            BatchResult {
                total_files: 0,
                successful_count: 0,
                failed_count: 0,
                results: Vec::new(),
            },
            None,
        ));
    }

    let mut cache = DimensionCache::new();
    let mut results = Vec::with_capacity(total_files);
    let mut successful_count = 0;
    let mut failed_count = 0;

    for (index, source) in sources.iter().enumerate() {
        match process_item(source, spec, &mut cache, sink) {
            Ok(success) => {
                successful_count += 1;
                results.push(ItemResult::Success(success));
            }
            Err(err) => {
                failed_count += 1;
                results.push(ItemResult::Failure(ItemFailure {
                    original_name: source.name.clone(),
                    error_message: err.to_string(),
                }));
            }
        }
        progress.progress((index + 1) as f64 / total_files as f64 * 100.0);
    }

    let delivery = sink.finish()?;
    progress.finished();

    Ok((
        BatchResult {
            total_files,
            successful_count,
            failed_count,
            results,
        },
        Some(delivery),
    ))
}

fn process_item(
    source: &SourceImage,
    spec: &TransformSpec,
    cache: &mut DimensionCache,
    sink: &mut dyn OutputSink,
) -> Result<ItemSuccess> {
    let output = transform_image(source, spec, cache)?;
    let name = output_name(&source.name, spec.target);
    sink.accept(&name, &output.bytes)?;

    Ok(ItemSuccess {
        original_name: source.name.clone(),
        output_name: name,
        compression_ratio: calculate_compression_ratio(output.original_size, output.converted_size),
        original_size: output.original_size,
        converted_size: output.converted_size,
        original_dimensions: output.original_dimensions,
        new_dimensions: output.new_dimensions,
        data: None,
    })
}

/// Full CLI batch flow: gather inputs, run the pipeline with a progress
/// bar, deliver to a directory or a ZIP archive, print the summary.
pub fn batch_process(
    input: &str,
    output_dir: &Path,
    spec: &TransformSpec,
    zip: bool,
    recursive: bool,
) -> Result<()> {
    println!("🚀 Starting batch processing...");
    println!("📁 Input: {}", input);
    println!("📁 Output: {:?}", output_dir);

    let started = Utc::now();

    let image_files = collect_image_files(input, recursive)?;
    if image_files.is_empty() {
        println!("⚠️  No image files found in the input path");
        return Ok(());
    }
    println!("📊 Found {} image files to process", image_files.len());

    let mut sources = Vec::with_capacity(image_files.len());
    for path in &image_files {
        match SourceImage::from_path(path) {
            Ok(source) => sources.push(source),
            Err(e) => eprintln!("❌ Failed to read {:?}: {}", path, e),
        }
    }
    if sources.is_empty() {
        println!("⚠️  No readable image files in the input path");
        return Ok(());
    }

    let bar = ProgressBar::new(100);
    bar.set_style(ProgressStyle::default_bar());
    let progress = BarProgress { bar };

    let artifact_kind = match spec.mode {
        TransformMode::ConvertOnly => CONVERT_ARTIFACT_KIND,
        TransformMode::Resize { .. } => RESIZE_ARTIFACT_KIND,
    };

    let (summary, delivery) = if zip {
        let mut sink = ZipSink::with_start_time(artifact_kind, started);
        run_batch(&sources, spec, &mut sink, &progress)?
    } else {
        let mut sink = DirectorySink::new(output_dir)?;
        run_batch(&sources, spec, &mut sink, &progress)?
    };

    if let Some(Delivery::Archive { file_name, bytes }) = delivery {
        fs::create_dir_all(output_dir)
            .map_err(|_| BatchError::DirectoryCreationFailed(output_dir.to_path_buf()))?;
        let archive_path = output_dir.join(&file_name);
        fs::write(&archive_path, &bytes)?;
        println!("📦 Archive written: {:?}", archive_path);
    }

    print_summary(&summary);
    Ok(())
}

struct BarProgress {
    bar: ProgressBar,
}

impl ProgressObserver for BarProgress {
    fn progress(&self, percent: f64) {
        self.bar.set_position(percent.round() as u64);
    }

    fn finished(&self) {
        self.bar.finish_with_message("✅ Batch processing complete");
    }
}

fn print_summary(summary: &BatchResult) {
    let mut total_before: u64 = 0;
    let mut total_after: u64 = 0;
    for item in &summary.results {
        if let ItemResult::Success(s) = item {
            total_before += s.original_size;
            total_after += s.converted_size;
        }
    }

    println!("\n📊 Batch Summary:");
    println!("  📁 Total files: {}", summary.total_files);
    println!("  ✅ Successful: {}", summary.successful_count);
    if summary.failed_count > 0 {
        println!("  ❌ Failed: {}", summary.failed_count);
    }
    println!(
        "  📊 Total original size: {}",
        format_file_size(total_before)
    );
    println!(
        "  📈 Total converted size: {}",
        format_file_size(total_after)
    );
    println!(
        "  🎯 Overall compression ratio: {:.1}%",
        calculate_compression_ratio(total_before, total_after)
    );

    for item in &summary.results {
        if let ItemResult::Failure(f) = item {
            println!("  ⚠️  {}: {}", f.original_name, f.error_message);
        }
    }
}

pub fn collect_image_files(input: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();

    let input_path = Path::new(input);
    let canonical_input = if input_path.exists() {
        input_path
            .canonicalize()
            .map_err(|_| BatchError::NoImageFilesFound(input.to_string()))?
    } else {
        input_path.to_path_buf()
    };

    if canonical_input.exists() && canonical_input.is_file() {
        image_files.push(canonical_input);
    } else if canonical_input.exists() && canonical_input.is_dir() {
        let walker = if recursive {
            WalkDir::new(&canonical_input).into_iter()
        } else {
            WalkDir::new(&canonical_input).max_depth(1).into_iter()
        };

        for entry in walker.filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.')) {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && is_image_file(path) {
                if let Ok(canonical_path) = path.canonicalize() {
                    image_files.push(canonical_path);
                }
            }
        }
        // Walk order is platform-dependent; sort for a stable batch order.
        image_files.sort();
    } else if let Ok(glob_pattern) = glob(input) {
        for entry in glob_pattern.flatten() {
            if entry.is_file() && is_image_file(&entry) {
                if let Ok(canonical_path) = entry.canonicalize() {
                    image_files.push(canonical_path);
                }
            }
        }
        image_files.sort();
    } else {
        return Err(BatchError::NoImageFilesFound(input.to_string()));
    }

    Ok(image_files)
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_INPUT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
