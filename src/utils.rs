/// Helpers shared by the batch summary printout and the result model.
use crate::constants::{MAX_QUALITY, MIN_QUALITY};

/// Format file size in human-readable form (e.g., "1.2 MB", "512 B").
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Compression ratio as a percentage. Positive means the output shrank,
/// negative means it grew.
pub fn calculate_compression_ratio(original_size: u64, converted_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - converted_size as f64) / original_size as f64) * 100.0
}

/// Parse a quality form field; out-of-range or unparseable input falls
/// back to the given default.
pub fn parse_quality_or(raw: &str, default: u8) -> u8 {
    match raw.trim().parse::<u8>() {
        Ok(q) if (MIN_QUALITY..=MAX_QUALITY).contains(&q) => q,
        _ => default,
    }
}
