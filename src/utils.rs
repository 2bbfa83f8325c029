/*!
 * Utility functions for filescan
 */

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::config::TIMESTAMP_FORMAT;

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Local time as `YYYY/MM/DD HH:MM:SS`
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Local time in RFC 3339, keeping sub-second precision
pub fn rfc3339_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time).to_rfc3339()
}

/// `path` relative to `root` when it lies below it
pub fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
