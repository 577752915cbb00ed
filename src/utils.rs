/*!
 * Utility functions for projectmd
 */

use std::path::{Component, Path};

/// Directory names that are never traversed, whatever the ignore rules say
pub const ALWAYS_EXCLUDED_DIRS: [&str; 2] = [".git", "__pycache__"];

/// Default ignore file looked up at the traversal root
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Render a relative path with forward slashes regardless of platform
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

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
