//! Human-readable byte-size formatting, shared by the CLI preview table,
//! the GUI file list, and the `{size}` template placeholder.

/// Format a byte count as a short human-readable string, e.g. "1.5 MB".
///
/// Steps through B, KB, MB and GB in 1024 increments; anything larger is
/// reported in TB. Always one decimal place.
pub fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;

    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }

    format!("{:.1} TB", size)
}
