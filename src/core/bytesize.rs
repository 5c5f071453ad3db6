//! core::bytesize
//!
//! Human-readable byte-size formatting for attachment and file listings.
//!
//! Sizes below 1024 are rendered as exact byte counts; larger sizes use
//! one-decimal binary units. Unit boundaries are inclusive of the upper
//! unit: exactly 1024 bytes renders as `1.0 KB`.

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Format a byte count for display.
///
/// # Examples
///
/// ```
/// use gogcli::core::bytesize::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(1023), "1023 B");
/// assert_eq!(format_size(1024), "1.0 KB");
/// assert_eq!(format_size(1536), "1.5 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    loop {
        value /= 1024.0;
        if value < 1024.0 || unit == UNITS.len() - 1 {
            break;
        }
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
