//! Human-readable formatting for sizes and timestamps.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

/// Format a byte count the way listing rows display it: whole bytes below
/// 1 KB, one decimal above.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Format an RFC 3339 commit timestamp as a short human date.
/// Unparseable input comes back unchanged rather than erroring.
pub fn format_commit_date(raw: &str) -> String {
    let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) else {
        return raw.to_string();
    };
    let description = format_description!("[month repr:short] [day padding:none], [year]");
    parsed.format(&description).unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(473), "473 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(2 * 1024 * 1024 + 300 * 1024), "2.3 MB");
        assert_eq!(format_size(1181116006), "1.1 GB");
    }

    #[test]
    fn commit_dates() {
        assert_eq!(format_commit_date("2026-01-03T10:00:00Z"), "Jan 3, 2026");
        assert_eq!(format_commit_date("not a date"), "not a date");
    }
}
