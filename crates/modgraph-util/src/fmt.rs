//! Human-readable formatting helpers.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count as a short human-readable string: `0 B`, `1.5 KB`,
/// `12 MB`. One decimal place, trailing `.0` dropped.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exp = (((bytes as f64).ln() / 1024f64.ln()) as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[exp])
    } else {
        format!("{rounded:.1} {}", UNITS[exp])
    }
}
