//! Formatting helpers for one-line descriptions.

/// Name column width in compact descriptions
pub const COMPACT_NAME_WIDTH: usize = 24;
/// Directory column width in compact descriptions
pub const COMPACT_DIR_WIDTH: usize = 32;
/// Name column width in full descriptions
pub const FULL_NAME_WIDTH: usize = 40;
/// Directory column width in full descriptions
pub const FULL_DIR_WIDTH: usize = 60;
/// Width of the size column
pub const SIZE_WIDTH: usize = 10;

const SIZE_UNITS: [&str; 6] = ["bytes", "kb", "mb", "gb", "tb", "pb"];

/// Truncate a string to `max_len` characters, keeping its tail behind a ".." prefix.
pub fn truncate_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len {
        let keep = max_len.saturating_sub(2);
        let tail: String = name.chars().skip(len - keep).collect();
        format!("..{}", tail)
    } else {
        name.to_string()
    }
}

/// Truncate then left-align a field to exactly `width` columns.
pub fn column(name: &str, width: usize) -> String {
    format!("{:<width$}", truncate_name(name, width), width = width)
}

/// Human-readable size: bits below 1.125 bytes, otherwise powers of 1000.
pub fn format_size(bytes: u64) -> String {
    if (bytes as f64) < 1.125 {
        return format!("{} bits", bytes * 8);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while round2(value) >= 1000.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    format!("{} {}", trim_decimal(value), SIZE_UNITS[unit])
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to two decimals and drop trailing zeros.
fn trim_decimal(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
