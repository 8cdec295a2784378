/// Size formatting utilities — human-readable byte counts.
///
/// All internal sizes are `u64` bytes. Floating point appears only at
/// the display-formatting boundary.

/// Unit ladder: (divisor, label, decimal places).
///
/// Binary divisors (KiB = 1024) with the short labels users expect in a
/// disk tool.
const UNITS: [(u64, &str, usize); 4] = [
    (1 << 40, "TB", 2),
    (1 << 30, "GB", 2),
    (1 << 20, "MB", 1),
    (1 << 10, "KB", 1),
];

/// Format a byte count into a human-readable string with appropriate unit.
pub fn format_size(bytes: u64) -> String {
    for (divisor, label, places) in UNITS {
        if bytes >= divisor {
            let value = bytes as f64 / divisor as f64;
            return format!("{value:.places$} {label}");
        }
    }
    format!("{bytes} B")
}

/// Format a count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
