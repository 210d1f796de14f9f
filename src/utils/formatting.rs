//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Render fractional hours as "7.82h".
pub fn hours2readable(hours: f64) -> String {
    format!("{:.2}h", hours)
}

/// Render minutes for the missed-minutes columns: whole values without the
/// trailing ".0", fractional overage at two decimals.
pub fn mins2readable(mins: f64) -> String {
    if (mins - mins.round()).abs() < f64::EPSILON {
        format!("{}m", mins.round() as i64)
    } else {
        format!("{:.2}m", mins)
    }
}
