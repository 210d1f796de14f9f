//! Time utilities: tolerant timestamp parsing, shift-time normalization,
//! duration computations, formatting.
//!
//! Store cells arrive in whatever shape the row was populated with:
//! "MM/dd/yyyy HH:mm:ss" strings, ISO datetimes, bare dates, "HH:MM[:SS]"
//! times, or Excel-style fractional-day numbers. Everything is normalized
//! here, at the read boundary, so business logic only ever sees chrono types.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Canonical timestamp format used when writing to the store.
pub const STORE_TIMESTAMP_FMT: &str = "%m/%d/%Y %H:%M:%S";

const DATETIME_FORMATS: [&str; 6] = [
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a timestamp in any of the shapes the store holds.
/// Bare dates resolve to midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS.iter() {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0).unwrap());
        }
    }

    None
}

/// Normalize a shift-schedule time cell into a time of day.
///
/// Accepted shapes:
/// - "HH:MM" / "HH:MM:SS"
/// - a full datetime (its time-of-day is taken)
/// - an Excel-style serial where the fractional part is the day fraction
///   (e.g. 0.9166667 → 22:00)
pub fn parse_shift_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in ["%H:%M:%S", "%H:%M"].iter() {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Some(t);
        }
    }

    if let Some(dt) = parse_timestamp(s) {
        return Some(dt.time());
    }

    if let Ok(serial) = s.parse::<f64>() {
        return excel_fraction_to_time(serial);
    }

    None
}

/// Convert the fractional part of an Excel serial into a time of day.
fn excel_fraction_to_time(serial: f64) -> Option<NaiveTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let day_fraction = serial.fract();
    let total_seconds = (day_fraction * 86400.0).round() as u32;
    // 1.0 rounds up to a full day → midnight
    let total_seconds = total_seconds % 86400;

    NaiveTime::from_num_seconds_from_midnight_opt(total_seconds, 0)
}

pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format(STORE_TIMESTAMP_FMT).to_string()
}

pub fn format_time(dt: NaiveDateTime) -> String {
    dt.format("%H:%M:%S").to_string()
}

/// Elapsed minutes between two timestamps, fractional.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64 / 60.0
}

/// Elapsed whole minutes, rounded half-up like the kiosk displays them.
pub fn whole_minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    minutes_between(start, end).round()
}

/// Round to two decimals (break overages are recorded at this precision).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_format() {
        let dt = parse_timestamp("03/10/2025 09:15:30").unwrap();
        assert_eq!(
            dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2025-03-10 09:15:30"
        );
    }

    #[test]
    fn parses_iso_and_bare_date() {
        assert!(parse_timestamp("2025-03-10 09:15:30").is_some());
        assert!(parse_timestamp("2025-03-10T09:15:30").is_some());
        let midnight = parse_timestamp("2025-03-10").unwrap();
        assert_eq!(midnight.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date").is_none());
    }

    #[test]
    fn shift_time_from_clock_string() {
        assert_eq!(
            parse_shift_time("22:00:00"),
            NaiveTime::from_hms_opt(22, 0, 0)
        );
        assert_eq!(parse_shift_time("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
    }

    #[test]
    fn shift_time_from_full_datetime() {
        assert_eq!(
            parse_shift_time("03/10/2025 06:00:00"),
            NaiveTime::from_hms_opt(6, 0, 0)
        );
    }

    #[test]
    fn shift_time_from_excel_fraction() {
        assert_eq!(
            parse_shift_time("0.9166667"),
            NaiveTime::from_hms_opt(22, 0, 0)
        );
        assert_eq!(parse_shift_time("0.25"), NaiveTime::from_hms_opt(6, 0, 0));
        // serial datetime: only the fractional part matters
        assert_eq!(
            parse_shift_time("45722.5"),
            NaiveTime::from_hms_opt(12, 0, 0)
        );
    }

    #[test]
    fn round2_keeps_overage_precision() {
        assert_eq!(round2(5.00499), 5.0);
        assert_eq!(round2(20.333333), 20.33);
    }
}
