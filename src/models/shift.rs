use crate::utils::time::parse_shift_time;
use chrono::{NaiveTime, Timelike};
use serde::Serialize;

/// Shift schedule row. The four time columns are format-agnostic: they may
/// hold "HH:MM[:SS]" strings, a full datetime, or an Excel-style
/// fractional-day number, depending on how the row was populated.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftDefinition {
    pub shift_id: String,
    pub name: String,
    pub is_overnight: Option<bool>, // None = derive from start/end times
    pub week_a_start: Option<String>,
    pub week_a_end: Option<String>,
    pub week_b_start: Option<String>,
    pub week_b_end: Option<String>,
}

impl ShiftDefinition {
    /// Scheduled start time of day (Week A). None when missing or unparseable.
    pub fn start_time(&self) -> Option<NaiveTime> {
        self.week_a_start.as_deref().and_then(parse_shift_time)
    }

    /// Scheduled end time of day (Week A).
    pub fn end_time(&self) -> Option<NaiveTime> {
        self.week_a_end.as_deref().and_then(parse_shift_time)
    }

    /// Whether this shift crosses midnight. Uses the stored flag when
    /// present, otherwise infers from the start/end hour-of-day.
    pub fn overnight(&self) -> bool {
        if let Some(flag) = self.is_overnight {
            return flag;
        }
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => is_overnight_span(start, end),
            _ => false,
        }
    }
}

/// A shift is overnight when its end hour precedes its start hour, or when
/// it starts in the afternoon and ends in the morning.
pub fn is_overnight_span(start: NaiveTime, end: NaiveTime) -> bool {
    let start_hour = start.hour();
    let end_hour = end.hour();
    end_hour < start_hour || (start_hour >= 12 && end_hour < 12)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn night_shift_is_overnight() {
        assert!(is_overnight_span(t(22, 0), t(6, 0)));
    }

    #[test]
    fn day_shift_is_not_overnight() {
        assert!(!is_overnight_span(t(9, 0), t(17, 0)));
    }

    #[test]
    fn afternoon_into_morning_is_overnight() {
        assert!(is_overnight_span(t(12, 0), t(11, 0)));
    }

    #[test]
    fn stored_flag_wins_over_derivation() {
        let shift = ShiftDefinition {
            shift_id: "S1".into(),
            name: "Days".into(),
            is_overnight: Some(true),
            week_a_start: Some("09:00:00".into()),
            week_a_end: Some("17:00:00".into()),
            week_b_start: None,
            week_b_end: None,
        };
        assert!(shift.overnight());
    }

    #[test]
    fn fractional_day_times_derive_overnight() {
        let shift = ShiftDefinition {
            shift_id: "S2".into(),
            name: "Nights".into(),
            is_overnight: None,
            week_a_start: Some("0.9166667".into()), // 22:00
            week_a_end: Some("0.25".into()),        // 06:00
            week_b_start: None,
            week_b_end: None,
        };
        assert!(shift.overnight());
    }
}
