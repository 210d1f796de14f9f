use crate::models::break_type::BreakType;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Log ID prefix for rows synthesized by the eligibility grant. Downstream
/// reports use it to flag or exclude these entries.
pub const AUTO_LOG_PREFIX: &str = "AUTO-";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum LogStatus {
    Incomplete,
    Complete,
}

impl LogStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LogStatus::Incomplete => "Incomplete",
            LogStatus::Complete => "Complete",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Incomplete" => Some(LogStatus::Incomplete),
            "Complete" => Some(LogStatus::Complete),
            _ => None,
        }
    }
}

/// One row of the time_logs table: a single clock-in event with up to two
/// regular breaks, one lunch break, and the derived missed-minute columns.
#[derive(Debug, Clone, Serialize)]
pub struct TimeLogEntry {
    pub log_id: String,
    pub employee_id: String,
    pub date: NaiveDateTime, // day the shift is attributed to
    pub clock_in: Option<NaiveDateTime>,
    pub clock_out: Option<NaiveDateTime>,
    pub break1_start: Option<NaiveDateTime>,
    pub break1_end: Option<NaiveDateTime>,
    pub break2_start: Option<NaiveDateTime>,
    pub break2_end: Option<NaiveDateTime>,
    pub lunch_start: Option<NaiveDateTime>,
    pub lunch_end: Option<NaiveDateTime>,

    // Derived hour columns, filled when the log is completed
    pub total_hours: Option<f64>,
    pub reg_break_hours: Option<f64>,
    pub lunch_hours: Option<f64>,
    pub net_hours: Option<f64>,

    pub status: LogStatus,

    // Derived missed-minute columns, each absent until the event occurs
    pub late_minutes: Option<f64>,
    pub early_minutes: Option<f64>,
    pub break1_missed: Option<f64>,
    pub break2_missed: Option<f64>,
    pub lunch_missed: Option<f64>,
    pub total_missed: Option<f64>,

    pub notes: String,
    pub created_at: String,
}

/// A break slot whose start is recorded but whose end is not.
#[derive(Debug, Clone, Copy)]
pub struct OpenBreak {
    pub break_type: BreakType,
    pub break_number: u8, // 1 or 2 for regular, 1 for lunch
    pub started_at: NaiveDateTime,
}

impl TimeLogEntry {
    /// A log is open while it is flagged Incomplete or has no clock-out,
    /// whichever happens first. Readers prefer this over the status flag
    /// alone so that rows mangled by hand still resolve.
    pub fn is_open(&self) -> bool {
        self.status == LogStatus::Incomplete || self.clock_out.is_none()
    }

    pub fn shift_date(&self) -> NaiveDate {
        self.date.date()
    }

    /// Completed regular-break slots (both start and end populated).
    pub fn regular_breaks_taken(&self) -> u8 {
        let mut taken = 0;
        if self.break1_start.is_some() && self.break1_end.is_some() {
            taken += 1;
        }
        if self.break2_start.is_some() && self.break2_end.is_some() {
            taken += 1;
        }
        taken
    }

    /// True only when the lunch pair is complete. An in-progress lunch
    /// reports false so the kiosk keeps showing the running timer.
    pub fn lunch_break_taken(&self) -> bool {
        self.lunch_start.is_some() && self.lunch_end.is_some()
    }

    /// The in-progress break, if any. Lunch wins over regular slots, and
    /// slot 1 over slot 2, matching the status classification order.
    pub fn open_break(&self) -> Option<OpenBreak> {
        if let Some(start) = self.lunch_start {
            if self.lunch_end.is_none() {
                return Some(OpenBreak {
                    break_type: BreakType::Lunch,
                    break_number: 1,
                    started_at: start,
                });
            }
        }
        if let Some(start) = self.break1_start {
            if self.break1_end.is_none() {
                return Some(OpenBreak {
                    break_type: BreakType::Regular,
                    break_number: 1,
                    started_at: start,
                });
            }
        }
        if let Some(start) = self.break2_start {
            if self.break2_end.is_none() {
                return Some(OpenBreak {
                    break_type: BreakType::Regular,
                    break_number: 2,
                    started_at: start,
                });
            }
        }
        None
    }

    /// Sum of the five missed-minute contributors, each blank field counted
    /// as zero. Never negative.
    pub fn total_missed_minutes(&self) -> f64 {
        let sum = self.late_minutes.unwrap_or(0.0)
            + self.early_minutes.unwrap_or(0.0)
            + self.break1_missed.unwrap_or(0.0)
            + self.break2_missed.unwrap_or(0.0)
            + self.lunch_missed.unwrap_or(0.0);
        sum.max(0.0)
    }

    pub fn is_auto_granted(&self) -> bool {
        self.log_id.starts_with(AUTO_LOG_PREFIX)
    }
}
