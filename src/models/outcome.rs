//! Result shapes for the four user-facing clock actions.
//! Front-ends branch on `success`, so every outcome carries it alongside a
//! human-readable message; extras ride along per action.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockInOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_id: Option<String>,
    pub late_minutes: f64,
    pub pay_period_missed_minutes: f64,
}

impl ClockInOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            log_id: None,
            late_minutes: 0.0,
            pay_period_missed_minutes: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockOutOutcome {
    pub success: bool,
    pub message: String,
    pub early_minutes: f64,
    pub different_day: bool,
    pub pay_period_missed_minutes: f64,
}

impl ClockOutOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            early_minutes: 0.0,
            different_day: false,
            pay_period_missed_minutes: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakStartOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
}

impl BreakStartOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            break_type: None,
            start_time: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakEndOutcome {
    pub success: bool,
    pub message: String,
    pub extended_minutes: f64,
    pub pay_period_missed_minutes: f64,
}

impl BreakEndOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            extended_minutes: 0.0,
            pay_period_missed_minutes: 0.0,
        }
    }
}
