//! Pay-period missed-minutes aggregation.
//!
//! Always a full rescan of the employee's rows, invoked reactively after
//! clock-in (if late), clock-out (if early) and break-end (always). Nothing
//! is cached or incrementally maintained.

use crate::db::pool::DbPool;
use crate::db::queries::{active_pay_period, load_time_logs};
use crate::utils::date::format_date;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissedDetail {
    pub date: String,
    pub missed_minutes: f64,
    pub log_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissedSummary {
    pub total: f64,
    pub details: Vec<MissedDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_period: Option<String>,
}

impl MissedSummary {
    pub fn zero() -> Self {
        Self {
            total: 0.0,
            details: Vec::new(),
            pay_period: None,
        }
    }
}

/// Sum `total_missed` over the employee's logs inside the currently active
/// pay period (bounds inclusive). No active period, or any store failure,
/// degrades to a zero summary.
pub fn pay_period_missed_minutes(
    pool: &mut DbPool,
    employee_id: &str,
    today: NaiveDate,
) -> MissedSummary {
    let period = match active_pay_period(pool, today) {
        Ok(Some(p)) => p,
        _ => return MissedSummary::zero(),
    };

    let logs = match load_time_logs(pool, Some(employee_id)) {
        Ok(logs) => logs,
        Err(_) => return MissedSummary::zero(),
    };

    let mut total = 0.0;
    let mut details = Vec::new();

    for log in logs {
        if !period.contains(log.shift_date()) {
            continue;
        }

        let missed = log.total_missed.unwrap_or(0.0);
        if missed > 0.0 {
            total += missed;
            details.push(MissedDetail {
                date: format_date(log.shift_date()),
                missed_minutes: missed,
                log_id: log.log_id.clone(),
            });
        }
    }

    MissedSummary {
        total,
        details,
        pay_period: Some(period.name),
    }
}
