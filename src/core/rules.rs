//! Break-rule advisor: warns when an open shift has run too long without a
//! lunch (5h) or any regular break (3h). Advisory only — it appends a note
//! to the log but never blocks a transition.

use crate::db::pool::DbPool;
use crate::db::queries::{append_note, find_active_log};
use crate::errors::AppResult;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakRuleCheck {
    pub enforced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BreakRuleCheck {
    fn clear() -> Self {
        Self {
            enforced: false,
            message: None,
        }
    }
}

const LUNCH_WARNING_HOURS: f64 = 5.0;
const REGULAR_WARNING_HOURS: f64 = 3.0;

pub fn enforce_break_rules(
    pool: &mut DbPool,
    employee_id: &str,
    now: NaiveDateTime,
) -> AppResult<BreakRuleCheck> {
    let log = match find_active_log(pool, employee_id)? {
        Some(log) if log.shift_date() == now.date() => log,
        _ => return Ok(BreakRuleCheck::clear()),
    };

    let clock_in = match log.clock_in {
        Some(cin) => cin,
        None => return Ok(BreakRuleCheck::clear()),
    };

    let hours_worked = (now - clock_in).num_seconds() as f64 / 3600.0;

    if log.lunch_start.is_none() && hours_worked >= LUNCH_WARNING_HOURS {
        append_note(
            &pool.conn,
            &log.log_id,
            "WARNING: 5+ hours worked without lunch break",
        )?;
        return Ok(BreakRuleCheck {
            enforced: true,
            message: Some(
                "You have worked more than 5 hours without a lunch break. \
                 Please take a break now to comply with labor regulations."
                    .to_string(),
            ),
        });
    }

    if log.break1_start.is_none() && log.break2_start.is_none() && hours_worked >= REGULAR_WARNING_HOURS
    {
        append_note(
            &pool.conn,
            &log.log_id,
            "WARNING: 3+ hours worked without a regular break",
        )?;
        return Ok(BreakRuleCheck {
            enforced: true,
            message: Some(
                "You have worked more than 3 hours without a break. \
                 Please take a short break now."
                    .to_string(),
            ),
        });
    }

    Ok(BreakRuleCheck::clear())
}
