//! Process-local cache of in-progress breaks.
//!
//! The cache is an optimization, never a source of truth: it dies with the
//! process and the status resolver rebuilds entries from the time-log break
//! columns whenever one is missing. Nothing here touches the store.

use crate::models::break_type::BreakType;
use chrono::NaiveDateTime;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct BreakTimer {
    pub employee_id: String,
    pub break_type: BreakType,
    pub start_time: NaiveDateTime,
    pub time_limit_minutes: i64,
}

#[derive(Debug, Default)]
pub struct BreakTimerCache {
    timers: HashMap<String, BreakTimer>,
}

impl BreakTimerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or overwrite) the timer for an employee. The allowance is
    /// fixed by the break type. No-op on an empty employee id.
    pub fn record_break_start(
        &mut self,
        employee_id: &str,
        break_type: BreakType,
        start_time: NaiveDateTime,
    ) {
        if employee_id.is_empty() {
            return;
        }

        self.timers.insert(
            employee_id.to_string(),
            BreakTimer {
                employee_id: employee_id.to_string(),
                break_type,
                start_time,
                time_limit_minutes: break_type.limit_minutes(),
            },
        );
    }

    /// Remove the timer if present. Idempotent.
    pub fn clear(&mut self, employee_id: &str) {
        if employee_id.is_empty() {
            return;
        }
        self.timers.remove(employee_id);
    }

    pub fn get(&self, employee_id: &str) -> Option<&BreakTimer> {
        self.timers.get(employee_id)
    }
}
