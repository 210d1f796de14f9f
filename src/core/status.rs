//! Attendance State Resolver.
//!
//! Determines an employee's current state from the most recent open (or
//! most recent overall) time log, and reconciles the break timer cache as a
//! side effect: an in-progress break with no cached timer gets one rebuilt
//! from the row's break-start column; any other state clears the timer.

use crate::core::break_cache::BreakTimerCache;
use crate::db::pool::DbPool;
use crate::db::queries::{find_active_log, find_latest_log};
use crate::errors::AppResult;
use crate::models::status::{
    EmployeeStatus, STATUS_CLOCKED_IN, STATUS_CLOCKED_OUT, STATUS_ON_LUNCH_BREAK,
    STATUS_ON_REGULAR_BREAK,
};
use crate::models::time_log::{OpenBreak, TimeLogEntry};
use crate::utils::time::format_timestamp;

/// Resolve an employee's current status. Never fails: internal errors come
/// back as `status = "Error"` with a message, since every front-end branches
/// on the status string being present.
pub fn employee_status(
    pool: &mut DbPool,
    timers: &mut BreakTimerCache,
    employee_id: &str,
) -> EmployeeStatus {
    match resolve(pool, timers, employee_id) {
        Ok(status) => status,
        Err(e) => EmployeeStatus::error(e.to_string()),
    }
}

fn resolve(
    pool: &mut DbPool,
    timers: &mut BreakTimerCache,
    employee_id: &str,
) -> AppResult<EmployeeStatus> {
    // Prefer the most recent open log over a plain "last row" rule: a later
    // Complete row must not outrank an older still-open shift.
    let chosen = match find_active_log(pool, employee_id)? {
        Some(log) => Some(log),
        None => find_latest_log(pool, employee_id)?,
    };

    let log = match chosen {
        Some(log) => log,
        None => {
            timers.clear(employee_id);
            return Ok(EmployeeStatus::not_clocked_in());
        }
    };

    let regular_breaks_taken = log.regular_breaks_taken();
    let lunch_break_taken = log.lunch_break_taken();

    if log.is_open() {
        if let Some(open) = log.open_break() {
            return Ok(on_break_status(timers, employee_id, &log, open));
        }

        if log.clock_in.is_some() {
            timers.clear(employee_id);
            return Ok(EmployeeStatus {
                status: STATUS_CLOCKED_IN.to_string(),
                time: log.clock_in.map(format_timestamp).unwrap_or_default(),
                log_id: log.log_id.clone(),
                regular_breaks_taken,
                lunch_break_taken,
                ..EmployeeStatus::not_clocked_in()
            });
        }
    }

    if let Some(out) = log.clock_out {
        timers.clear(employee_id);
        return Ok(EmployeeStatus {
            status: STATUS_CLOCKED_OUT.to_string(),
            time: format_timestamp(out),
            log_id: log.log_id.clone(),
            regular_breaks_taken,
            lunch_break_taken,
            ..EmployeeStatus::not_clocked_in()
        });
    }

    // Row with neither clock-in nor clock-out: treat as never clocked in.
    timers.clear(employee_id);
    Ok(EmployeeStatus::not_clocked_in())
}

/// Build the on-break status and reconcile the timer cache. An existing
/// timer keeps its start time (repeated queries must not move it); a missing
/// one is synthesized from the break-start column.
fn on_break_status(
    timers: &mut BreakTimerCache,
    employee_id: &str,
    log: &TimeLogEntry,
    open: OpenBreak,
) -> EmployeeStatus {
    use crate::models::break_type::BreakType;

    if timers.get(employee_id).is_none() {
        timers.record_break_start(employee_id, open.break_type, open.started_at);
    }

    let timer = timers.get(employee_id);
    let break_start_time = timer.map(|t| t.start_time.format("%Y-%m-%dT%H:%M:%S").to_string());
    let break_time_limit = timer.map(|t| t.time_limit_minutes);

    let (status, break_number, lunch_taken) = match open.break_type {
        // In-progress lunch is not "taken" yet: the kiosk keeps the timer up
        BreakType::Lunch => (STATUS_ON_LUNCH_BREAK, None, false),
        BreakType::Regular => (
            STATUS_ON_REGULAR_BREAK,
            Some(open.break_number),
            log.lunch_break_taken(),
        ),
    };

    EmployeeStatus {
        status: status.to_string(),
        time: format_timestamp(open.started_at),
        log_id: log.log_id.clone(),
        regular_breaks_taken: log.regular_breaks_taken(),
        lunch_break_taken: lunch_taken,
        on_break: Some(open.break_type.as_str().to_string()),
        break_start_time,
        break_time_limit,
        break_number,
        message: None,
    }
}
