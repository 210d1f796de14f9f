//! Break start/end transitions.
//!
//! Preconditions are checked against the resolved status, so a failed start
//! or end mutates nothing. Break overage accrues into the slot's
//! missed-minutes column at break end.

use crate::core::break_cache::BreakTimerCache;
use crate::core::missed::pay_period_missed_minutes;
use crate::core::status::employee_status;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    find_active_log, find_log_by_id, recompute_total_missed, set_break_end, set_break_start,
};
use crate::errors::AppResult;
use crate::models::break_type::BreakType;
use crate::models::outcome::{BreakEndOutcome, BreakStartOutcome};
use crate::models::status::{STATUS_ON_LUNCH_BREAK, STATUS_ON_REGULAR_BREAK};
use crate::models::time_log::TimeLogEntry;
use crate::utils::time::{format_timestamp, minutes_between, round2};
use chrono::NaiveDateTime;

pub fn start_break(
    pool: &mut DbPool,
    timers: &mut BreakTimerCache,
    employee_id: &str,
    break_type: BreakType,
    now: NaiveDateTime,
) -> BreakStartOutcome {
    match start_break_inner(pool, timers, employee_id, break_type, now) {
        Ok(outcome) => outcome,
        Err(e) => BreakStartOutcome::failure(format!("Error: {}", e)),
    }
}

fn start_break_inner(
    pool: &mut DbPool,
    timers: &mut BreakTimerCache,
    employee_id: &str,
    break_type: BreakType,
    now: NaiveDateTime,
) -> AppResult<BreakStartOutcome> {
    let status = employee_status(pool, timers, employee_id);

    if !status.is_clocked_in() {
        return Ok(BreakStartOutcome::failure(
            "You must be clocked in to take a break",
        ));
    }

    if break_type == BreakType::Regular && status.regular_breaks_taken >= 2 {
        return Ok(BreakStartOutcome::failure(
            "You have already taken your allowed regular breaks",
        ));
    }

    if break_type == BreakType::Lunch && status.lunch_break_taken {
        return Ok(BreakStartOutcome::failure(
            "You have already taken your lunch break",
        ));
    }

    let log = match active_log_for(pool, &status.log_id, employee_id)? {
        Some(log) => log,
        None => return Ok(BreakStartOutcome::failure("No active time log found")),
    };

    // Next unused slot: first regular slot when none taken, else the second;
    // lunch always has a single slot.
    let slot = match break_type {
        BreakType::Regular if status.regular_breaks_taken == 0 => 1,
        BreakType::Regular => 2,
        BreakType::Lunch => 1,
    };

    set_break_start(&pool.conn, &log.log_id, break_type, slot, now)?;
    timers.record_break_start(employee_id, break_type, now);
    ttlog(&pool.conn, "break_start", employee_id, &log.log_id)?;

    Ok(BreakStartOutcome {
        success: true,
        message: format!("{} break started", break_type.label()),
        break_type: Some(break_type.as_str().to_string()),
        start_time: Some(format_timestamp(now)),
    })
}

pub fn end_break(
    pool: &mut DbPool,
    timers: &mut BreakTimerCache,
    employee_id: &str,
    break_type: BreakType,
    now: NaiveDateTime,
) -> BreakEndOutcome {
    match end_break_inner(pool, timers, employee_id, break_type, now) {
        Ok(outcome) => outcome,
        Err(e) => BreakEndOutcome::failure(format!("Error: {}", e)),
    }
}

fn end_break_inner(
    pool: &mut DbPool,
    timers: &mut BreakTimerCache,
    employee_id: &str,
    break_type: BreakType,
    now: NaiveDateTime,
) -> AppResult<BreakEndOutcome> {
    let status = employee_status(pool, timers, employee_id);

    let expected = match break_type {
        BreakType::Regular => STATUS_ON_REGULAR_BREAK,
        BreakType::Lunch => STATUS_ON_LUNCH_BREAK,
    };
    if status.status != expected {
        return Ok(BreakEndOutcome::failure(format!(
            "You are not currently on a {} break",
            break_type.as_str()
        )));
    }

    let log = match active_log_for(pool, &status.log_id, employee_id)? {
        Some(log) => log,
        None => return Ok(BreakEndOutcome::failure("No active time log found")),
    };

    // Slot and start time come from the row; the cached timer is the
    // fallback source of the start when the cell cannot be resolved.
    let (slot, start_time) = match log.open_break().filter(|b| b.break_type == break_type) {
        Some(open) => (open.break_number, Some(open.started_at)),
        None => (fallback_slot(&log, break_type), None),
    };

    let start_time = match start_time.or_else(|| timers.get(employee_id).map(|t| t.start_time)) {
        Some(t) => t,
        None => {
            return Ok(BreakEndOutcome::failure(
                "Could not determine break start time",
            ));
        }
    };

    let elapsed = minutes_between(start_time, now);
    let limit = break_type.limit_minutes() as f64;
    let extended_minutes = if elapsed > limit {
        round2(elapsed - limit)
    } else {
        0.0
    };

    let missed = if extended_minutes > 0.0 {
        Some(extended_minutes)
    } else {
        None
    };
    set_break_end(&pool.conn, &log.log_id, break_type, slot, now, missed)?;

    timers.clear(employee_id);
    recompute_total_missed(pool, &log.log_id)?;
    ttlog(&pool.conn, "break_end", employee_id, &log.log_id)?;

    let summary = pay_period_missed_minutes(pool, employee_id, now.date());

    Ok(BreakEndOutcome {
        success: true,
        message: format!("{} break ended", break_type.label()),
        extended_minutes,
        pay_period_missed_minutes: summary.total,
    })
}

/// The active log, preferring the id the resolver reported.
fn active_log_for(
    pool: &mut DbPool,
    log_id: &str,
    employee_id: &str,
) -> AppResult<Option<TimeLogEntry>> {
    if !log_id.is_empty()
        && let Some(log) = find_log_by_id(pool, log_id)?
    {
        return Ok(Some(log));
    }
    find_active_log(pool, employee_id)
}

/// Which slot to close when the row itself no longer shows an open pair.
fn fallback_slot(log: &TimeLogEntry, break_type: BreakType) -> u8 {
    match break_type {
        BreakType::Lunch => 1,
        BreakType::Regular => {
            if log.break1_start.is_some() && log.break1_end.is_none() {
                1
            } else if log.break2_start.is_some() && log.break2_end.is_none() {
                2
            } else if log.break1_start.is_none() {
                1
            } else {
                2
            }
        }
    }
}
