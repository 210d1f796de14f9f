//! Clock-in / clock-out transitions.
//!
//! Both operations always return an outcome struct: precondition failures
//! and internal errors become `{success:false, message}` instead of
//! propagating, because the kiosk branches on `success`.

use crate::core::compliance::{check_if_early_departure, check_if_late};
use crate::core::missed::pay_period_missed_minutes;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    HourTotals, append_note, find_active_log, find_employee, insert_time_log, record_clock_out,
    recompute_total_missed, set_early_minutes,
};
use crate::errors::AppResult;
use crate::models::outcome::{ClockInOutcome, ClockOutOutcome};
use crate::models::time_log::{LogStatus, TimeLogEntry};
use crate::utils::date::format_date;
use chrono::{Local, NaiveDateTime};

/// New log IDs use the tail of the wall-clock epoch millis, like the badge
/// terminals always did.
fn next_log_id() -> String {
    let millis = Local::now().timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(8)..];
    format!("TL{}", tail)
}

pub fn clock_in(pool: &mut DbPool, employee_id: &str, now: NaiveDateTime) -> ClockInOutcome {
    match clock_in_inner(pool, employee_id, now) {
        Ok(outcome) => outcome,
        Err(e) => ClockInOutcome::failure(format!("Error: {}", e)),
    }
}

fn clock_in_inner(
    pool: &mut DbPool,
    employee_id: &str,
    now: NaiveDateTime,
) -> AppResult<ClockInOutcome> {
    if find_employee(pool, employee_id)?.is_none() {
        return Ok(ClockInOutcome::failure(format!(
            "Employee not found: {}",
            employee_id
        )));
    }

    // At most one open shift per employee, system-wide, regardless of date.
    if let Some(open) = find_active_log(pool, employee_id)? {
        return Ok(ClockInOutcome::failure(format!(
            "You have an incomplete time log from {}. Please complete that clock-out first.",
            format_date(open.shift_date())
        )));
    }

    let late_minutes = check_if_late(pool, employee_id, now);
    let log_id = next_log_id();

    let entry = TimeLogEntry {
        log_id: log_id.clone(),
        employee_id: employee_id.to_string(),
        date: now,
        clock_in: Some(now),
        clock_out: None,
        break1_start: None,
        break1_end: None,
        break2_start: None,
        break2_end: None,
        lunch_start: None,
        lunch_end: None,
        total_hours: None,
        reg_break_hours: None,
        lunch_hours: None,
        net_hours: None,
        status: LogStatus::Incomplete,
        late_minutes: Some(late_minutes),
        early_minutes: None,
        break1_missed: None,
        break2_missed: None,
        lunch_missed: None,
        total_missed: Some(late_minutes),
        notes: if late_minutes > 0.0 {
            "Late clock-in".to_string()
        } else {
            String::new()
        },
        created_at: Local::now().to_rfc3339(),
    };

    insert_time_log(&pool.conn, &entry)?;
    ttlog(&pool.conn, "clock_in", employee_id, &log_id)?;

    // The running pay-period total is only worth fetching when the new row
    // contributed to it.
    let pay_period_missed = if late_minutes > 0.0 {
        pay_period_missed_minutes(pool, employee_id, now.date()).total
    } else {
        0.0
    };

    Ok(ClockInOutcome {
        success: true,
        message: "Clock-in successful".to_string(),
        log_id: Some(log_id),
        late_minutes,
        pay_period_missed_minutes: pay_period_missed,
    })
}

pub fn clock_out(pool: &mut DbPool, employee_id: &str, now: NaiveDateTime) -> ClockOutOutcome {
    match clock_out_inner(pool, employee_id, now) {
        Ok(outcome) => outcome,
        Err(e) => ClockOutOutcome::failure(format!("Error: {}", e)),
    }
}

fn clock_out_inner(
    pool: &mut DbPool,
    employee_id: &str,
    now: NaiveDateTime,
) -> AppResult<ClockOutOutcome> {
    let log = match find_active_log(pool, employee_id)? {
        Some(log) => log,
        None => return Ok(ClockOutOutcome::failure("No active clock-in found")),
    };

    let different_day = log.shift_date() != now.date();

    // Early departure is only meaningful when the clock-out lands on the
    // same day the shift started; across midnight the boundary is ambiguous.
    let early_minutes = if different_day {
        0.0
    } else {
        check_if_early_departure(pool, employee_id, now)
    };

    let totals = hour_totals(&log, now);
    record_clock_out(&pool.conn, &log.log_id, now, &totals)?;

    if early_minutes > 0.0 {
        set_early_minutes(&pool.conn, &log.log_id, early_minutes)?;
        append_note(&pool.conn, &log.log_id, "Early departure")?;
    }

    if different_day {
        append_note(
            &pool.conn,
            &log.log_id,
            &format!("Clocked out on {} (different day)", format_date(now.date())),
        )?;
    }

    recompute_total_missed(pool, &log.log_id)?;
    ttlog(&pool.conn, "clock_out", employee_id, &log.log_id)?;

    let pay_period_missed = if early_minutes > 0.0 {
        pay_period_missed_minutes(pool, employee_id, now.date()).total
    } else {
        0.0
    };

    Ok(ClockOutOutcome {
        success: true,
        message: "Clock-out successful".to_string(),
        early_minutes,
        different_day,
        pay_period_missed_minutes: pay_period_missed,
    })
}

/// Derived hour columns for a completed log. Break pairs count only when
/// both ends are present; net hours never go negative.
fn hour_totals(log: &TimeLogEntry, clock_out: NaiveDateTime) -> HourTotals {
    let span_hours = |start: Option<NaiveDateTime>, end: Option<NaiveDateTime>| -> f64 {
        match (start, end) {
            (Some(s), Some(e)) if e > s => (e - s).num_seconds() as f64 / 3600.0,
            _ => 0.0,
        }
    };

    let total_hours = match log.clock_in {
        Some(cin) if clock_out > cin => (clock_out - cin).num_seconds() as f64 / 3600.0,
        _ => 0.0,
    };

    let reg_break_hours = span_hours(log.break1_start, log.break1_end)
        + span_hours(log.break2_start, log.break2_end);
    let lunch_hours = span_hours(log.lunch_start, log.lunch_end);
    let net_hours = (total_hours - reg_break_hours - lunch_hours).max(0.0);

    HourTotals {
        total_hours,
        reg_break_hours,
        lunch_hours,
        net_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn entry_with_breaks() -> TimeLogEntry {
        TimeLogEntry {
            log_id: "TL1".into(),
            employee_id: "E1".into(),
            date: ts(9, 0),
            clock_in: Some(ts(9, 0)),
            clock_out: None,
            break1_start: Some(ts(10, 30)),
            break1_end: Some(ts(10, 45)),
            break2_start: None,
            break2_end: None,
            lunch_start: Some(ts(12, 0)),
            lunch_end: Some(ts(12, 30)),
            total_hours: None,
            reg_break_hours: None,
            lunch_hours: None,
            net_hours: None,
            status: LogStatus::Incomplete,
            late_minutes: None,
            early_minutes: None,
            break1_missed: None,
            break2_missed: None,
            lunch_missed: None,
            total_missed: None,
            notes: String::new(),
            created_at: String::new(),
        }
    }

    #[test]
    fn hour_totals_subtract_completed_breaks() {
        let totals = hour_totals(&entry_with_breaks(), ts(17, 0));
        assert!((totals.total_hours - 8.0).abs() < 1e-9);
        assert!((totals.reg_break_hours - 0.25).abs() < 1e-9);
        assert!((totals.lunch_hours - 0.5).abs() < 1e-9);
        assert!((totals.net_hours - 7.25).abs() < 1e-9);
    }

    #[test]
    fn hour_totals_ignore_open_break_pairs() {
        let mut entry = entry_with_breaks();
        entry.break2_start = Some(ts(15, 0)); // started, never ended
        let totals = hour_totals(&entry, ts(17, 0));
        assert!((totals.reg_break_hours - 0.25).abs() < 1e-9);
    }

    #[test]
    fn log_ids_carry_the_terminal_prefix() {
        let id = next_log_id();
        assert!(id.starts_with("TL"));
        assert_eq!(id.len(), 10);
    }
}
