//! Row mapping and query helpers for every store table.
//!
//! All tolerant parsing happens here, at the read boundary: business logic
//! receives named-field structs and never touches raw cells. Rows that fail
//! to map are skipped rather than propagated, so aggregation degrades to
//! partial results instead of crashing on one malformed row.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::break_type::BreakType;
use crate::models::employee::Employee;
use crate::models::pay_period::PayPeriod;
use crate::models::shift::ShiftDefinition;
use crate::models::time_log::{LogStatus, TimeLogEntry};
use crate::utils::date::parse_date;
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, Result, Row, params};

// ---------------------------------------------------------------
// Time logs
// ---------------------------------------------------------------

fn opt_ts(row: &Row, col: &str) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(col)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub fn map_time_log_row(row: &Row) -> Result<TimeLogEntry> {
    let clock_in = opt_ts(row, "clock_in")?;
    let clock_out = opt_ts(row, "clock_out")?;

    // The date column normally holds the clock-in day as a full datetime;
    // fall back to the clock-in itself when the cell is mangled.
    let date = opt_ts(row, "log_date")?.or(clock_in).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate("time log without a date".into())),
        )
    })?;

    let status_raw: String = row.get("status")?;
    let status = LogStatus::from_db_str(&status_raw).unwrap_or(if clock_out.is_some() {
        LogStatus::Complete
    } else {
        LogStatus::Incomplete
    });

    Ok(TimeLogEntry {
        log_id: row.get("log_id")?,
        employee_id: row.get("employee_id")?,
        date,
        clock_in,
        clock_out,
        break1_start: opt_ts(row, "break1_start")?,
        break1_end: opt_ts(row, "break1_end")?,
        break2_start: opt_ts(row, "break2_start")?,
        break2_end: opt_ts(row, "break2_end")?,
        lunch_start: opt_ts(row, "lunch_start")?,
        lunch_end: opt_ts(row, "lunch_end")?,
        total_hours: row.get("total_hours")?,
        reg_break_hours: row.get("reg_break_hours")?,
        lunch_hours: row.get("lunch_hours")?,
        net_hours: row.get("net_hours")?,
        status,
        late_minutes: row.get("late_minutes")?,
        early_minutes: row.get("early_minutes")?,
        break1_missed: row.get("break1_missed")?,
        break2_missed: row.get("break2_missed")?,
        lunch_missed: row.get("lunch_missed")?,
        total_missed: row.get("total_missed")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

/// Load every time log, oldest first, optionally for one employee.
pub fn load_time_logs(pool: &mut DbPool, employee_id: Option<&str>) -> AppResult<Vec<TimeLogEntry>> {
    let mut out = Vec::new();

    match employee_id {
        Some(id) => {
            let mut stmt = pool
                .conn
                .prepare("SELECT * FROM time_logs WHERE employee_id = ?1 ORDER BY rowid ASC")?;
            let rows = stmt.query_map([id], map_time_log_row)?;
            for r in rows {
                if let Ok(entry) = r {
                    out.push(entry);
                }
            }
        }
        None => {
            let mut stmt = pool
                .conn
                .prepare("SELECT * FROM time_logs ORDER BY rowid ASC")?;
            let rows = stmt.query_map([], map_time_log_row)?;
            for r in rows {
                if let Ok(entry) = r {
                    out.push(entry);
                }
            }
        }
    }

    Ok(out)
}

pub fn find_log_by_id(pool: &mut DbPool, log_id: &str) -> AppResult<Option<TimeLogEntry>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT * FROM time_logs WHERE log_id = ?1")?;
    let mut rows = stmt.query_map([log_id], map_time_log_row)?;

    match rows.next() {
        Some(Ok(entry)) => Ok(Some(entry)),
        _ => Ok(None),
    }
}

/// The employee's open log: the most recent row (by clock-in) that is
/// flagged Incomplete or is missing a clock-out. This is the single shared
/// "most recent wins" scan used by the resolver, clock-out and the break
/// handlers.
pub fn find_active_log(pool: &mut DbPool, employee_id: &str) -> AppResult<Option<TimeLogEntry>> {
    let logs = load_time_logs(pool, Some(employee_id))?;

    Ok(logs
        .into_iter()
        .filter(|l| l.is_open() && l.clock_in.is_some())
        .max_by_key(|l| l.clock_in))
}

/// The most recent row for the employee regardless of state (fallback when
/// no open log exists).
pub fn find_latest_log(pool: &mut DbPool, employee_id: &str) -> AppResult<Option<TimeLogEntry>> {
    let mut logs = load_time_logs(pool, Some(employee_id))?;
    Ok(logs.pop())
}

pub fn insert_time_log(conn: &Connection, entry: &TimeLogEntry) -> AppResult<()> {
    let ts = |v: &Option<NaiveDateTime>| v.map(format_timestamp);

    conn.execute(
        "INSERT INTO time_logs (
            log_id, employee_id, log_date, clock_in, clock_out,
            break1_start, break1_end, break2_start, break2_end,
            lunch_start, lunch_end,
            total_hours, reg_break_hours, lunch_hours, net_hours,
            status, late_minutes, early_minutes,
            break1_missed, break2_missed, lunch_missed, total_missed,
            notes, created_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                   ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24)",
        params![
            entry.log_id,
            entry.employee_id,
            format_timestamp(entry.date),
            ts(&entry.clock_in),
            ts(&entry.clock_out),
            ts(&entry.break1_start),
            ts(&entry.break1_end),
            ts(&entry.break2_start),
            ts(&entry.break2_end),
            ts(&entry.lunch_start),
            ts(&entry.lunch_end),
            entry.total_hours,
            entry.reg_break_hours,
            entry.lunch_hours,
            entry.net_hours,
            entry.status.to_db_str(),
            entry.late_minutes,
            entry.early_minutes,
            entry.break1_missed,
            entry.break2_missed,
            entry.lunch_missed,
            entry.total_missed,
            entry.notes,
            entry.created_at,
        ],
    )?;
    Ok(())
}

/// Column triple (start, end, missed) for a break slot.
fn break_columns(break_type: BreakType, slot: u8) -> (&'static str, &'static str, &'static str) {
    match (break_type, slot) {
        (BreakType::Regular, 1) => ("break1_start", "break1_end", "break1_missed"),
        (BreakType::Regular, _) => ("break2_start", "break2_end", "break2_missed"),
        (BreakType::Lunch, _) => ("lunch_start", "lunch_end", "lunch_missed"),
    }
}

pub fn set_break_start(
    conn: &Connection,
    log_id: &str,
    break_type: BreakType,
    slot: u8,
    at: NaiveDateTime,
) -> AppResult<()> {
    let (start_col, _, _) = break_columns(break_type, slot);
    conn.execute(
        &format!("UPDATE time_logs SET {} = ?1 WHERE log_id = ?2", start_col),
        params![format_timestamp(at), log_id],
    )?;
    Ok(())
}

pub fn set_break_end(
    conn: &Connection,
    log_id: &str,
    break_type: BreakType,
    slot: u8,
    at: NaiveDateTime,
    missed_minutes: Option<f64>,
) -> AppResult<()> {
    let (_, end_col, missed_col) = break_columns(break_type, slot);
    conn.execute(
        &format!("UPDATE time_logs SET {} = ?1 WHERE log_id = ?2", end_col),
        params![format_timestamp(at), log_id],
    )?;
    if let Some(missed) = missed_minutes {
        conn.execute(
            &format!("UPDATE time_logs SET {} = ?1 WHERE log_id = ?2", missed_col),
            params![missed, log_id],
        )?;
    }
    Ok(())
}

/// Derived hour totals written when a log is completed.
pub struct HourTotals {
    pub total_hours: f64,
    pub reg_break_hours: f64,
    pub lunch_hours: f64,
    pub net_hours: f64,
}

pub fn record_clock_out(
    conn: &Connection,
    log_id: &str,
    at: NaiveDateTime,
    totals: &HourTotals,
) -> AppResult<()> {
    conn.execute(
        "UPDATE time_logs
         SET clock_out = ?1, status = 'Complete',
             total_hours = ?2, reg_break_hours = ?3, lunch_hours = ?4, net_hours = ?5
         WHERE log_id = ?6",
        params![
            format_timestamp(at),
            totals.total_hours,
            totals.reg_break_hours,
            totals.lunch_hours,
            totals.net_hours,
            log_id,
        ],
    )?;
    Ok(())
}

pub fn set_early_minutes(conn: &Connection, log_id: &str, minutes: f64) -> AppResult<()> {
    conn.execute(
        "UPDATE time_logs SET early_minutes = ?1 WHERE log_id = ?2",
        params![minutes, log_id],
    )?;
    Ok(())
}

/// Append to the log's notes column (comma-joined, append-only).
pub fn append_note(conn: &Connection, log_id: &str, note: &str) -> AppResult<()> {
    let current: String = conn.query_row(
        "SELECT notes FROM time_logs WHERE log_id = ?1",
        [log_id],
        |row| row.get(0),
    )?;

    let new_notes = if current.is_empty() {
        note.to_string()
    } else {
        format!("{}, {}", current, note)
    };

    conn.execute(
        "UPDATE time_logs SET notes = ?1 WHERE log_id = ?2",
        params![new_notes, log_id],
    )?;
    Ok(())
}

/// Re-derive total_missed from the five contributor columns and store it.
/// Returns the new total.
pub fn recompute_total_missed(pool: &mut DbPool, log_id: &str) -> AppResult<f64> {
    let entry = find_log_by_id(pool, log_id)?
        .ok_or_else(|| AppError::UnknownTimeLog(log_id.to_string()))?;

    let total = entry.total_missed_minutes();
    pool.conn.execute(
        "UPDATE time_logs SET total_missed = ?1 WHERE log_id = ?2",
        params![total, log_id],
    )?;
    Ok(total)
}

// ---------------------------------------------------------------
// Employees
// ---------------------------------------------------------------

fn map_employee_row(row: &Row) -> Result<Employee> {
    Ok(Employee {
        employee_id: row.get("employee_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        department: row.get("department")?,
        status: row.get("status")?,
        shift_id: row.get("shift_id")?,
    })
}

pub fn insert_employee(conn: &Connection, emp: &Employee) -> AppResult<()> {
    conn.execute(
        "INSERT INTO employees (employee_id, first_name, last_name, department, status, shift_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            emp.employee_id,
            emp.first_name,
            emp.last_name,
            emp.department,
            emp.status,
            emp.shift_id,
        ],
    )?;
    Ok(())
}

/// Employees sorted by first name, optionally restricted to Active ones.
pub fn load_employees(pool: &mut DbPool, active_only: bool) -> AppResult<Vec<Employee>> {
    let sql = if active_only {
        "SELECT * FROM employees WHERE status = 'Active' ORDER BY first_name ASC"
    } else {
        "SELECT * FROM employees ORDER BY first_name ASC"
    };

    let mut stmt = pool.conn.prepare(sql)?;
    let rows = stmt.query_map([], map_employee_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_employee(pool: &mut DbPool, employee_id: &str) -> AppResult<Option<Employee>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT * FROM employees WHERE employee_id = ?1")?;
    let mut rows = stmt.query_map([employee_id], map_employee_row)?;

    match rows.next() {
        Some(Ok(emp)) => Ok(Some(emp)),
        _ => Ok(None),
    }
}

// ---------------------------------------------------------------
// Shifts
// ---------------------------------------------------------------

fn map_shift_row(row: &Row) -> Result<ShiftDefinition> {
    let overnight: Option<i64> = row.get("is_overnight")?;
    Ok(ShiftDefinition {
        shift_id: row.get("shift_id")?,
        name: row.get("name")?,
        is_overnight: overnight.map(|v| v != 0),
        week_a_start: row.get("week_a_start")?,
        week_a_end: row.get("week_a_end")?,
        week_b_start: row.get("week_b_start")?,
        week_b_end: row.get("week_b_end")?,
    })
}

pub fn insert_shift(conn: &Connection, shift: &ShiftDefinition) -> AppResult<()> {
    conn.execute(
        "INSERT INTO shifts (shift_id, name, is_overnight, week_a_start, week_a_end, week_b_start, week_b_end)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            shift.shift_id,
            shift.name,
            shift.is_overnight.map(|v| if v { 1 } else { 0 }),
            shift.week_a_start,
            shift.week_a_end,
            shift.week_b_start,
            shift.week_b_end,
        ],
    )?;
    Ok(())
}

pub fn load_shifts(pool: &mut DbPool) -> AppResult<Vec<ShiftDefinition>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT * FROM shifts ORDER BY shift_id ASC")?;
    let rows = stmt.query_map([], map_shift_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_shift(pool: &mut DbPool, shift_id: &str) -> AppResult<Option<ShiftDefinition>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT * FROM shifts WHERE shift_id = ?1")?;
    let mut rows = stmt.query_map([shift_id], map_shift_row)?;

    match rows.next() {
        Some(Ok(shift)) => Ok(Some(shift)),
        _ => Ok(None),
    }
}

/// The shift assigned to an employee, if any.
pub fn employee_shift(pool: &mut DbPool, employee_id: &str) -> AppResult<Option<ShiftDefinition>> {
    let shift_id = match find_employee(pool, employee_id)? {
        Some(emp) => match emp.shift_id {
            Some(id) if !id.is_empty() => id,
            _ => return Ok(None), // no shift assigned
        },
        None => return Ok(None),
    };

    find_shift(pool, &shift_id)
}

// ---------------------------------------------------------------
// Pay periods
// ---------------------------------------------------------------

fn map_pay_period_row(row: &Row) -> Result<Option<PayPeriod>> {
    let start_raw: String = row.get("start_date")?;
    let end_raw: String = row.get("end_date")?;

    // Period bounds may be bare dates or full datetimes; skip the row when
    // neither parses.
    let parse_bound = |s: &str| -> Option<NaiveDate> {
        parse_date(s).or_else(|| parse_timestamp(s).map(|dt| dt.date()))
    };

    let (start_date, end_date) = match (parse_bound(&start_raw), parse_bound(&end_raw)) {
        (Some(s), Some(e)) => (s, e),
        _ => return Ok(None),
    };

    Ok(Some(PayPeriod {
        period_id: row.get("period_id")?,
        name: row.get("name")?,
        start_date,
        end_date,
        status: row.get("status")?,
    }))
}

pub fn insert_pay_period(conn: &Connection, period: &PayPeriod) -> AppResult<()> {
    conn.execute(
        "INSERT INTO pay_periods (period_id, name, start_date, end_date, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            period.period_id,
            period.name,
            period.start_date.format("%Y-%m-%d").to_string(),
            period.end_date.format("%Y-%m-%d").to_string(),
            period.status,
        ],
    )?;
    Ok(())
}

pub fn load_pay_periods(pool: &mut DbPool) -> AppResult<Vec<PayPeriod>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT * FROM pay_periods ORDER BY start_date ASC")?;
    let rows = stmt.query_map([], map_pay_period_row)?;

    let mut out = Vec::new();
    for r in rows {
        if let Ok(Some(period)) = r {
            out.push(period);
        }
    }
    Ok(out)
}

pub fn find_pay_period(pool: &mut DbPool, period_id: &str) -> AppResult<Option<PayPeriod>> {
    Ok(load_pay_periods(pool)?
        .into_iter()
        .find(|p| p.period_id == period_id))
}

/// The single Active pay period containing `today`, scanning in row order.
pub fn active_pay_period(pool: &mut DbPool, today: NaiveDate) -> AppResult<Option<PayPeriod>> {
    Ok(load_pay_periods(pool)?
        .into_iter()
        .find(|p| p.is_active() && p.contains(today)))
}
