//! Qualifying-shift bucketing and bonus-hour / profit-sharing eligibility.
//!
//! A "qualifying shift" is a calendar shift-date (with overnight
//! attribution) whose summed net hours reach the policy threshold. The
//! eligibility rule and the 80-hour top-up target live in
//! `EligibilityPolicy` so the thresholds are named, not inline literals.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    employee_shift, find_pay_period, insert_time_log, load_employees, load_time_logs,
};
use crate::errors::{AppError, AppResult};
use crate::models::time_log::{AUTO_LOG_PREFIX, LogStatus, TimeLogEntry};
use crate::utils::date::format_date;
use crate::utils::time::format_time;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ---------------------------------------------------------------
// Policy
// ---------------------------------------------------------------

fn default_qualifying_shift_hours() -> f64 {
    7.0
}
fn default_min_total_hours() -> f64 {
    66.5
}
fn default_min_qualifying_shifts() -> u32 {
    7
}
fn default_max_missed_minutes() -> f64 {
    20.0
}
fn default_top_up_target_hours() -> f64 {
    80.0
}
fn default_paid_break_hours_per_shift() -> f64 {
    0.5
}

/// Named thresholds of the bonus-hour / profit-sharing program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    #[serde(default = "default_qualifying_shift_hours")]
    pub qualifying_shift_hours: f64,
    #[serde(default = "default_min_total_hours")]
    pub min_total_hours: f64,
    #[serde(default = "default_min_qualifying_shifts")]
    pub min_qualifying_shifts: u32,
    #[serde(default = "default_max_missed_minutes")]
    pub max_missed_minutes: f64,
    #[serde(default = "default_top_up_target_hours")]
    pub top_up_target_hours: f64,
    #[serde(default = "default_paid_break_hours_per_shift")]
    pub paid_break_hours_per_shift: f64,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            qualifying_shift_hours: default_qualifying_shift_hours(),
            min_total_hours: default_min_total_hours(),
            min_qualifying_shifts: default_min_qualifying_shifts(),
            max_missed_minutes: default_max_missed_minutes(),
            top_up_target_hours: default_top_up_target_hours(),
            paid_break_hours_per_shift: default_paid_break_hours_per_shift(),
        }
    }
}

impl EligibilityPolicy {
    pub fn is_eligible(&self, total_hours: f64, shifts_worked: u32, total_missed: f64) -> bool {
        total_hours >= self.min_total_hours
            && shifts_worked >= self.min_qualifying_shifts
            && total_missed <= self.max_missed_minutes
    }
}

// ---------------------------------------------------------------
// Report shapes
// ---------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub log_id: String,
    pub date: String,
    pub clock_in: Option<String>,
    pub clock_out: Option<String>,
    pub hours: f64,
    pub reg_break1_missed: f64,
    pub reg_break2_missed: f64,
    pub lunch_break_missed: f64,
    pub late_arrival: f64,
    pub early_departure: f64,
    pub missed_minutes: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDetail {
    pub shift_date: String,
    pub hours: f64,
    pub counted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifyingShiftReport {
    pub employee_id: String,
    pub name: String,
    pub total_hours: f64,
    pub qualifying_shifts: u32,
    pub daily_logs: Vec<DailyLog>,
    pub shift_details: Vec<ShiftDetail>,
    pub shift_type: String, // "Overnight" | "Regular"
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceAnalysis {
    pub employee_id: String,
    pub name: String,
    pub shift: String,
    pub total_hours: f64,
    pub shifts_worked: u32,
    pub total_missed_minutes: f64,
    pub late_minutes: f64,
    pub early_minutes: f64,
    pub break_missed_minutes: f64,
    pub paid_break_hours: f64,
    pub has_auto_logs: bool,
    pub is_eligible: bool,
    pub daily_logs: Vec<DailyLog>,
}

// ---------------------------------------------------------------
// Shift-date attribution
// ---------------------------------------------------------------

/// Calendar shift-date a log belongs to. On overnight shifts a clock-in at
/// or before 05:00:00 is attributed to the previous day's shift.
pub fn shift_date_for(clock_in: NaiveDateTime, overnight: bool) -> NaiveDate {
    if !overnight {
        return clock_in.date();
    }

    let t = clock_in.time();
    let belongs_to_previous = t.hour() < 5 || (t.hour() == 5 && t.minute() == 0 && t.second() == 0);

    if belongs_to_previous {
        clock_in
            .date()
            .pred_opt()
            .unwrap_or_else(|| clock_in.date())
    } else {
        clock_in.date()
    }
}

// ---------------------------------------------------------------
// Qualifying shifts
// ---------------------------------------------------------------

/// Bucket each active employee's Complete logs into calendar shifts and
/// count the dates whose net hours reach the qualifying threshold.
pub fn qualifying_shifts(
    pool: &mut DbPool,
    policy: &EligibilityPolicy,
    period_id: &str,
) -> AppResult<Vec<QualifyingShiftReport>> {
    let period = find_pay_period(pool, period_id)?
        .ok_or_else(|| AppError::UnknownPayPeriod(period_id.to_string()))?;

    let employees = load_employees(pool, true)?;
    let mut results = Vec::new();

    for employee in &employees {
        let overnight = employee_shift(pool, &employee.employee_id)?
            .map(|s| s.overnight())
            .unwrap_or(false); // no shift assigned → treat as a day shift

        let mut logs: Vec<TimeLogEntry> = load_time_logs(pool, Some(&employee.employee_id))?
            .into_iter()
            .filter(|l| l.status == LogStatus::Complete && period.contains(l.shift_date()))
            .collect();

        if logs.is_empty() {
            results.push(QualifyingShiftReport {
                employee_id: employee.employee_id.clone(),
                name: employee.full_name(),
                total_hours: 0.0,
                qualifying_shifts: 0,
                daily_logs: Vec::new(),
                shift_details: Vec::new(),
                shift_type: shift_type_label(overnight),
            });
            continue;
        }

        logs.sort_by_key(|l| l.clock_in);

        let mut total_hours = 0.0;
        let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        let mut daily_logs = Vec::new();

        for log in &logs {
            let (clock_in, clock_out) = match (log.clock_in, log.clock_out) {
                (Some(cin), Some(cout)) => (cin, cout),
                _ => continue,
            };

            let net = log.net_hours.unwrap_or(0.0);
            let shift_date = shift_date_for(clock_in, overnight);

            *buckets.entry(shift_date).or_insert(0.0) += net;
            total_hours += net;

            daily_logs.push(daily_log_entry(log, format_date(shift_date), clock_in, clock_out, net));
        }

        let shift_details: Vec<ShiftDetail> = buckets
            .iter()
            .map(|(date, hours)| ShiftDetail {
                shift_date: format_date(*date),
                hours: *hours,
                counted: *hours >= policy.qualifying_shift_hours,
            })
            .collect();

        let qualifying = shift_details.iter().filter(|d| d.counted).count() as u32;

        results.push(QualifyingShiftReport {
            employee_id: employee.employee_id.clone(),
            name: employee.full_name(),
            total_hours,
            qualifying_shifts: qualifying,
            daily_logs,
            shift_details,
            shift_type: shift_type_label(overnight),
        });
    }

    Ok(results)
}

fn shift_type_label(overnight: bool) -> String {
    if overnight { "Overnight" } else { "Regular" }.to_string()
}

fn daily_log_entry(
    log: &TimeLogEntry,
    date: String,
    clock_in: NaiveDateTime,
    clock_out: NaiveDateTime,
    net: f64,
) -> DailyLog {
    DailyLog {
        log_id: log.log_id.clone(),
        date,
        clock_in: Some(format_time(clock_in)),
        clock_out: Some(format_time(clock_out)),
        hours: net,
        reg_break1_missed: log.break1_missed.unwrap_or(0.0),
        reg_break2_missed: log.break2_missed.unwrap_or(0.0),
        lunch_break_missed: log.lunch_missed.unwrap_or(0.0),
        late_arrival: log.late_minutes.unwrap_or(0.0),
        early_departure: log.early_minutes.unwrap_or(0.0),
        missed_minutes: log.total_missed.unwrap_or(0.0),
        notes: log.notes.clone(),
    }
}

// ---------------------------------------------------------------
// Attendance analysis
// ---------------------------------------------------------------

/// Full attendance analysis for the pay period: per-employee hour and
/// missed-minute totals, the qualifying-shift count, and the eligibility
/// verdict. Employees without a shift assignment or without logs in the
/// period are skipped, like the dashboard always did.
pub fn analyze_attendance(
    pool: &mut DbPool,
    policy: &EligibilityPolicy,
    period_id: &str,
) -> AppResult<Vec<AttendanceAnalysis>> {
    let qualifying = qualifying_shifts(pool, policy, period_id)?;
    let qualifying_map: HashMap<String, u32> = qualifying
        .iter()
        .map(|q| (q.employee_id.clone(), q.qualifying_shifts))
        .collect();

    let period = find_pay_period(pool, period_id)?
        .ok_or_else(|| AppError::UnknownPayPeriod(period_id.to_string()))?;

    let employees: Vec<_> = load_employees(pool, true)?
        .into_iter()
        .filter(|e| e.shift_id.as_deref().is_some_and(|s| !s.is_empty()))
        .collect();

    let mut results = Vec::new();

    for employee in &employees {
        let mut logs: Vec<TimeLogEntry> = load_time_logs(pool, Some(&employee.employee_id))?
            .into_iter()
            .filter(|l| l.status == LogStatus::Complete && period.contains(l.shift_date()))
            .collect();

        if logs.is_empty() {
            continue;
        }

        logs.sort_by_key(|l| l.date);

        let mut total_hours = 0.0;
        let mut total_missed = 0.0;
        let mut late_minutes = 0.0;
        let mut early_minutes = 0.0;
        let mut break_missed = 0.0;
        let mut has_auto_logs = false;
        let mut daily_logs = Vec::new();

        for log in &logs {
            let net = log.net_hours.unwrap_or(0.0);
            let missed = log.total_missed.unwrap_or(0.0);
            let late = log.late_minutes.unwrap_or(0.0);
            let early = log.early_minutes.unwrap_or(0.0);

            total_hours += net;
            total_missed += missed;
            late_minutes += late;
            early_minutes += early;
            break_missed += (missed - late - early).max(0.0);

            if log.is_auto_granted() {
                has_auto_logs = true;
            }

            let date = format_date(log.shift_date());
            daily_logs.push(DailyLog {
                log_id: log.log_id.clone(),
                date,
                clock_in: log.clock_in.map(format_time),
                clock_out: log.clock_out.map(format_time),
                hours: net,
                reg_break1_missed: log.break1_missed.unwrap_or(0.0),
                reg_break2_missed: log.break2_missed.unwrap_or(0.0),
                lunch_break_missed: log.lunch_missed.unwrap_or(0.0),
                late_arrival: late,
                early_departure: early,
                missed_minutes: missed,
                notes: log.notes.clone(),
            });
        }

        let shifts_worked = *qualifying_map.get(&employee.employee_id).unwrap_or(&0);
        let is_eligible = policy.is_eligible(total_hours, shifts_worked, total_missed);

        // Paid break hours accrue per qualifying shift; synthetic top-up
        // rows void them for the whole period.
        let paid_break_hours = if has_auto_logs {
            0.0
        } else {
            shifts_worked as f64 * policy.paid_break_hours_per_shift
        };

        results.push(AttendanceAnalysis {
            employee_id: employee.employee_id.clone(),
            name: employee.full_name(),
            shift: employee.shift_id.clone().unwrap_or_default(),
            total_hours,
            shifts_worked,
            total_missed_minutes: total_missed,
            late_minutes,
            early_minutes,
            break_missed_minutes: break_missed,
            paid_break_hours,
            has_auto_logs,
            is_eligible,
            daily_logs,
        });
    }

    Ok(results)
}

// ---------------------------------------------------------------
// 80-hour top-up grant
// ---------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantResult {
    pub employee_id: String,
    pub name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub additional_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantOutcome {
    pub success: bool,
    pub message: String,
    pub results: Vec<GrantResult>,
}

pub const GRANT_NOTE: &str = "80 hours Payperiod Incentive remaining hours";

/// Top up every eligible employee to the policy target with one synthetic
/// Complete log each, dated the day before the period end and marked with
/// the AUTO- log-id prefix so downstream reports can flag or exclude it.
/// An explicit, auditable compensating transaction — never a silent edit.
pub fn grant_eligible_hours(
    pool: &mut DbPool,
    policy: &EligibilityPolicy,
    period_id: &str,
) -> GrantOutcome {
    match grant_inner(pool, policy, period_id) {
        Ok(outcome) => outcome,
        Err(e) => GrantOutcome {
            success: false,
            message: format!("Error: {}", e),
            results: Vec::new(),
        },
    }
}

fn grant_inner(
    pool: &mut DbPool,
    policy: &EligibilityPolicy,
    period_id: &str,
) -> AppResult<GrantOutcome> {
    let analysis = analyze_attendance(pool, policy, period_id)?;
    let eligible: Vec<_> = analysis.into_iter().filter(|a| a.is_eligible).collect();

    if eligible.is_empty() {
        return Ok(GrantOutcome {
            success: false,
            message: "No eligible employees found".to_string(),
            results: Vec::new(),
        });
    }

    let period = find_pay_period(pool, period_id)?
        .ok_or_else(|| AppError::UnknownPayPeriod(period_id.to_string()))?;

    let mut results = Vec::new();

    for employee in &eligible {
        let additional = policy.top_up_target_hours - employee.total_hours;

        if additional <= 0.0 {
            results.push(GrantResult {
                employee_id: employee.employee_id.clone(),
                name: employee.name.clone(),
                success: false,
                message: Some(format!(
                    "Employee already has {}+ hours",
                    policy.top_up_target_hours
                )),
                additional_hours: 0.0,
            });
            continue;
        }

        let log_id = format!(
            "{}{}-{}",
            AUTO_LOG_PREFIX,
            Local::now().timestamp_millis(),
            employee.employee_id
        );

        // Day before the period end, clocked in at 01:00 for exactly the
        // hours still missing.
        let log_date = period
            .end_date
            .pred_opt()
            .unwrap_or(period.end_date)
            .and_hms_opt(1, 0, 0)
            .unwrap();
        let clock_out = log_date + Duration::seconds((additional * 3600.0).round() as i64);

        let entry = TimeLogEntry {
            log_id: log_id.clone(),
            employee_id: employee.employee_id.clone(),
            date: log_date,
            clock_in: Some(log_date),
            clock_out: Some(clock_out),
            break1_start: None,
            break1_end: None,
            break2_start: None,
            break2_end: None,
            lunch_start: None,
            lunch_end: None,
            total_hours: Some(additional),
            reg_break_hours: Some(0.0),
            lunch_hours: Some(0.0),
            net_hours: Some(additional),
            status: LogStatus::Complete,
            late_minutes: None,
            early_minutes: None,
            break1_missed: None,
            break2_missed: None,
            lunch_missed: None,
            total_missed: None,
            notes: GRANT_NOTE.to_string(),
            created_at: Local::now().to_rfc3339(),
        };

        insert_time_log(&pool.conn, &entry)?;
        ttlog(&pool.conn, "grant_hours", &employee.employee_id, &log_id)?;

        results.push(GrantResult {
            employee_id: employee.employee_id.clone(),
            name: employee.name.clone(),
            success: true,
            message: None,
            additional_hours: additional,
        });
    }

    let granted = results.iter().filter(|r| r.success).count();
    Ok(GrantOutcome {
        success: true,
        message: format!("Granted additional hours to {} eligible employees", granted),
        results,
    })
}
