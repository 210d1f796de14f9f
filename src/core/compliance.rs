//! Shift compliance: lateness and early-departure minutes against the
//! employee's shift schedule.
//!
//! Both checks favor availability over strictness: a missing employee,
//! missing shift assignment, or unparseable schedule time yields 0 minutes
//! rather than an error.

use crate::db::pool::DbPool;
use crate::db::queries::employee_shift;
use chrono::NaiveDateTime;

/// Minutes late against the shift start, rounded, clamped to >= 0.
/// Early arrivals are not penalized and do not bank credit.
pub fn check_if_late(pool: &mut DbPool, employee_id: &str, clock_in: NaiveDateTime) -> f64 {
    let shift = match employee_shift(pool, employee_id) {
        Ok(Some(shift)) => shift,
        _ => return 0.0, // no shift assigned, so not late
    };

    let start = match shift.start_time() {
        Some(t) => t,
        None => return 0.0,
    };

    // Shift start on the same day as the clock-in
    let shift_start = clock_in.date().and_time(start);
    let minutes = (clock_in - shift_start).num_seconds() as f64 / 60.0;

    minutes.round().max(0.0)
}

/// Minutes left early against the shift end, rounded, clamped to >= 0.
pub fn check_if_early_departure(
    pool: &mut DbPool,
    employee_id: &str,
    clock_out: NaiveDateTime,
) -> f64 {
    let shift = match employee_shift(pool, employee_id) {
        Ok(Some(shift)) => shift,
        _ => return 0.0,
    };

    let end = match shift.end_time() {
        Some(t) => t,
        None => return 0.0,
    };

    let shift_end = clock_out.date().and_time(end);
    let minutes = (shift_end - clock_out).num_seconds() as f64 / 60.0;

    minutes.round().max(0.0)
}
