//! Live board: current state of every active employee, for the TV display.

use crate::core::break_cache::BreakTimerCache;
use crate::core::status::employee_status;
use crate::db::pool::DbPool;
use crate::db::queries::load_employees;
use crate::errors::AppResult;
use crate::models::status::EmployeeStatus;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStatus {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    #[serde(flatten)]
    pub status: EmployeeStatus,
}

/// One status row per active employee, break timers reconciled along the
/// way. Employees with no logs at all show up as Not Clocked In.
pub fn live_board(pool: &mut DbPool, timers: &mut BreakTimerCache) -> AppResult<Vec<LiveStatus>> {
    let employees = load_employees(pool, true)?;
    let mut rows = Vec::new();

    for employee in &employees {
        let status = employee_status(pool, timers, &employee.employee_id);
        rows.push(LiveStatus {
            employee_id: employee.employee_id.clone(),
            name: employee.full_name(),
            department: employee.department.clone(),
            status,
        });
    }

    Ok(rows)
}
