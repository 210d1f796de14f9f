use crate::cli::commands::open_pool;
use crate::cli::parser::ReportCmd;
use crate::config::Config;
use crate::core::eligibility::{AttendanceAnalysis, analyze_attendance, qualifying_shifts};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::formatting::{hours2readable, mins2readable};
use crate::utils::table::{Column, Table};
use std::path::Path;

pub fn handle(kind: &ReportCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match kind {
        ReportCmd::Qualifying { period, json } => {
            let report = qualifying_shifts(&mut pool, &cfg.policy, period)?;

            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report)
                        .map_err(|e| AppError::Other(e.to_string()))?
                );
                return Ok(());
            }

            header(format!("Qualifying shifts — pay period {}", period));

            let mut table = Table::new(vec![
                Column::new("ID", 8),
                Column::new("Name", 24),
                Column::new("Hours", 8),
                Column::new("Qualifying", 10),
                Column::new("Type", 10),
            ]);

            for row in &report {
                table.add_row(vec![
                    row.employee_id.clone(),
                    row.name.clone(),
                    hours2readable(row.total_hours),
                    row.qualifying_shifts.to_string(),
                    row.shift_type.clone(),
                ]);
            }

            print!("{}", table.render());
        }

        ReportCmd::Attendance { period, json, csv } => {
            let report = analyze_attendance(&mut pool, &cfg.policy, period)?;

            if let Some(path) = csv {
                write_attendance_csv(&report, Path::new(path))?;
            }

            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report)
                        .map_err(|e| AppError::Other(e.to_string()))?
                );
                return Ok(());
            }

            header(format!("Attendance analysis — pay period {}", period));

            let mut table = Table::new(vec![
                Column::new("ID", 8),
                Column::new("Name", 24),
                Column::new("Hours", 8),
                Column::new("Shifts", 6),
                Column::new("Missed", 8),
                Column::new("Late", 7),
                Column::new("Early", 7),
                Column::new("Breaks", 7),
                Column::new("Eligible", 8),
            ]);

            for row in &report {
                table.add_row(vec![
                    row.employee_id.clone(),
                    row.name.clone(),
                    hours2readable(row.total_hours),
                    row.shifts_worked.to_string(),
                    mins2readable(row.total_missed_minutes),
                    mins2readable(row.late_minutes),
                    mins2readable(row.early_minutes),
                    mins2readable(row.break_missed_minutes),
                    if row.is_eligible { "yes" } else { "no" }.to_string(),
                ]);
            }

            print!("{}", table.render());
        }
    }

    Ok(())
}

/// Write the attendance analysis as CSV, one row per employee.
fn write_attendance_csv(report: &[AttendanceAnalysis], path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| AppError::Export(e.to_string()))?;

    wtr.write_record([
        "employee_id",
        "name",
        "total_hours",
        "shifts_worked",
        "total_missed_minutes",
        "late_minutes",
        "early_minutes",
        "break_missed_minutes",
        "paid_break_hours",
        "is_eligible",
    ])
    .map_err(|e| AppError::Export(e.to_string()))?;

    for row in report {
        wtr.write_record(&[
            row.employee_id.clone(),
            row.name.clone(),
            format!("{:.2}", row.total_hours),
            row.shifts_worked.to_string(),
            format!("{:.2}", row.total_missed_minutes),
            format!("{:.2}", row.late_minutes),
            format!("{:.2}", row.early_minutes),
            format!("{:.2}", row.break_missed_minutes),
            format!("{:.2}", row.paid_break_hours),
            row.is_eligible.to_string(),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}
