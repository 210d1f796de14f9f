use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::queries::load_time_logs;
use crate::errors::{AppError, AppResult};
use crate::models::time_log::TimeLogEntry;
use crate::utils::date::{format_date, parse_date};
use crate::utils::formatting::mins2readable;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_timestamp;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Logs {
        employee,
        date,
        missed_only,
        json,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;

        let date_filter = match date {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?),
            None => None,
        };

        let logs: Vec<TimeLogEntry> = load_time_logs(&mut pool, employee.as_deref())?
            .into_iter()
            .filter(|l| date_filter.is_none_or(|d| l.shift_date() == d))
            .filter(|l| !missed_only || l.total_missed.unwrap_or(0.0) > 0.0)
            .collect();

        if *json {
            println!(
                "{}",
                serde_json::to_string_pretty(&logs).map_err(|e| AppError::Other(e.to_string()))?
            );
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("Log ID", 12),
            Column::new("Employee", 10),
            Column::new("Date", 10),
            Column::new("Clock In", 19),
            Column::new("Clock Out", 19),
            Column::new("Status", 10),
            Column::new("Missed", 8),
        ]);

        for log in &logs {
            table.add_row(vec![
                log.log_id.clone(),
                log.employee_id.clone(),
                format_date(log.shift_date()),
                log.clock_in.map(format_timestamp).unwrap_or_default(),
                log.clock_out.map(format_timestamp).unwrap_or_default(),
                log.status.to_db_str().to_string(),
                mins2readable(log.total_missed.unwrap_or(0.0)),
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
