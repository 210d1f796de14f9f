use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::break_cache::BreakTimerCache;
use crate::core::live::live_board;
use crate::errors::{AppError, AppResult};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Live { json } = cmd {
        let mut pool = open_pool(cfg)?;
        let mut timers = BreakTimerCache::new();

        let board = live_board(&mut pool, &mut timers)?;

        if *json {
            println!(
                "{}",
                serde_json::to_string_pretty(&board).map_err(|e| AppError::Other(e.to_string()))?
            );
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 8),
            Column::new("Name", 24),
            Column::new("Department", 14),
            Column::new("Status", 18),
            Column::new("Since", 20),
        ]);

        for row in &board {
            table.add_row(vec![
                row.employee_id.clone(),
                row.name.clone(),
                row.department.clone(),
                row.status.status.clone(),
                row.status.time.clone(),
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
