use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        info: show_info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            run_pending_migrations(&pool.conn)?;
            success("Migrations up to date");
        }

        if *check {
            let result: String =
                pool.conn
                    .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
            if result == "ok" {
                success("Database integrity OK");
            } else {
                return Err(AppError::Migration(format!(
                    "integrity check failed: {}",
                    result
                )));
            }
        }

        if *show_info {
            let logs: i64 =
                pool.conn
                    .query_row("SELECT COUNT(*) FROM time_logs", [], |row| row.get(0))?;
            let employees: i64 =
                pool.conn
                    .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
            let periods: i64 =
                pool.conn
                    .query_row("SELECT COUNT(*) FROM pay_periods", [], |row| row.get(0))?;

            info(format!("Database: {}", cfg.database));
            println!("  time logs:   {}", logs);
            println!("  employees:   {}", employees);
            println!("  pay periods: {}", periods);
        }
    }

    Ok(())
}
