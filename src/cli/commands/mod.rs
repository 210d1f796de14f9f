pub mod breaks;
pub mod clock;
pub mod config;
pub mod db;
pub mod employee;
pub mod grant;
pub mod init;
pub mod live;
pub mod log;
pub mod logs;
pub mod period;
pub mod report;
pub mod shift;
pub mod status;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_timestamp;
use chrono::{Local, NaiveDateTime};

/// Open the configured database and make sure the schema is current.
pub fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// The logical "now": the hidden --at override when present, otherwise the
/// local wall clock.
pub fn resolve_now(cli: &Cli) -> AppResult<NaiveDateTime> {
    match &cli.at {
        Some(raw) => {
            parse_timestamp(raw).ok_or_else(|| AppError::InvalidTimestamp(raw.to_string()))
        }
        None => Ok(Local::now().naive_local()),
    }
}
