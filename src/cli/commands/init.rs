use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_str = db_path.to_string_lossy().to_string();

    let pool = DbPool::new(&db_str)?;
    init_db(&pool.conn)?;
    ttlog(&pool.conn, "init", &db_str, "database initialized")?;

    success(format!("Initialized database at {}", db_str));
    Ok(())
}
