//! shiftclock library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Employee { action } => cli::commands::employee::handle(action, cfg),
        Commands::Shift { action } => cli::commands::shift::handle(action, cfg),
        Commands::Period { action } => cli::commands::period::handle(action, cfg),
        Commands::ClockIn { .. } | Commands::ClockOut { .. } => {
            cli::commands::clock::handle(cli, cfg)
        }
        Commands::BreakStart { .. } | Commands::BreakEnd { .. } => {
            cli::commands::breaks::handle(cli, cfg)
        }
        Commands::Status { .. } | Commands::BreakCheck { .. } => {
            cli::commands::status::handle(cli, cfg)
        }
        Commands::Live { .. } => cli::commands::live::handle(&cli.command, cfg),
        Commands::Logs { .. } => cli::commands::logs::handle(&cli.command, cfg),
        Commands::Report { kind } => cli::commands::report::handle(kind, cfg),
        Commands::GrantHours { .. } => cli::commands::grant::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load();

    // 3️⃣ apply DB override from the command line, if any
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
