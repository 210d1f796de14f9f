use crate::cli::commands::{open_pool, resolve_now};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::break_cache::BreakTimerCache;
use crate::core::rules::enforce_break_rules;
use crate::core::status::employee_status;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let mut timers = BreakTimerCache::new();

    match &cli.command {
        Commands::Status { employee, json } => {
            let status = employee_status(&mut pool, &mut timers, employee);

            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&status)
                        .map_err(|e| AppError::Other(e.to_string()))?
                );
                return Ok(());
            }

            info(format!("{}: {}", employee, status.status));
            if !status.time.is_empty() {
                println!("  since:          {}", status.time);
            }
            println!("  regular breaks: {}/2", status.regular_breaks_taken);
            println!(
                "  lunch break:    {}",
                if status.lunch_break_taken { "taken" } else { "not taken" }
            );
            if let (Some(start), Some(limit)) =
                (&status.break_start_time, status.break_time_limit)
            {
                println!("  break started:  {} (limit {} min)", start, limit);
            }
            if let Some(msg) = &status.message {
                warning(msg);
            }
        }

        Commands::BreakCheck { employee, json } => {
            let now = resolve_now(cli)?;
            let check = enforce_break_rules(&mut pool, employee, now)?;

            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&check)
                        .map_err(|e| AppError::Other(e.to_string()))?
                );
                return Ok(());
            }

            match check.message {
                Some(msg) => warning(msg),
                None => info("No break warnings"),
            }
        }

        _ => {}
    }

    Ok(())
}
