use crate::cli::commands::{open_pool, resolve_now};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::break_cache::BreakTimerCache;
use crate::core::breaks::{end_break, start_break};
use crate::errors::{AppError, AppResult};
use crate::models::break_type::BreakType;
use crate::ui::messages::{success, warning};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let mut timers = BreakTimerCache::new();
    let now = resolve_now(cli)?;

    match &cli.command {
        Commands::BreakStart {
            employee,
            break_type,
            json,
        } => {
            let outcome = start_break(
                &mut pool,
                &mut timers,
                employee,
                BreakType::from_arg(break_type),
                now,
            );

            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&outcome)
                        .map_err(|e| AppError::Other(e.to_string()))?
                );
                return Ok(());
            }

            if outcome.success {
                success(&outcome.message);
            } else {
                warning(&outcome.message);
            }
        }

        Commands::BreakEnd {
            employee,
            break_type,
            json,
        } => {
            let outcome = end_break(
                &mut pool,
                &mut timers,
                employee,
                BreakType::from_arg(break_type),
                now,
            );

            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&outcome)
                        .map_err(|e| AppError::Other(e.to_string()))?
                );
                return Ok(());
            }

            if outcome.success {
                success(&outcome.message);
                if outcome.extended_minutes > 0.0 {
                    warning(format!(
                        "Break exceeded by {} minutes (pay period total: {} missed minutes)",
                        outcome.extended_minutes, outcome.pay_period_missed_minutes
                    ));
                }
            } else {
                warning(&outcome.message);
            }
        }

        _ => {}
    }

    Ok(())
}
