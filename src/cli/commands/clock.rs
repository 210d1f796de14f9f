use crate::cli::commands::{open_pool, resolve_now};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::clock::{clock_in, clock_out};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let now = resolve_now(cli)?;

    match &cli.command {
        Commands::ClockIn { employee, json } => {
            let outcome = clock_in(&mut pool, employee, now);

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
                if outcome.late_minutes > 0.0 {
                    warning(format!(
                        "Late clock-in: {} minutes (pay period total: {} missed minutes)",
                        outcome.late_minutes, outcome.pay_period_missed_minutes
                    ));
                }
            } else {
                warning(&outcome.message);
            }
        }

        Commands::ClockOut { employee, json } => {
            let outcome = clock_out(&mut pool, employee, now);

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
                if outcome.early_minutes > 0.0 {
                    warning(format!(
                        "Early departure: {} minutes (pay period total: {} missed minutes)",
                        outcome.early_minutes, outcome.pay_period_missed_minutes
                    ));
                }
                if outcome.different_day {
                    warning("Clock-out recorded on a different day than the clock-in");
                }
            } else {
                warning(&outcome.message);
            }
        }

        _ => {}
    }

    Ok(())
}
