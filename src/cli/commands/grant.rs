use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::eligibility::grant_eligible_hours;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::GrantHours { period, json } = cmd {
        let mut pool = open_pool(cfg)?;
        let outcome = grant_eligible_hours(&mut pool, &cfg.policy, period);

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
            for result in &outcome.results {
                if result.success {
                    info(format!(
                        "{}: +{:.2} hours",
                        result.name, result.additional_hours
                    ));
                } else if let Some(msg) = &result.message {
                    warning(format!("{}: {}", result.name, msg));
                }
            }
        } else {
            warning(&outcome.message);
        }
    }

    Ok(())
}
