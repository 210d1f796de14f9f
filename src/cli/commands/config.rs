use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                println!("{}", content);
            } else {
                // Nothing on disk yet: show the effective defaults
                let yaml = serde_yaml::to_string(cfg)
                    .map_err(|e| AppError::Config(e.to_string()))?;
                info("No configuration file found, effective defaults:");
                println!("{}", yaml);
            }
        }

        if *check {
            // A successful load already validated the shape
            success(format!(
                "Configuration OK (database: {}, eligibility: {}h / {} shifts / {}m missed)",
                cfg.database,
                cfg.policy.min_total_hours,
                cfg.policy.min_qualifying_shifts,
                cfg.policy.max_missed_minutes
            ));
        }
    }

    Ok(())
}
