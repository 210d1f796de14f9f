use crate::core::eligibility::EligibilityPolicy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Thresholds of the bonus-hour / profit-sharing program. Absent fields
    /// fall back to the program defaults.
    #[serde(default)]
    pub policy: EligibilityPolicy,
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            policy: EligibilityPolicy::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("shiftclock")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".shiftclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftclock.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftclock.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).expect("❌ Failed to read configuration file");
            serde_yaml::from_str(&content).expect("❌ Failed to parse configuration file")
        } else {
            Config::default()
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB path: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = PathBuf::from(&name);
                if p.is_absolute() {
                    p
                } else {
                    dir.join(name)
                }
            }
            None => Self::database_file(),
        };

        // In test mode the config file is left untouched
        if !is_test {
            let cfg = Config {
                database: db_path.to_string_lossy().to_string(),
                policy: EligibilityPolicy::default(),
            };
            let yaml = serde_yaml::to_string(&cfg)
                .map_err(|e| io::Error::other(format!("config serialization: {}", e)))?;
            fs::write(Self::config_file(), yaml)?;
        }

        Ok(db_path)
    }

    pub fn save(&self) -> io::Result<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| io::Error::other(format!("config serialization: {}", e)))?;
        fs::write(Self::config_file(), yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_policy_fields_fall_back_to_program_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.policy.min_total_hours, 66.5);
        assert_eq!(cfg.policy.min_qualifying_shifts, 7);
        assert_eq!(cfg.policy.max_missed_minutes, 20.0);
        assert_eq!(cfg.policy.qualifying_shift_hours, 7.0);
        assert_eq!(cfg.policy.top_up_target_hours, 80.0);
    }

    #[test]
    fn partial_policy_overrides_only_named_fields() {
        let cfg: Config = serde_yaml::from_str(
            "database: /tmp/x.sqlite\npolicy:\n  min_total_hours: 60.0\n",
        )
        .unwrap();
        assert_eq!(cfg.policy.min_total_hours, 60.0);
        assert_eq!(cfg.policy.min_qualifying_shifts, 7);
    }
}
