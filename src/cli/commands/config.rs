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
                println!("{content}");
            } else {
                info("No configuration file found; using defaults.");
                let yaml =
                    serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
                println!("{yaml}");
            }
        }

        if *check {
            if cfg.database.is_empty() {
                return Err(AppError::Config("missing 'database' field".into()));
            }
            if cfg.sweep_batch_size == 0 {
                return Err(AppError::Config("'sweep_batch_size' must be >= 1".into()));
            }
            success("Configuration is valid.");
        }
    }

    Ok(())
}
