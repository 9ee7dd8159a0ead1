use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{detail, success, warning};
use crate::utils::formatting::readable_ms;
use std::path::Path;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, config_path: &Path) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *check {
            if !config_path.exists() {
                warning(format!(
                    "No configuration file at {}; defaults are in use",
                    config_path.display()
                ));
                return Ok(());
            }

            let missing = Config::missing_keys(config_path)?;
            if missing.is_empty() {
                success(format!("{} is complete", config_path.display()));
            } else {
                for key in &missing {
                    warning(format!("Missing key: {key} (default applied)"));
                }
            }

            detail("Cache TTL", readable_ms(cfg.cache_ttl_ms));
            detail("Default rate", cfg.default_rate.label());
            detail("Pay items", cfg.pay_items.len());
            detail("Staff", cfg.staff.len());
        }
    }

    Ok(())
}
