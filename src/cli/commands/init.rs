use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::{detail, success, warning};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and its migrations
pub fn handle(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    println!("⚙️  Initializing jobsheet…");

    if cli.test {
        detail("Config file", "(test mode, not written)");
    } else {
        cfg.save_to(config_path)?;
        detail("Config file", config_path.display());
    }

    if let Some(dir) = Path::new(&cfg.database).parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    detail("Database", &cfg.database);

    let conn = Connection::open(&cfg.database)?;
    let applied = init_db(&conn)?;

    if applied.is_empty() {
        success("Database schema already up to date");
    } else {
        for version in &applied {
            success(format!("Migration applied: {version}"));
        }
    }

    // audit line is best effort
    if let Err(e) = log::ttlog(
        &conn,
        "init",
        "",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    success("jobsheet initialization completed!");
    Ok(())
}
