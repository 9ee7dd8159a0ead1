use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::recalc::RecalcContext;
use crate::core::sheet::SheetLogic;
use crate::db::initialize::open_initialized;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::export::{self, ExportFormat};
use crate::ui::messages::warning;
use crate::utils::formatting::{bold, money};
use serde_json::Value;
use std::fs;
use std::path::Path;

fn read_rows(path: &str) -> AppResult<Vec<Value>> {
    let content = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Array(rows) => Ok(rows),
        row @ Value::Object(_) => Ok(vec![row]),
        _ => Err(AppError::InvalidRow(format!(
            "{path} must contain a JSON array of rows"
        ))),
    }
}

/// Handle the `recalc` command.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Recalc {
        file,
        staff,
        format,
        out,
    } = cmd
    else {
        return Ok(());
    };

    let rows = read_rows(file)?;

    let current = cfg.current_staff_record(staff.as_deref());
    if let Some(id) = staff
        && current.is_none()
    {
        warning(format!("Unknown staff id '{id}'; no staff wage-rate fallback"));
    }

    let ctx = RecalcContext::new(cfg, current.as_ref(), cfg)
        .with_default_rate(cfg.default_rate.clone());
    let sheet = SheetLogic::recalculate_all(&rows, &ctx);

    match out {
        Some(path) => export::write_file(&sheet, *format, Path::new(path))?,
        None => print!("{}", export::render(&sheet, *format)?),
    }

    if out.is_none() && *format == ExportFormat::Table {
        let totals = SheetLogic::totals(&sheet);
        println!(
            "{} hours {:.2} | wage {} | bill {}",
            bold("Totals:"),
            totals.hours,
            money(totals.wage),
            money(totals.bill)
        );
    }

    // audit line is best effort
    let ready = sheet.iter().filter(|r| r.ready).count();
    let audit = open_initialized(&cfg.database).and_then(|pool| {
        ttlog(
            &pool.conn,
            "recalc",
            file,
            &format!("{} rows recalculated, {} ready to save", sheet.len(), ready),
        )
    });
    if let Err(e) = audit {
        warning(format!("Failed to write internal log: {e}"));
    }

    Ok(())
}
