mod csv;
mod json;
mod model;

pub use model::EntryExport;

use crate::core::sheet::SheetRow;
use crate::errors::AppResult;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Table,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Table => "table",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Render recalculated rows as CSV or JSON text.
pub fn render(rows: &[SheetRow], format: ExportFormat) -> AppResult<String> {
    let flat: Vec<EntryExport> = rows.iter().map(EntryExport::from).collect();
    match format {
        ExportFormat::Csv => csv::to_csv(&flat),
        ExportFormat::Json => json::to_json(rows),
        ExportFormat::Table => Ok(model::to_table(&flat)),
    }
}

/// Write rendered rows to `path`.
pub fn write_file(rows: &[SheetRow], format: ExportFormat, path: &Path) -> AppResult<()> {
    std::fs::write(path, render(rows, format)?)?;
    success(format!(
        "{} export completed: {}",
        format.as_str(),
        path.display()
    ));
    Ok(())
}
