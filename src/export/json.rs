use crate::core::sheet::SheetRow;
use crate::errors::AppResult;
use serde_json::Value;

/// Rows in the external API shape (camelCase plus `meta`).
pub fn to_json(rows: &[SheetRow]) -> AppResult<String> {
    let values: Vec<Value> = rows.iter().map(|r| r.entry.to_row()).collect();
    Ok(serde_json::to_string_pretty(&values)?)
}
