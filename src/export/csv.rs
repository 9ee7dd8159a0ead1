use super::model::EntryExport;
use crate::errors::{AppError, AppResult};
use csv::Writer;

pub fn to_csv(rows: &[EntryExport]) -> AppResult<String> {
    let mut wtr = Writer::from_writer(Vec::new());
    for r in rows {
        wtr.serialize(r)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}
