use super::recalc::{RecalcContext, recalculate};
use crate::models::timesheet_entry::TimesheetEntry;
use serde_json::Value;

/// A recalculated grid row plus its save-readiness.
#[derive(Debug, Clone)]
pub struct SheetRow {
    pub entry: TimesheetEntry,
    pub ready: bool,
    /// Identity of an earlier row this one duplicates.
    pub duplicate_of: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SheetTotals {
    pub hours: f64,
    pub wage: f64,
    pub bill: f64,
}

pub struct SheetLogic;

impl SheetLogic {
    /// Recalculate every row and flag which ones could be saved.
    /// A row is only checked for duplicates against the rows before it.
    pub fn recalculate_all(rows: &[Value], ctx: &RecalcContext<'_>) -> Vec<SheetRow> {
        let mut entries: Vec<TimesheetEntry> = Vec::with_capacity(rows.len());
        let mut out = Vec::with_capacity(rows.len());

        for raw in rows {
            let entry = recalculate(raw, ctx);
            let duplicate_of = entry
                .find_duplicate(&entries)
                .map(|d| d.identity.as_str().to_string());
            let ready = entry.is_ready_to_save() && duplicate_of.is_none();

            entries.push(entry.clone());
            out.push(SheetRow {
                entry,
                ready,
                duplicate_of,
            });
        }

        out
    }

    pub fn totals(rows: &[SheetRow]) -> SheetTotals {
        rows.iter().fold(SheetTotals::default(), |acc, r| SheetTotals {
            hours: acc.hours + r.entry.hours,
            wage: acc.wage + r.entry.wage,
            bill: acc.bill + r.entry.bill,
        })
    }
}
