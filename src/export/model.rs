use crate::core::sheet::SheetRow;
use crate::utils::table::{Column, Table};
use serde::Serialize;

/// Flat row for CSV and table output.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub id: String,
    pub date: String,
    pub staff_id: String,
    pub job_number: i64,
    pub job_name: String,
    pub hours: f64,
    pub rate: String,
    pub multiplier: f64,
    pub wage_rate: f64,
    pub charge_out_rate: f64,
    pub billable: bool,
    pub wage: f64,
    pub bill: f64,
    pub pay_item: String,
    pub ready: bool,
    pub duplicate_of: String,
}

impl From<&SheetRow> for EntryExport {
    fn from(r: &SheetRow) -> Self {
        let e = &r.entry;
        Self {
            id: e.identity.as_str().to_string(),
            date: e.date.clone(),
            staff_id: e.staff_id.clone(),
            job_number: e.job_number,
            job_name: e.job_name.clone(),
            hours: e.hours,
            rate: e.rate.label().to_string(),
            multiplier: e.rate_multiplier,
            wage_rate: e.wage_rate,
            charge_out_rate: e.charge_out_rate,
            billable: e.billable,
            wage: e.wage,
            bill: e.bill,
            pay_item: e.xero_pay_item_name.clone().unwrap_or_default(),
            ready: r.ready,
            duplicate_of: r.duplicate_of.clone().unwrap_or_default(),
        }
    }
}

fn col(header: &str, width: usize) -> Column {
    Column {
        header: header.to_string(),
        width,
    }
}

pub(crate) fn to_table(rows: &[EntryExport]) -> String {
    let mut table = Table::new(vec![
        col("DATE", 10),
        col("JOB", 8),
        col("HOURS", 6),
        col("RATE", 6),
        col("WAGE", 10),
        col("BILL", 10),
        col("PAY ITEM", 18),
        col("STATUS", 10),
    ]);

    for r in rows {
        let status = if !r.duplicate_of.is_empty() {
            "duplicate"
        } else if r.ready {
            "ready"
        } else {
            "incomplete"
        };
        table.add_row(vec![
            r.date.clone(),
            r.job_number.to_string(),
            format!("{:.2}", r.hours),
            r.rate.clone(),
            format!("{:.2}", r.wage),
            format!("{:.2}", r.bill),
            r.pay_item.clone(),
            status.to_string(),
        ]);
    }

    table.render()
}
