use super::rate_type::RateType;
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// Row identity: a saved row has the backend id, an unsaved grid row
/// only carries a client-side temp id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryIdentity {
    Persisted(String),
    Unsaved(String),
}

impl EntryIdentity {
    pub fn new_temp() -> Self {
        EntryIdentity::Unsaved(format!("temp-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntryIdentity::Persisted(id) | EntryIdentity::Unsaved(id) => id,
        }
    }
}

/// Canonical timesheet row. `rate_multiplier`, `wage` and `bill` are
/// derived and only ever written by the recalculation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetEntry {
    pub identity: EntryIdentity,
    pub staff_id: String,
    pub date: String,
    pub description: String,

    pub job_id: String,
    pub job_number: i64,
    pub job_name: String,
    pub client_name: String,

    pub hours: f64,
    pub wage_rate: f64,
    pub charge_out_rate: f64,
    pub rate: RateType,
    pub billable: bool,

    pub rate_multiplier: f64,
    pub wage: f64,
    pub bill: f64,

    pub xero_pay_item_id: Option<String>,
    pub xero_pay_item_name: Option<String>,
}

/// Legacy mirror of some canonical fields, kept for the API shape.
/// Always generated from a `TimesheetEntry`, never read back as truth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryMeta {
    pub rate_type: String,
    pub rate_multiplier: f64,
    pub wage_rate_multiplier: f64,
    pub is_billable: bool,
    pub staff_id: String,
    pub date: String,
    pub job_id: String,
    pub job_number: i64,
    pub job_name: String,
    pub client_name: String,
}

impl TimesheetEntry {
    /// Empty "new row" template shown at the bottom of the grid.
    pub fn blank(staff_id: &str, date: &str) -> Self {
        Self {
            identity: EntryIdentity::new_temp(),
            staff_id: staff_id.to_string(),
            date: date.to_string(),
            description: String::new(),
            job_id: String::new(),
            job_number: 0,
            job_name: String::new(),
            client_name: String::new(),
            hours: 0.0,
            wage_rate: 0.0,
            charge_out_rate: 0.0,
            rate: RateType::Ord,
            billable: true,
            rate_multiplier: 1.0,
            wage: 0.0,
            bill: 0.0,
            xero_pay_item_id: None,
            xero_pay_item_name: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self.identity, EntryIdentity::Persisted(_))
    }

    /// A row can be promoted from "new" to "saved" once it has a job
    /// and positive hours.
    pub fn is_ready_to_save(&self) -> bool {
        !self.job_id.is_empty() && self.hours > 0.0
    }

    /// Same staff, day, job, hours, rate and description. Identity is ignored.
    pub fn is_duplicate_of(&self, other: &TimesheetEntry) -> bool {
        self.staff_id == other.staff_id
            && self.date == other.date
            && self.job_id == other.job_id
            && self.hours == other.hours
            && self.rate == other.rate
            && self.description.trim() == other.description.trim()
    }

    /// First other row (by identity) this one duplicates.
    pub fn find_duplicate<'a>(&self, rows: &'a [TimesheetEntry]) -> Option<&'a TimesheetEntry> {
        rows.iter()
            .find(|r| r.identity != self.identity && self.is_duplicate_of(r))
    }

    pub fn meta(&self) -> EntryMeta {
        EntryMeta {
            rate_type: self.rate.label().to_string(),
            rate_multiplier: self.rate_multiplier,
            wage_rate_multiplier: self.rate_multiplier,
            is_billable: self.billable,
            staff_id: self.staff_id.clone(),
            date: self.date.clone(),
            job_id: self.job_id.clone(),
            job_number: self.job_number,
            job_name: self.job_name.clone(),
            client_name: self.client_name.clone(),
        }
    }

    /// External grid/API row shape (camelCase keys plus the `meta` mirror).
    pub fn to_row(&self) -> Value {
        let mut row = json!({
            "staffId": self.staff_id,
            "date": self.date,
            "description": self.description,
            "jobId": self.job_id,
            "jobNumber": self.job_number,
            "jobName": self.job_name,
            "clientName": self.client_name,
            "hours": self.hours,
            "wageRate": self.wage_rate,
            "chargeOutRate": self.charge_out_rate,
            "rate": self.rate.label(),
            "rateMultiplier": self.rate_multiplier,
            "billable": self.billable,
            "wage": self.wage,
            "bill": self.bill,
            "xeroPayItemId": self.xero_pay_item_id,
            "xeroPayItemName": self.xero_pay_item_name,
            "meta": self.meta(),
        });

        if let Some(map) = row.as_object_mut() {
            match &self.identity {
                EntryIdentity::Persisted(id) => map.insert("id".into(), json!(id)),
                EntryIdentity::Unsaved(temp) => map.insert("tempId".into(), json!(temp)),
            };
        }

        row
    }
}
