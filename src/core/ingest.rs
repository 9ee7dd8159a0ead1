//! Normalization of raw grid/API rows into one canonical input shape.
//!
//! Rows may arrive with camelCase UI keys, snake_case API keys, legacy
//! cost/revenue names, or with values only present under `meta`. Every
//! alternate name is resolved here, once; the engine never sees them.

use super::number::to_number;
use crate::models::rate_type::RateType;
use crate::models::timesheet_entry::EntryIdentity;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct EntryInput {
    pub identity: EntryIdentity,
    pub staff_id: String,
    pub date: String,
    pub description: String,

    pub job_id: String,
    pub job_number: i64,
    pub job_name: String,
    pub client_name: String,

    pub hours: f64,
    /// First positive row-level wage rate, 0 when none. Staff fallbacks
    /// are applied by the engine.
    pub wage_rate: f64,
    pub charge_out_rate: f64,
    pub rate: RateType,
    pub billable: bool,

    pub xero_pay_item_id: Option<String>,
    pub xero_pay_item_name: Option<String>,
}

/// Where a field may be found: a top-level key or a key inside `meta`.
#[derive(Clone, Copy)]
enum Key {
    Row(&'static str),
    Meta(&'static str),
}

struct RawRow<'a> {
    row: &'a Map<String, Value>,
    meta: Option<&'a Map<String, Value>>,
}

impl<'a> RawRow<'a> {
    fn new(row: &'a Map<String, Value>) -> Self {
        let meta = row.get("meta").and_then(Value::as_object);
        Self { row, meta }
    }

    fn raw(&self, key: Key) -> Option<&'a Value> {
        let v = match key {
            Key::Row(k) => self.row.get(k),
            Key::Meta(k) => self.meta.and_then(|m| m.get(k)),
        };
        v.filter(|v| !v.is_null())
    }

    /// First key that is present and not null.
    fn first(&self, keys: &[Key]) -> Option<&'a Value> {
        keys.iter().find_map(|k| self.raw(*k))
    }

    /// First key holding a non-empty string (numbers are stringified).
    fn text(&self, keys: &[Key]) -> Option<String> {
        keys.iter().find_map(|k| match self.raw(*k)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    fn flag(&self, keys: &[Key]) -> Option<bool> {
        keys.iter().find_map(|k| self.raw(*k)?.as_bool())
    }

    fn positive(&self, keys: &[Key]) -> Option<f64> {
        keys.iter()
            .map(|k| to_number(self.raw(*k), 0.0))
            .find(|n| *n > 0.0)
    }
}

impl EntryInput {
    /// Normalize a raw row with `Ord` as the fallback rate label.
    pub fn from_value(value: &Value) -> Self {
        Self::from_value_with_rate(value, &RateType::Ord)
    }

    /// Normalize a raw row. Never fails: a non-object value yields an
    /// empty unsaved row. `default_rate` applies when neither the row nor
    /// its `meta` names a rate.
    pub fn from_value_with_rate(value: &Value, default_rate: &RateType) -> Self {
        let empty = Map::new();
        let row = RawRow::new(value.as_object().unwrap_or(&empty));

        let identity = match row.text(&[Key::Row("id")]) {
            Some(id) => EntryIdentity::Persisted(id),
            None => match row.text(&[Key::Row("tempId"), Key::Row("temp_id")]) {
                Some(temp) => EntryIdentity::Unsaved(temp),
                None => EntryIdentity::new_temp(),
            },
        };

        let hours = to_number(row.first(&[Key::Row("hours"), Key::Row("quantity")]), 0.0);

        let wage_rate = row
            .positive(&[
                Key::Row("wageRate"),
                Key::Row("wage_rate"),
                Key::Row("unit_cost"),
            ])
            .unwrap_or(0.0);

        let charge_out_rate = to_number(
            row.first(&[
                Key::Row("chargeOutRate"),
                Key::Row("charge_out_rate"),
                Key::Row("unit_rev"),
            ]),
            0.0,
        );

        // Any stored multiplier is ignored; the label decides.
        let rate = row
            .text(&[Key::Row("rate"), Key::Meta("rate_type")])
            .map(|label| RateType::from_label(&label))
            .unwrap_or_else(|| default_rate.clone());

        let billable = row
            .flag(&[Key::Row("billable"), Key::Meta("is_billable")])
            .unwrap_or(true);

        Self {
            identity,
            staff_id: row
                .text(&[Key::Row("staffId"), Key::Row("staff_id"), Key::Meta("staff_id")])
                .unwrap_or_default(),
            date: row
                .text(&[Key::Row("date"), Key::Meta("date")])
                .unwrap_or_default(),
            description: row.text(&[Key::Row("description")]).unwrap_or_default(),
            job_id: row
                .text(&[Key::Row("jobId"), Key::Row("job_id"), Key::Meta("job_id")])
                .unwrap_or_default(),
            job_number: to_number(
                row.first(&[
                    Key::Row("jobNumber"),
                    Key::Row("job_number"),
                    Key::Meta("job_number"),
                ]),
                0.0,
            ) as i64,
            job_name: row
                .text(&[Key::Row("jobName"), Key::Row("job_name"), Key::Meta("job_name")])
                .unwrap_or_default(),
            client_name: row
                .text(&[
                    Key::Row("clientName"),
                    Key::Row("client_name"),
                    Key::Meta("client_name"),
                ])
                .unwrap_or_default(),
            hours,
            wage_rate,
            charge_out_rate,
            rate,
            billable,
            xero_pay_item_id: row.text(&[
                Key::Row("xeroPayItemId"),
                Key::Row("xero_pay_item_id"),
                Key::Meta("xero_pay_item_id"),
            ]),
            xero_pay_item_name: row.text(&[
                Key::Row("xeroPayItemName"),
                Key::Row("xero_pay_item_name"),
                Key::Meta("xero_pay_item_name"),
            ]),
        }
    }
}
