//! Wage/bill recalculation for timesheet rows.
//!
//! `wage = hours * multiplier * wage_rate` and `bill = hours * charge_out_rate`,
//! both rounded to cents. The multiplier only affects pay cost, never the
//! client bill. The function is pure and idempotent: feeding
//! `TimesheetEntry::to_row()` back in yields the same entry.

use super::ingest::EntryInput;
use super::number::round2;
use crate::models::pay_item::{NoPayItems, PayItemLookup};
use crate::models::rate_type::RateType;
use crate::models::staff::{NoStaff, StaffRecord, StaffResolver};
use crate::models::timesheet_entry::TimesheetEntry;
use serde_json::Value;

/// Explicit collaborators for a recalculation.
pub struct RecalcContext<'a> {
    pub staff: &'a dyn StaffResolver,
    /// Staff member whose timesheet is open; last wage-rate fallback.
    pub current_staff: Option<&'a StaffRecord>,
    pub pay_items: &'a dyn PayItemLookup,
    /// Rate label for rows that carry none.
    pub default_rate: RateType,
}

impl<'a> RecalcContext<'a> {
    pub fn new(
        staff: &'a dyn StaffResolver,
        current_staff: Option<&'a StaffRecord>,
        pay_items: &'a dyn PayItemLookup,
    ) -> Self {
        Self {
            staff,
            current_staff,
            pay_items,
            default_rate: RateType::Ord,
        }
    }

    pub fn with_default_rate(mut self, rate: RateType) -> Self {
        self.default_rate = rate;
        self
    }

    /// No staff records, no pay items.
    pub fn detached() -> RecalcContext<'static> {
        RecalcContext {
            staff: &NoStaff,
            current_staff: None,
            pay_items: &NoPayItems,
            default_rate: RateType::Ord,
        }
    }
}

/// Normalize a raw row and recompute its derived fields.
pub fn recalculate(row: &Value, ctx: &RecalcContext<'_>) -> TimesheetEntry {
    recalculate_entry(EntryInput::from_value_with_rate(row, &ctx.default_rate), ctx)
}

pub fn recalculate_entry(input: EntryInput, ctx: &RecalcContext<'_>) -> TimesheetEntry {
    let wage_rate = resolve_wage_rate(&input, ctx);
    let multiplier = input.rate.multiplier();

    let wage = compute_wage(input.hours, multiplier, wage_rate);
    let bill = compute_bill(input.billable, input.hours, input.charge_out_rate);

    let (xero_pay_item_id, xero_pay_item_name) = resolve_pay_item(
        multiplier,
        input.xero_pay_item_id,
        input.xero_pay_item_name,
        ctx.pay_items,
    );

    TimesheetEntry {
        identity: input.identity,
        staff_id: input.staff_id,
        date: input.date,
        description: input.description,
        job_id: input.job_id,
        job_number: input.job_number,
        job_name: input.job_name,
        client_name: input.client_name,
        hours: input.hours,
        wage_rate,
        charge_out_rate: input.charge_out_rate,
        rate: input.rate,
        billable: input.billable,
        rate_multiplier: multiplier,
        wage,
        bill,
        xero_pay_item_id,
        xero_pay_item_name,
    }
}

pub fn compute_wage(hours: f64, multiplier: f64, wage_rate: f64) -> f64 {
    if hours > 0.0 && wage_rate > 0.0 {
        round2(hours * multiplier * wage_rate)
    } else {
        0.0
    }
}

pub fn compute_bill(billable: bool, hours: f64, charge_out_rate: f64) -> f64 {
    if billable && hours > 0.0 && charge_out_rate > 0.0 {
        round2(hours * charge_out_rate)
    } else {
        0.0
    }
}

/// Row rate first, then the row's staff record, then the current staff.
fn resolve_wage_rate(input: &EntryInput, ctx: &RecalcContext<'_>) -> f64 {
    if input.wage_rate > 0.0 {
        return input.wage_rate;
    }

    let row_staff = if input.staff_id.is_empty() {
        None
    } else {
        ctx.staff.staff(&input.staff_id)
    };

    row_staff
        .as_ref()
        .into_iter()
        .chain(ctx.current_staff)
        .map(|s| s.wage_rate)
        .find(|r| r.is_finite() && *r > 0.0)
        .unwrap_or(0.0)
}

/// Non-ordinary multipliers take the configured pay item over whatever the
/// row carried. At exactly 1.0 the row's own (or job default) item stays.
fn resolve_pay_item(
    multiplier: f64,
    row_id: Option<String>,
    row_name: Option<String>,
    pay_items: &dyn PayItemLookup,
) -> (Option<String>, Option<String>) {
    if multiplier != 1.0
        && let Some(item) = pay_items.pay_item_for(multiplier)
    {
        return (Some(item.id), Some(item.name));
    }

    (row_id, row_name)
}
