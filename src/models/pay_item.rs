use serde::{Deserialize, Serialize};

/// Payroll (Xero) category a time entry's cost line is tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayItem {
    pub id: String,
    pub name: String,
}

/// Resolves the configured pay item for a wage multiplier.
pub trait PayItemLookup {
    fn pay_item_for(&self, multiplier: f64) -> Option<PayItem>;
}

/// Lookup that never finds anything; rows keep their own pay item.
pub struct NoPayItems;

impl PayItemLookup for NoPayItems {
    fn pay_item_for(&self, _multiplier: f64) -> Option<PayItem> {
        None
    }
}
