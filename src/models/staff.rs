use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub wage_rate: f64,
}

/// Synchronous staff lookup used by the wage-rate fallback chain.
pub trait StaffResolver {
    fn staff(&self, staff_id: &str) -> Option<StaffRecord>;
}

pub struct NoStaff;

impl StaffResolver for NoStaff {
    fn staff(&self, _staff_id: &str) -> Option<StaffRecord> {
        None
    }
}

impl StaffResolver for Vec<StaffRecord> {
    fn staff(&self, staff_id: &str) -> Option<StaffRecord> {
        self.iter().find(|s| s.id == staff_id).cloned()
    }
}
