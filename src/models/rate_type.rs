use serde::{Deserialize, Serialize};

/// Rate label chosen on a timesheet row. The label alone decides the
/// wage multiplier; no stored multiplier is ever consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RateType {
    #[default]
    Ord,         // "Ord"
    TimeAndHalf, // "1.5"
    DoubleTime,  // "2.0"
    Unpaid,      // "Unpaid"
    Other(String),
}

impl RateType {
    /// Convert a label → enum. Unknown labels are kept verbatim.
    pub fn from_label(s: &str) -> Self {
        match s.trim() {
            "Ord" => RateType::Ord,
            "1.5" => RateType::TimeAndHalf,
            "2.0" => RateType::DoubleTime,
            "Unpaid" => RateType::Unpaid,
            other => RateType::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RateType::Ord => "Ord",
            RateType::TimeAndHalf => "1.5",
            RateType::DoubleTime => "2.0",
            RateType::Unpaid => "Unpaid",
            RateType::Other(s) => s,
        }
    }

    /// Fixed multiplier table; unrecognized labels pay at 1.0.
    pub fn multiplier(&self) -> f64 {
        match self {
            RateType::Ord => 1.0,
            RateType::TimeAndHalf => 1.5,
            RateType::DoubleTime => 2.0,
            RateType::Unpaid => 0.0,
            RateType::Other(_) => 1.0,
        }
    }
}

impl From<String> for RateType {
    fn from(s: String) -> Self {
        RateType::from_label(&s)
    }
}

impl From<RateType> for String {
    fn from(r: RateType) -> Self {
        r.label().to_string()
    }
}
