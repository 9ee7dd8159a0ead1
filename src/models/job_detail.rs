use serde_json::{Map, Value};

/// Job identifier as used by the REST backend (UUID string).
pub type JobId = String;

/// Opaque job detail snapshot. The cache never looks inside it.
pub type JobDetail = Map<String, Value>;

/// Parse a JSON document into a job detail object.
/// Anything other than a JSON object is rejected.
pub fn job_detail_from_value(value: Value) -> Option<JobDetail> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
