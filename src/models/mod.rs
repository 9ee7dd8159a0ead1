pub mod job_detail;
pub mod pay_item;
pub mod rate_type;
pub mod staff;
pub mod timesheet_entry;
