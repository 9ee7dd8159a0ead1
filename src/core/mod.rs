pub mod ingest;
pub mod jobs;
pub mod log;
pub mod number;
pub mod recalc;
pub mod sheet;
