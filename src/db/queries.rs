use crate::errors::{AppError, AppResult};
use crate::models::job_detail::{JobDetail, job_detail_from_value};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

#[derive(Debug, Clone)]
pub struct LogRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Stored detail for `job_id`, or None when the job is unknown.
pub fn load_job(conn: &Connection, job_id: &str) -> AppResult<Option<JobDetail>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT detail FROM jobs WHERE id = ?1",
            [job_id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(raw) = raw else {
        return Ok(None);
    };

    let value: serde_json::Value = serde_json::from_str(&raw)?;
    job_detail_from_value(value)
        .map(Some)
        .ok_or_else(|| AppError::Other(format!("Stored detail for job {job_id} is not an object")))
}

pub fn upsert_job(conn: &Connection, job_id: &str, detail: &JobDetail) -> AppResult<()> {
    let json = serde_json::to_string(detail)?;
    conn.execute(
        "INSERT INTO jobs (id, detail, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET detail = excluded.detail, updated_at = excluded.updated_at",
        params![job_id, json, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn list_job_ids(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT id FROM jobs ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_log(conn: &Connection) -> AppResult<Vec<LogRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(LogRow {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
