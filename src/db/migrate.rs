use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, Result};
use tracing::info;

/// Ensure that the `log` table exists. Applied migrations are recorded in it,
/// so it has to come first.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_jobs",
        description: "Created jobs table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id          TEXT PRIMARY KEY,
            detail      TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250310_0002_index_log_operation",
        description: "Indexed log by operation",
        sql: "CREATE INDEX IF NOT EXISTS idx_log_operation ON log(operation, target);",
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Returns true when the migration ran now.
fn apply(conn: &Connection, m: &Migration) -> AppResult<bool> {
    try_apply(conn, m).map_err(|source| AppError::Migration {
        version: m.version.to_string(),
        source,
    })
}

fn try_apply(conn: &Connection, m: &Migration) -> Result<bool> {
    if is_applied(conn, m.version)? {
        return Ok(false);
    }

    conn.execute_batch(m.sql)?;
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    info!(version = m.version, "migration applied");
    Ok(true)
}

/// Run all pending migrations in order and return the versions applied.
/// Idempotent: a second run applies nothing.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if apply(conn, m)? {
            applied.push(m.version);
        }
    }

    Ok(applied)
}
