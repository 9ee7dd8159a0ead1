use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// All schema creation goes through the migration list.
pub fn init_db(conn: &Connection) -> AppResult<Vec<&'static str>> {
    run_pending_migrations(conn)
}

/// Open the database at `path` and bring its schema up to date.
pub fn open_initialized(path: &str) -> AppResult<DbPool> {
    let pool = DbPool::new(path)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
