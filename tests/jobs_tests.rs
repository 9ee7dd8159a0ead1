use chrono::TimeDelta;
use jobsheet::cache::JobCache;
use jobsheet::cache::clock::ManualClock;
use jobsheet::core::jobs::JobLogic;
use jobsheet::db::initialize::init_db;
use jobsheet::db::pool::DbPool;
use jobsheet::db::queries::{load_job, load_log};
use jobsheet::errors::AppError;
use jobsheet::models::job_detail::JobDetail;
use serde_json::json;
use std::sync::Arc;

fn obj(v: serde_json::Value) -> JobDetail {
    v.as_object().cloned().unwrap()
}

fn memory_db() -> DbPool {
    let pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    pool
}

#[test]
fn test_migrations_are_idempotent() {
    let pool = DbPool::in_memory().unwrap();
    let first = init_db(&pool.conn).unwrap();
    let second = init_db(&pool.conn).unwrap();

    assert_eq!(first.len(), 2);
    assert!(second.is_empty());
}

#[test]
fn test_migration_failure_names_the_version() {
    let pool = DbPool::in_memory().unwrap();
    // log table from an older layout, without the target column
    pool.conn
        .execute_batch(
            "CREATE TABLE log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                operation TEXT NOT NULL,
                message TEXT NOT NULL
            );",
        )
        .unwrap();

    let err = init_db(&pool.conn).unwrap_err();
    assert!(
        matches!(err, AppError::Migration { ref version, .. } if version == "20250301_0001_create_jobs"),
        "unexpected error: {err}"
    );
    assert!(err.to_string().starts_with("Migration 20250301_0001_create_jobs failed"));
}

#[tokio::test]
async fn test_load_reads_database_once_within_ttl() {
    let pool = memory_db();
    let clock = Arc::new(ManualClock::default());
    let cache = JobCache::with_clock(clock.clone());

    JobLogic::store(&pool, &cache, "job-1", &obj(json!({ "name": "Hood" }))).unwrap();
    cache.clear();

    let first = JobLogic::load(&pool, &cache, "job-1", None).await.unwrap();
    assert_eq!(first["name"], "Hood");

    // change the row behind the cache's back: the cached copy still wins
    pool.conn
        .execute(
            "UPDATE jobs SET detail = ?1 WHERE id = 'job-1'",
            [r#"{"name":"Changed"}"#],
        )
        .unwrap();
    let cached = JobLogic::load(&pool, &cache, "job-1", None).await.unwrap();
    assert_eq!(cached["name"], "Hood");

    clock.advance(TimeDelta::minutes(6));
    let fresh = JobLogic::load(&pool, &cache, "job-1", None).await.unwrap();
    assert_eq!(fresh["name"], "Changed");
}

#[tokio::test]
async fn test_load_missing_job_is_not_cached() {
    let pool = memory_db();
    let cache = JobCache::new();

    let err = JobLogic::load(&pool, &cache, "ghost", None).await.unwrap_err();
    assert!(matches!(err, AppError::JobNotFound(ref id) if id == "ghost"));
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_blank_job_id_is_rejected() {
    let pool = memory_db();
    let cache = JobCache::new();

    let err = JobLogic::load(&pool, &cache, "   ", None).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidJobId(_)));
}

#[tokio::test]
async fn test_patch_updates_fresh_cache_entry() {
    let pool = memory_db();
    let cache = JobCache::new();

    JobLogic::store(&pool, &cache, "job-1", &obj(json!({ "name": "Hood", "status": "quoting" })))
        .unwrap();
    JobLogic::load(&pool, &cache, "job-1", None).await.unwrap();

    let patched =
        JobLogic::patch(&pool, &cache, "job-1", &obj(json!({ "status": "accepted" }))).unwrap();
    assert!(patched);
    assert_eq!(cache.get("job-1", None).unwrap()["status"], "accepted");

    let stored = load_job(&pool.conn, "job-1").unwrap().unwrap();
    assert_eq!(stored["status"], "accepted");
    assert_eq!(stored["name"], "Hood");
}

#[test]
fn test_patch_with_cold_cache_only_touches_database() {
    let pool = memory_db();
    let cache = JobCache::new();

    JobLogic::store(&pool, &cache, "job-1", &obj(json!({ "name": "Hood" }))).unwrap();
    cache.invalidate_all();

    let patched =
        JobLogic::patch(&pool, &cache, "job-1", &obj(json!({ "status": "accepted" }))).unwrap();
    assert!(!patched);
    assert!(!cache.is_cached("job-1", None));

    let ops: Vec<String> = load_log(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|r| r.operation)
        .collect();
    assert!(ops.contains(&"job_store".to_string()));
    assert!(ops.contains(&"job_patch".to_string()));
}
