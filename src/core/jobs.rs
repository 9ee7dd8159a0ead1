use crate::cache::JobCache;
use crate::cache::clock::Clock;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_job, upsert_job};
use crate::errors::{AppError, AppResult};
use crate::models::job_detail::JobDetail;
use chrono::TimeDelta;

/// Job detail access through the cache, backed by the `jobs` table.
pub struct JobLogic;

fn validate_job_id(job_id: &str) -> AppResult<&str> {
    let id = job_id.trim();
    if id.is_empty() || id.chars().any(char::is_whitespace) {
        return Err(AppError::InvalidJobId(job_id.to_string()));
    }
    Ok(id)
}

impl JobLogic {
    /// Cached read. Only a miss touches the database.
    pub async fn load<C: Clock>(
        pool: &DbPool,
        cache: &JobCache<C>,
        job_id: &str,
        ttl: Option<TimeDelta>,
    ) -> AppResult<JobDetail> {
        let id = validate_job_id(job_id)?;

        cache
            .with_cache(
                id,
                move || async move {
                    load_job(&pool.conn, id).and_then(|found| {
                        found.ok_or_else(|| AppError::JobNotFound(id.to_string()))
                    })
                },
                ttl,
            )
            .await
    }

    /// Replace the stored detail and refresh the cached copy.
    pub fn store<C: Clock>(
        pool: &DbPool,
        cache: &JobCache<C>,
        job_id: &str,
        detail: &JobDetail,
    ) -> AppResult<()> {
        let id = validate_job_id(job_id)?;
        upsert_job(&pool.conn, id, detail)?;
        cache.set(id, detail);

        ttlog(&pool.conn, "job_store", id, "Stored job detail")?;
        Ok(())
    }

    /// Merge `partial` into the stored detail.
    ///
    /// The cached copy is patched only if it is still fresh; otherwise the
    /// next `load` fetches the merged row from the database. Returns whether
    /// the cache was patched.
    pub fn patch<C: Clock>(
        pool: &DbPool,
        cache: &JobCache<C>,
        job_id: &str,
        partial: &JobDetail,
    ) -> AppResult<bool> {
        let id = validate_job_id(job_id)?;
        let mut detail =
            load_job(&pool.conn, id)?.ok_or_else(|| AppError::JobNotFound(id.to_string()))?;

        for (key, value) in partial {
            detail.insert(key.clone(), value.clone());
        }
        upsert_job(&pool.conn, id, &detail)?;

        let cached = cache.update(id, partial);

        let keys: Vec<&str> = partial.keys().map(String::as_str).collect();
        ttlog(
            &pool.conn,
            "job_patch",
            id,
            &format!("Patched fields: {}", keys.join(", ")),
        )?;
        Ok(cached)
    }
}
