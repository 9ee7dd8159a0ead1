use crate::cache::JobCache;
use crate::cli::parser::{Commands, JobAction};
use crate::config::Config;
use crate::core::jobs::JobLogic;
use crate::db::initialize::open_initialized;
use crate::db::queries::list_job_ids;
use crate::errors::{AppError, AppResult};
use crate::models::job_detail::{JobDetail, job_detail_from_value};
use crate::ui::messages::{header, info, success};
use crate::utils::formatting::readable_ms;
use chrono::TimeDelta;
use std::fs;
use std::future::Future;

fn read_detail(path: &str) -> AppResult<JobDetail> {
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    job_detail_from_value(value)
        .ok_or_else(|| AppError::Other(format!("{path} must contain a JSON object")))
}

fn block_on<F: Future>(fut: F) -> AppResult<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    Ok(rt.block_on(fut))
}

fn parse_ttl(ttl_ms: Option<i64>) -> AppResult<Option<TimeDelta>> {
    match ttl_ms {
        Some(ms) if ms <= 0 => Err(AppError::Config(format!(
            "--ttl-ms must be positive, got {ms}"
        ))),
        Some(ms) => Ok(Some(TimeDelta::milliseconds(ms))),
        None => Ok(None),
    }
}

/// Handle the `job` subcommand family.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Job { action } = cmd else {
        return Ok(());
    };

    let pool = open_initialized(&cfg.database)?;
    let cache = JobCache::new().with_default_ttl(cfg.cache_ttl());

    match action {
        JobAction::Add { id, file } => {
            let detail = read_detail(file)?;
            JobLogic::store(&pool, &cache, id, &detail)?;
            success(format!("Job {} stored ({} fields)", id.trim(), detail.len()));
        }

        JobAction::Patch { id, file } => {
            let partial = read_detail(file)?;
            block_on(JobLogic::load(&pool, &cache, id, None))??;
            let refreshed = JobLogic::patch(&pool, &cache, id, &partial)?;
            success(format!("Job {} patched ({} fields)", id.trim(), partial.len()));
            if refreshed {
                info("Cached copy updated in place");
            } else {
                info("Cached copy was stale; next read reloads from the database");
            }
        }

        JobAction::Show { ids, ttl_ms } => {
            let ttl = parse_ttl(*ttl_ms)?;

            block_on(async {
                for id in ids {
                    let hit = cache.is_cached(id.trim(), ttl);
                    let detail = JobLogic::load(&pool, &cache, id, ttl).await?;

                    header(format!(
                        "Job {} ({})",
                        id.trim(),
                        if hit { "cache hit" } else { "loaded" }
                    ));
                    println!("{}", serde_json::to_string_pretty(&detail)?);
                }
                Ok::<(), AppError>(())
            })??;

            let stats = cache.stats(ttl);
            info(format!(
                "Cache: {} entries, {} valid, {} expired (ttl {})",
                stats.total,
                stats.valid,
                stats.expired,
                readable_ms(ttl.unwrap_or(cache.default_ttl()).num_milliseconds())
            ));
        }

        JobAction::List => {
            let ids = list_job_ids(&pool.conn)?;
            if ids.is_empty() {
                info("No jobs stored.");
            }
            for id in ids {
                println!("{id}");
            }
        }
    }

    Ok(())
}
