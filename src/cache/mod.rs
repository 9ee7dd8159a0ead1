//! In-memory job detail cache.
//!
//! An entry is served only while it is younger than the TTL *and* was
//! written under the cache's current version. Bumping the version
//! (`invalidate_all`) logically drops every entry at once; stale entries
//! are evicted lazily the next time `get` touches them.

pub mod clock;

use crate::models::job_detail::{JobDetail, JobId};
use chrono::{DateTime, TimeDelta, Utc};
use clock::{Clock, SystemClock};
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Default freshness window: 5 minutes.
pub const DEFAULT_TTL_MS: i64 = 300_000;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: JobDetail,
    pub timestamp: DateTime<Utc>,
    pub version: u64,
}

impl CacheEntry {
    fn is_valid(&self, now: DateTime<Utc>, ttl: TimeDelta, current_version: u64) -> bool {
        now - self.timestamp < ttl && self.version == current_version
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total: usize,
    pub valid: usize,
    pub expired: usize,
}

#[derive(Debug)]
struct CacheState {
    entries: HashMap<JobId, CacheEntry>,
    current_version: u64,
}

pub struct JobCache<C: Clock = SystemClock> {
    state: Mutex<CacheState>,
    clock: C,
    default_ttl: TimeDelta,
}

impl JobCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for JobCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> JobCache<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                current_version: 1,
            }),
            clock,
            default_ttl: TimeDelta::milliseconds(DEFAULT_TTL_MS),
        }
    }

    /// Override the TTL used when callers pass `None`.
    pub fn with_default_ttl(mut self, ttl: TimeDelta) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn default_ttl(&self) -> TimeDelta {
        self.default_ttl
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ttl_or_default(&self, ttl: Option<TimeDelta>) -> TimeDelta {
        ttl.unwrap_or(self.default_ttl)
    }

    /// Snapshot of the cached job, if fresh. An expired or stale-version
    /// entry is evicted and reported as a miss.
    pub fn get(&self, job_id: &str, ttl: Option<TimeDelta>) -> Option<JobDetail> {
        let ttl = self.ttl_or_default(ttl);
        let now = self.clock.now();
        let mut state = self.lock();
        let current_version = state.current_version;

        match state.entries.get(job_id) {
            None => None,
            Some(e) if e.is_valid(now, ttl, current_version) => {
                debug!(target: "jobsheet::cache", job_id, "cache hit");
                Some(e.data.clone())
            }
            Some(_) => {
                state.entries.remove(job_id);
                debug!(target: "jobsheet::cache", job_id, "evicted stale entry");
                None
            }
        }
    }

    /// Store a copy of `data`, stamped with the current time and version.
    /// Later changes to the caller's object do not reach the cache.
    pub fn set(&self, job_id: &str, data: &JobDetail) {
        let timestamp = self.clock.now();
        let mut state = self.lock();
        let version = state.current_version;
        state.entries.insert(
            job_id.to_string(),
            CacheEntry {
                data: data.clone(),
                timestamp,
                version,
            },
        );
        debug!(target: "jobsheet::cache", job_id, version, "cache set");
    }

    pub fn remove(&self, job_id: &str) {
        self.lock().entries.remove(job_id);
    }

    /// Merge `partial` into a fresh entry and re-stamp it.
    ///
    /// Does nothing when there is no valid entry; the return value tells
    /// the caller whether the update landed. Check, merge and re-stamp
    /// happen under one lock.
    pub fn update(&self, job_id: &str, partial: &JobDetail) -> bool {
        let ttl = self.default_ttl;
        let now = self.clock.now();
        let mut state = self.lock();
        let current_version = state.current_version;

        let Some(entry) = state
            .entries
            .get_mut(job_id)
            .filter(|e| e.is_valid(now, ttl, current_version))
        else {
            debug!(target: "jobsheet::cache", job_id, "update dropped: not cached");
            return false;
        };

        for (key, value) in partial {
            entry.data.insert(key.clone(), value.clone());
        }
        entry.timestamp = now;
        entry.version = current_version;
        debug!(target: "jobsheet::cache", job_id, version = current_version, "cache updated");
        true
    }

    /// Bump the version tag. Entries are left in place and fail the
    /// version check on their next access.
    pub fn invalidate_all(&self) {
        let mut state = self.lock();
        state.current_version += 1;
        debug!(
            target: "jobsheet::cache",
            version = state.current_version,
            "cache invalidated"
        );
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    /// Validity check without evicting anything.
    pub fn is_cached(&self, job_id: &str, ttl: Option<TimeDelta>) -> bool {
        let ttl = self.ttl_or_default(ttl);
        let now = self.clock.now();
        let state = self.lock();
        state
            .entries
            .get(job_id)
            .is_some_and(|e| e.is_valid(now, ttl, state.current_version))
    }

    pub fn stats(&self, ttl: Option<TimeDelta>) -> CacheStats {
        let ttl = self.ttl_or_default(ttl);
        let now = self.clock.now();
        let state = self.lock();

        let total = state.entries.len();
        let valid = state
            .entries
            .values()
            .filter(|e| e.is_valid(now, ttl, state.current_version))
            .count();

        CacheStats {
            total,
            valid,
            expired: total - valid,
        }
    }

    pub fn current_version(&self) -> u64 {
        self.lock().current_version
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get-or-load. On a miss the loader runs and its result is cached.
    ///
    /// The lock is not held while the loader runs, so two concurrent misses
    /// for the same job both call their loader and the last `set` wins.
    /// Loader errors are returned unchanged and nothing is cached.
    pub async fn with_cache<F, Fut, E>(
        &self,
        job_id: &str,
        loader: F,
        ttl: Option<TimeDelta>,
    ) -> Result<JobDetail, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<JobDetail, E>>,
    {
        if let Some(hit) = self.get(job_id, ttl) {
            return Ok(hit);
        }

        debug!(target: "jobsheet::cache", job_id, "cache miss, loading");
        let loaded = loader().await?;
        self.set(job_id, &loaded);
        Ok(loaded)
    }
}
