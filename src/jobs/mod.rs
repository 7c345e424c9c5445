//! Scheduled cache refreshers.
//!
//! Each job fetches one upstream, transforms it, and replaces its cache table wholesale. When
//! the upstream stays down after retries the job either stores a static fallback or leaves
//! the previous cache in place. A job never propagates an error to the scheduler.

mod fear_greed;
mod news;
mod quotes;
mod repos;
mod scheduler;
mod weather;

pub use fear_greed::FearGreedJob;
pub use news::NewsJob;
pub use quotes::QuotesJob;
pub use repos::ReposJob;
pub use scheduler::RefreshScheduler;
pub use weather::WeatherJob;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

use crate::config::JobsConfig;
use crate::db::DbActorHandle;
use crate::error::OnairError;
use crate::sources::Sources;

/// What a single refresh ended up doing to its cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// Upstream answered; the cache now holds `rows` fresh rows.
    Fresh { rows: usize },
    /// Upstream exhausted; the static fallback (`rows` rows) was stored.
    Fallback { rows: usize },
    /// Upstream exhausted and there is no fallback; the previous cache is untouched.
    KeptStale,
    /// Storing failed; the previous cache is untouched.
    Failed { reason: String },
}

/// Everything a job needs to fetch and store.
#[derive(Clone)]
pub struct RefreshContext {
    pub db: DbActorHandle,
    pub sources: Sources,
}

#[async_trait]
pub trait RefreshJob: Send + Sync {
    fn name(&self) -> &'static str;

    fn interval(&self) -> Duration;

    async fn run(&self, ctx: &RefreshContext) -> RefreshOutcome;
}

/// The five widget refreshers with their configured intervals.
pub fn default_jobs(cfg: &JobsConfig) -> Vec<Arc<dyn RefreshJob>> {
    vec![
        Arc::new(QuotesJob::new(cfg.quotes())),
        Arc::new(ReposJob::new(cfg.repos())),
        Arc::new(WeatherJob::new(cfg.weather())),
        Arc::new(NewsJob::new(cfg.news())),
        Arc::new(FearGreedJob::new(cfg.fear_greed())),
    ]
}

/// Looks a job up by the name the admin refresh route uses.
pub fn find_job<'a>(jobs: &'a [Arc<dyn RefreshJob>], name: &str) -> Option<&'a Arc<dyn RefreshJob>> {
    jobs.iter().find(|job| job.name() == name)
}

fn stored(
    job: &'static str,
    result: Result<(), OnairError>,
    rows: usize,
    fallback: bool,
) -> RefreshOutcome {
    match result {
        Ok(()) if fallback => RefreshOutcome::Fallback { rows },
        Ok(()) => RefreshOutcome::Fresh { rows },
        Err(e) => {
            error!(job, error = %e, "Failed to store refreshed cache");
            RefreshOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

fn upstream_exhausted(job: &'static str, err: &OnairError, action: &str) {
    warn!(job, error = %err, "Upstream unavailable after retries, {action}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_jobs_have_distinct_names() {
        let jobs = default_jobs(&JobsConfig::default());
        let mut names: Vec<_> = jobs.iter().map(|j| j.name()).collect();
        names.sort_unstable();
        assert_eq!(names, ["fear-greed", "news", "quotes", "repos", "weather"]);
        assert!(find_job(&jobs, "weather").is_some());
        assert!(find_job(&jobs, "sports").is_none());
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let json = serde_json::to_value(RefreshOutcome::Fresh { rows: 7 }).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "fresh", "rows": 7 }));
        let json = serde_json::to_value(RefreshOutcome::KeptStale).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "kept_stale" }));
    }
}
