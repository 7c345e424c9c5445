use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use super::{RefreshContext, RefreshJob, RefreshOutcome, stored, upstream_exhausted};
use crate::sources::github;
use crate::utils::logging::with_pretty_json_debug;

pub struct ReposJob {
    interval: Duration,
}

impl ReposJob {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

#[async_trait]
impl RefreshJob for ReposJob {
    fn name(&self) -> &'static str {
        "repos"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run(&self, ctx: &RefreshContext) -> RefreshOutcome {
        let repos = match github::fetch_trending_repos(&ctx.sources).await {
            Ok(repos) => repos,
            Err(e) => {
                upstream_exhausted(self.name(), &e, "keeping previous repositories");
                return RefreshOutcome::KeptStale;
            }
        };

        with_pretty_json_debug(&repos, |pretty| {
            tracing::debug!(job = self.name(), "Trending repositories:\n{pretty}");
        });

        let rows = repos.len();
        info!(job = self.name(), rows, "Storing trending repositories");
        stored(self.name(), ctx.db.replace_repos(repos).await, rows, false)
    }
}
