use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use super::{RefreshContext, RefreshJob, RefreshOutcome, stored, upstream_exhausted};
use crate::sources::hacker_news;

pub struct NewsJob {
    interval: Duration,
}

impl NewsJob {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

#[async_trait]
impl RefreshJob for NewsJob {
    fn name(&self) -> &'static str {
        "news"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run(&self, ctx: &RefreshContext) -> RefreshOutcome {
        match hacker_news::fetch_top_stories(&ctx.sources).await {
            Ok(stories) => {
                let rows = stories.len();
                info!(job = self.name(), rows, "Storing Hacker News stories");
                stored(self.name(), ctx.db.replace_news(stories).await, rows, false)
            }
            Err(e) => {
                upstream_exhausted(self.name(), &e, "keeping previous stories");
                RefreshOutcome::KeptStale
            }
        }
    }
}
