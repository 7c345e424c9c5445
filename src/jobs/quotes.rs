use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::info;

use super::{RefreshContext, RefreshJob, RefreshOutcome, stored, upstream_exhausted};
use crate::sources::finnhub;

pub struct QuotesJob {
    interval: Duration,
}

impl QuotesJob {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

#[async_trait]
impl RefreshJob for QuotesJob {
    fn name(&self) -> &'static str {
        "quotes"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run(&self, ctx: &RefreshContext) -> RefreshOutcome {
        let (quotes, fallback) = match finnhub::fetch_quotes(&ctx.sources).await {
            Ok(quotes) => (quotes, false),
            Err(e) => {
                upstream_exhausted(self.name(), &e, "storing fallback quotes");
                (finnhub::fallback_quotes(&ctx.sources.widgets, Utc::now()), true)
            }
        };

        let rows = quotes.len();
        info!(job = self.name(), rows, fallback, "Storing quotes");
        stored(self.name(), ctx.db.replace_quotes(quotes).await, rows, fallback)
    }
}
