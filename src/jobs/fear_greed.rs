use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use super::{RefreshContext, RefreshJob, RefreshOutcome, stored, upstream_exhausted};
use crate::sources::fear_greed;

pub struct FearGreedJob {
    interval: Duration,
}

impl FearGreedJob {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

#[async_trait]
impl RefreshJob for FearGreedJob {
    fn name(&self) -> &'static str {
        "fear-greed"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run(&self, ctx: &RefreshContext) -> RefreshOutcome {
        let (reading, fallback) = match fear_greed::fetch_index(&ctx.sources).await {
            Ok(reading) => (reading, false),
            Err(e) if fear_greed::is_quota_exceeded(&e) => {
                warn!(job = self.name(), "Fear & Greed quota exhausted, storing neutral reading");
                (fear_greed::fallback_fear_greed(), true)
            }
            Err(e) => {
                upstream_exhausted(self.name(), &e, "storing neutral reading");
                (fear_greed::fallback_fear_greed(), true)
            }
        };

        info!(
            job = self.name(),
            value = %reading.value,
            classification = %reading.value_classification,
            fallback,
            "Storing Fear & Greed reading"
        );
        stored(self.name(), ctx.db.replace_fear_greed(reading).await, 1, fallback)
    }
}
