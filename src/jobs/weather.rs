use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use super::{RefreshContext, RefreshJob, RefreshOutcome, stored, upstream_exhausted};
use crate::sources::open_meteo;
use crate::utils::logging::with_pretty_json_debug;

pub struct WeatherJob {
    interval: Duration,
}

impl WeatherJob {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

#[async_trait]
impl RefreshJob for WeatherJob {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run(&self, ctx: &RefreshContext) -> RefreshOutcome {
        let (days, fallback) = match open_meteo::fetch_forecast(&ctx.sources).await {
            Ok(days) => (days, false),
            Err(e) => {
                upstream_exhausted(self.name(), &e, "storing fallback forecast");
                (open_meteo::fallback_weather(), true)
            }
        };

        with_pretty_json_debug(&days, |pretty| {
            tracing::debug!(job = self.name(), "Forecast:\n{pretty}");
        });

        let rows = days.len();
        info!(job = self.name(), rows, fallback, "Storing forecast");
        stored(self.name(), ctx.db.replace_weather(days).await, rows, fallback)
    }
}
