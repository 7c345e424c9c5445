//! Third-party data sources feeding the widget caches.
//!
//! Every source shares one reqwest client and the same linear retry policy. A source only
//! fetches and transforms; storing the result (or a fallback) is the refresh job's business.

pub mod fear_greed;
pub mod finnhub;
pub mod github;
pub mod hacker_news;
pub mod open_meteo;

mod retry;

pub use retry::{LinearBackoff, LinearBuilder};

use crate::config::{Config, UpstreamsConfig, WidgetsConfig};
use crate::error::OnairError;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Shared state for all upstream fetches.
#[derive(Clone)]
pub struct Sources {
    pub(crate) client: reqwest::Client,
    pub(crate) upstreams: Arc<UpstreamsConfig>,
    pub(crate) widgets: Arc<WidgetsConfig>,
    pub(crate) finnhub_limiter: Arc<DefaultDirectRateLimiter>,
}

impl Sources {
    pub fn new(cfg: &Config) -> Result<Self, OnairError> {
        let upstreams = cfg.upstreams.clone();

        let mut builder = reqwest::Client::builder()
            .user_agent(upstreams.user_agent.as_str())
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(upstreams.timeout_secs.max(1)));

        if let Some(proxy_url) = upstreams.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        let client = builder.build()?;

        let rps = NonZeroU32::new(cfg.widgets.finnhub_rps).unwrap_or(NonZeroU32::MIN);
        let finnhub_limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));

        info!(
            proxy = %upstreams.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            retry_max_times = upstreams.retry_max_times,
            retry_delay_ms = upstreams.retry_delay_ms,
            finnhub_rps = rps.get(),
            finnhub_key = cfg.widgets.finnhub_api_key.is_some(),
            "Upstream sources configured"
        );

        Ok(Self {
            client,
            upstreams: Arc::new(upstreams),
            widgets: Arc::new(cfg.widgets.clone()),
            finnhub_limiter,
        })
    }

    pub(crate) fn retry_policy(&self) -> LinearBuilder {
        LinearBuilder::new(
            self.upstreams.retry_delay(),
            self.upstreams.retry_max_times,
        )
    }
}
