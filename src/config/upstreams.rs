use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Upstream HTTP settings shared by all refresh sources.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamsConfig {
    /// Optional upstream HTTP proxy. If set, used for the shared reqwest client.
    /// TOML: `upstreams.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// User agent sent to every upstream. GitHub rejects requests without one.
    /// TOML: `upstreams.user_agent`.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Total attempts per upstream call, including the first one.
    /// TOML: `upstreams.retry_max_times`. Default: `3`.
    #[serde(default = "default_retry_max_times")]
    pub retry_max_times: usize,

    /// Base delay for the linear backoff; attempt `n` sleeps `n * retry_delay_ms`.
    /// TOML: `upstreams.retry_delay_ms`. Default: `1000`.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Per-request timeout in seconds.
    /// TOML: `upstreams.timeout_secs`. Default: `30`.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TOML: `upstreams.github_url`. Default: `https://api.github.com`.
    #[serde(default = "default_github_url")]
    pub github_url: Url,

    /// TOML: `upstreams.hacker_news_url`. Default: `https://hacker-news.firebaseio.com`.
    #[serde(default = "default_hacker_news_url")]
    pub hacker_news_url: Url,

    /// TOML: `upstreams.finnhub_url`. Default: `https://finnhub.io`.
    #[serde(default = "default_finnhub_url")]
    pub finnhub_url: Url,

    /// TOML: `upstreams.open_meteo_url`. Default: `https://api.open-meteo.com`.
    #[serde(default = "default_open_meteo_url")]
    pub open_meteo_url: Url,

    /// TOML: `upstreams.fear_greed_url`. Default: `https://api.alternative.me`.
    #[serde(default = "default_fear_greed_url")]
    pub fear_greed_url: Url,
}

impl UpstreamsConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            user_agent: default_user_agent(),
            retry_max_times: default_retry_max_times(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_secs: default_timeout_secs(),
            github_url: default_github_url(),
            hacker_news_url: default_hacker_news_url(),
            finnhub_url: default_finnhub_url(),
            open_meteo_url: default_open_meteo_url(),
            fear_greed_url: default_fear_greed_url(),
        }
    }
}

fn default_user_agent() -> String {
    "program-live-app".to_string()
}

fn default_retry_max_times() -> usize {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

fn static_url(raw: &str) -> Url {
    Url::parse(raw).expect("default upstream url is valid")
}

fn default_github_url() -> Url {
    static_url("https://api.github.com")
}

fn default_hacker_news_url() -> Url {
    static_url("https://hacker-news.firebaseio.com")
}

fn default_finnhub_url() -> Url {
    static_url("https://finnhub.io")
}

fn default_open_meteo_url() -> Url {
    static_url("https://api.open-meteo.com")
}

fn default_fear_greed_url() -> Url {
    static_url("https://api.alternative.me")
}
