use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Refresh job schedule. Intervals are in seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobsConfig {
    /// Run every job once at startup instead of waiting a full interval.
    /// TOML: `jobs.run_on_start`. Default: `true`.
    #[serde(default = "default_run_on_start")]
    pub run_on_start: bool,

    #[serde(default = "default_quotes_secs")]
    pub quotes_secs: u64,

    #[serde(default = "default_repos_secs")]
    pub repos_secs: u64,

    #[serde(default = "default_weather_secs")]
    pub weather_secs: u64,

    #[serde(default = "default_news_secs")]
    pub news_secs: u64,

    #[serde(default = "default_fear_greed_secs")]
    pub fear_greed_secs: u64,
}

impl JobsConfig {
    pub fn quotes(&self) -> Duration {
        Duration::from_secs(self.quotes_secs.max(1))
    }

    pub fn repos(&self) -> Duration {
        Duration::from_secs(self.repos_secs.max(1))
    }

    pub fn weather(&self) -> Duration {
        Duration::from_secs(self.weather_secs.max(1))
    }

    pub fn news(&self) -> Duration {
        Duration::from_secs(self.news_secs.max(1))
    }

    pub fn fear_greed(&self) -> Duration {
        Duration::from_secs(self.fear_greed_secs.max(1))
    }
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            run_on_start: default_run_on_start(),
            quotes_secs: default_quotes_secs(),
            repos_secs: default_repos_secs(),
            weather_secs: default_weather_secs(),
            news_secs: default_news_secs(),
            fear_greed_secs: default_fear_greed_secs(),
        }
    }
}

fn default_run_on_start() -> bool {
    true
}

fn default_quotes_secs() -> u64 {
    10 * 60
}

fn default_repos_secs() -> u64 {
    15 * 60
}

fn default_weather_secs() -> u64 {
    10 * 60
}

fn default_news_secs() -> u64 {
    10 * 60
}

fn default_fear_greed_secs() -> u64 {
    60 * 60
}
