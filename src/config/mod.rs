mod basic;
mod jobs;
mod upstreams;
mod widgets;

pub use basic::BasicConfig;
pub use jobs::JobsConfig;
pub use upstreams::UpstreamsConfig;
pub use widgets::{TimezoneClock, WidgetsConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Upstream HTTP settings shared by every refresh source.
    #[serde(default)]
    pub upstreams: UpstreamsConfig,

    /// What the widgets show: symbols, forecast location, list sizes, clocks.
    #[serde(default)]
    pub widgets: WidgetsConfig,

    /// Refresh job intervals.
    #[serde(default)]
    pub jobs: JobsConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "ONAIR_";

impl Config {
    /// Builds a Figment that merges defaults, a config TOML file and `ONAIR_*` env vars.
    ///
    /// Nested keys use a double underscore: `ONAIR_BASIC__ADMIN_PASSWORD`.
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration by merging defaults, `config.toml` if present, and the environment.
    ///
    /// An unset `basic.admin_password` is not an error here: the admin gate reports it as a
    /// server configuration error on every request instead.
    pub fn load() -> Self {
        Self::figment().extract().unwrap_or_else(|err| {
            panic!("failed to extract configuration (defaults + optional config.toml + env): {err}")
        })
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);
