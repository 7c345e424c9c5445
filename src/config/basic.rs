use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr};

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `8188`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Database URL for SQLite.
    /// TOML: `basic.database_url`. Default: `sqlite://onair.db`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Shared secret for the admin panel. Unset or blank means the admin gate answers 500.
    /// A whitespace-only value counts as blank.
    /// TOML: `basic.admin_password`. Env: `ONAIR_BASIC__ADMIN_PASSWORD`.
    #[serde(default, deserialize_with = "deserialize_secret_lax")]
    pub admin_password: Option<String>,

    /// Origins allowed by CORS. Empty allows any origin.
    /// TOML: `basic.cors_origins`.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl BasicConfig {
    /// The admin secret, if one is configured and not empty or whitespace-only.
    pub fn admin_secret(&self) -> Option<&str> {
        self.admin_password
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            database_url: default_database_url(),
            loglevel: default_loglevel(),
            admin_password: None,
            cors_origins: Vec::new(),
        }
    }
}

fn deserialize_secret_lax<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;

    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(serde::de::Error::custom(
            "expected a string or a number for basic.admin_password",
        )),
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_listen_port() -> u16 {
    8188
}

fn default_database_url() -> String {
    "sqlite://onair.db".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_admin_password_counts_as_unconfigured() {
        let mut cfg = BasicConfig::default();
        assert_eq!(cfg.admin_secret(), None);

        cfg.admin_password = Some("   ".to_string());
        assert_eq!(cfg.admin_secret(), None);

        cfg.admin_password = Some("hunter2".to_string());
        assert_eq!(cfg.admin_secret(), Some("hunter2"));
    }

    #[test]
    fn numeric_admin_password_is_accepted() {
        let cfg: BasicConfig =
            serde_json::from_value(serde_json::json!({ "admin_password": 123456 }))
                .expect("numeric password deserializes");
        assert_eq!(cfg.admin_secret(), Some("123456"));
    }
}
