use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Where a sponsor is rendered: inline cards next to the stream, or the footer banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Placement {
    Card,
    Banner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum QuoteKind {
    Stock,
    Crypto,
}

impl QuoteKind {
    /// Finnhub crypto symbols carry an exchange prefix (`BINANCE:BTCUSDT`).
    pub fn of_symbol(symbol: &str) -> Self {
        if symbol.contains(':') {
            QuoteKind::Crypto
        } else {
            QuoteKind::Stock
        }
    }
}

/// One row of the append-only stream status log. `id` is `None` for the implicit
/// "offline" status returned before anything was ever recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DbStreamStatus {
    pub id: Option<i64>,
    pub is_live: bool,
    pub timestamp: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
}

impl DbStreamStatus {
    pub fn offline(now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            is_live: false,
            timestamp: now,
            started_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DbStreamInfo {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl DbStreamInfo {
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: None,
            description: None,
            timestamp: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DbSponsor {
    pub id: i64,
    pub placement: Placement,
    pub name: String,
    pub logo_url: Option<String>,
    pub link_url: String,
    /// Shown in place of the logo when there is none.
    pub display_text: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
    pub padding_class: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DbQuote {
    pub symbol: String,
    pub price: f64,
    /// Percent, not a fraction: `2.3` means +2.3%.
    pub change_pct: f64,
    pub kind: QuoteKind,
    pub is_highlight: bool,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DbRepo {
    pub id: i64,
    pub title: String,
    /// Display form, e.g. `1.2k`.
    pub stars: String,
    pub star_count: i64,
    pub url: String,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct WeatherDay {
    /// `SUN`..`SAT`
    pub day: String,
    /// Daily max in celsius, rounded.
    pub temp: i64,
    /// Emoji for the WMO weather code.
    pub condition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub days: Vec<WeatherDay>,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct NewsStory {
    pub title: String,
    pub url: String,
    /// `Nov 15`
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsDigest {
    pub stories: Vec<NewsStory>,
    pub updated: DateTime<Utc>,
}

/// A Fear & Greed reading as Alternative.me reports it (all strings upstream).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct FearGreedData {
    pub value: String,
    pub value_classification: String,
    pub timestamp: String,
    #[serde(default)]
    pub time_until_update: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbFearGreed {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub data: FearGreedData,
    pub updated: DateTime<Utc>,
}
