use serde::{Deserialize, Serialize};

/// Widget content configuration: which symbols, where the forecast is for, how much to keep.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WidgetsConfig {
    /// Finnhub API token. Without it the quotes job always stores its fallback.
    /// TOML: `widgets.finnhub_api_key`. Env: `ONAIR_WIDGETS__FINNHUB_API_KEY`.
    #[serde(default)]
    pub finnhub_api_key: Option<String>,

    /// Finnhub requests per second; the free tier allows 60 per minute.
    /// TOML: `widgets.finnhub_rps`. Default: `1`.
    #[serde(default = "default_finnhub_rps")]
    pub finnhub_rps: u32,

    /// Stocks always shown individually.
    #[serde(default = "default_stock_highlights")]
    pub stock_highlights: Vec<String>,

    /// Stocks shown on the scrolling ticker tape.
    #[serde(default = "default_stock_tickers")]
    pub stock_tickers: Vec<String>,

    /// Crypto pairs always shown individually (`EXCHANGE:PAIR`).
    #[serde(default = "default_crypto_highlights")]
    pub crypto_highlights: Vec<String>,

    /// Crypto pairs shown on the ticker tape.
    #[serde(default = "default_crypto_tickers")]
    pub crypto_tickers: Vec<String>,

    /// Forecast location. Default: Toronto.
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// IANA zone passed to Open-Meteo so days line up with the location.
    #[serde(default = "default_weather_timezone")]
    pub weather_timezone: String,

    /// Hacker News stories kept per refresh.
    #[serde(default = "default_news_story_count")]
    pub news_story_count: usize,

    /// Repositories kept per refresh.
    #[serde(default = "default_repo_count")]
    pub repo_count: usize,

    /// Only repositories created within this many days are considered.
    #[serde(default = "default_repo_window_days")]
    pub repo_window_days: i64,

    /// World clocks, first entry is the home zone.
    #[serde(default = "default_clocks")]
    pub clocks: Vec<TimezoneClock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimezoneClock {
    pub city: String,
    pub tz: String,
    pub code: String,
}

impl WidgetsConfig {
    /// Every symbol the quotes job fetches, highlights first.
    pub fn all_symbols(&self) -> impl Iterator<Item = &str> {
        self.stock_highlights
            .iter()
            .chain(&self.stock_tickers)
            .chain(&self.crypto_highlights)
            .chain(&self.crypto_tickers)
            .map(String::as_str)
    }
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            finnhub_api_key: None,
            finnhub_rps: default_finnhub_rps(),
            stock_highlights: default_stock_highlights(),
            stock_tickers: default_stock_tickers(),
            crypto_highlights: default_crypto_highlights(),
            crypto_tickers: default_crypto_tickers(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            weather_timezone: default_weather_timezone(),
            news_story_count: default_news_story_count(),
            repo_count: default_repo_count(),
            repo_window_days: default_repo_window_days(),
            clocks: default_clocks(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_finnhub_rps() -> u32 {
    1
}

fn default_stock_highlights() -> Vec<String> {
    strings(&["NVDA", "GOOGL", "MSFT", "AMZN", "META"])
}

fn default_stock_tickers() -> Vec<String> {
    strings(&[
        "AAPL", "TSLA", "NFLX", "AMD", "INTC", "CRM", "ORCL", "ADBE", "UBER", "SPOT",
    ])
}

fn default_crypto_highlights() -> Vec<String> {
    strings(&[
        "BINANCE:BTCUSDT",
        "BINANCE:ETHUSDT",
        "BINANCE:XRPUSDT",
        "BINANCE:BNBUSDT",
        "BINANCE:SOLUSDT",
    ])
}

fn default_crypto_tickers() -> Vec<String> {
    strings(&[
        "BINANCE:ADAUSDT",
        "BINANCE:DOTUSDT",
        "BINANCE:LINKUSDT",
        "BINANCE:MATICUSDT",
        "BINANCE:AVAXUSDT",
        "BINANCE:UNIUSDT",
        "BINANCE:LTCUSDT",
        "BINANCE:ATOMUSDT",
    ])
}

fn default_latitude() -> f64 {
    43.6532
}

fn default_longitude() -> f64 {
    -79.3832
}

fn default_weather_timezone() -> String {
    "America/Toronto".to_string()
}

fn default_news_story_count() -> usize {
    60
}

fn default_repo_count() -> usize {
    50
}

fn default_repo_window_days() -> i64 {
    45
}

fn default_clocks() -> Vec<TimezoneClock> {
    [
        ("TOR", "America/Toronto", "EST"),
        ("LDN", "Europe/London", "GMT"),
        ("PAR", "Europe/Paris", "CET"),
        ("FRA", "Europe/Berlin", "CET"),
        ("HKG", "Asia/Hong_Kong", "HKT"),
        ("TOK", "Asia/Tokyo", "JST"),
        ("SYD", "Australia/Sydney", "AEDT"),
    ]
    .into_iter()
    .map(|(city, tz, code)| TimezoneClock {
        city: city.to_string(),
        tz: tz.to_string(),
        code: code.to_string(),
    })
    .collect()
}
