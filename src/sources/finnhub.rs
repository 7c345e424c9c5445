use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tracing::warn;

use super::Sources;
use super::retry::{get_json, with_linear_backoff};
use crate::config::WidgetsConfig;
use crate::db::{DbQuote, QuoteKind};
use crate::error::OnairError;

const SOURCE: &str = "finnhub";

/// Symbol lookups in flight at once; the rate limiter still paces them.
const QUOTE_CONCURRENCY: usize = 4;

/// Finnhub `/quote` payload. Unknown symbols come back as all zeros/nulls.
#[derive(Debug, Deserialize)]
struct FinnhubQuote {
    /// Current price.
    c: Option<f64>,
    /// Percent change since previous close.
    dp: Option<f64>,
}

/// Static market snapshot used when Finnhub cannot be reached.
const FALLBACK_QUOTES: &[(&str, f64, f64)] = &[
    ("NVDA", 421.33, 4.5),
    ("GOOGL", 138.21, 1.8),
    ("MSFT", 376.89, 3.1),
    ("AMZN", 155.72, 2.7),
    ("META", 284.91, -1.4),
    ("AAPL", 182.45, 2.3),
    ("TSLA", 248.33, -1.2),
    ("NFLX", 478.12, -2.1),
    ("AMD", 102.67, 3.3),
    ("INTC", 45.23, 1.5),
    ("CRM", 234.56, 2.8),
    ("ORCL", 98.45, 2.1),
    ("ADBE", 367.89, 1.9),
    ("UBER", 71.24, -1.7),
    ("SPOT", 158.34, 1.6),
    ("BINANCE:BTCUSDT", 67420.35, 4.2),
    ("BINANCE:ETHUSDT", 3245.78, 3.8),
    ("BINANCE:XRPUSDT", 0.52, 7.1),
    ("BINANCE:BNBUSDT", 35.67, 5.3),
    ("BINANCE:SOLUSDT", 160.67, 2.9),
    ("BINANCE:ADAUSDT", 0.45, 2.4),
    ("BINANCE:DOTUSDT", 6.82, -1.3),
    ("BINANCE:LINKUSDT", 14.27, 3.6),
    ("BINANCE:MATICUSDT", 0.71, -2.2),
    ("BINANCE:AVAXUSDT", 35.18, 4.1),
    ("BINANCE:UNIUSDT", 7.64, 1.2),
    ("BINANCE:LTCUSDT", 72.45, -0.8),
    ("BINANCE:ATOMUSDT", 9.36, 1.9),
];

fn is_highlight(widgets: &WidgetsConfig, symbol: &str, kind: QuoteKind) -> bool {
    let highlights = match kind {
        QuoteKind::Stock => &widgets.stock_highlights,
        QuoteKind::Crypto => &widgets.crypto_highlights,
    };
    highlights.iter().any(|s| s == symbol)
}

fn quote_row(
    widgets: &WidgetsConfig,
    symbol: &str,
    price: f64,
    change_pct: f64,
    updated: DateTime<Utc>,
) -> DbQuote {
    let kind = QuoteKind::of_symbol(symbol);
    DbQuote {
        symbol: symbol.to_string(),
        price,
        change_pct,
        kind,
        is_highlight: is_highlight(widgets, symbol, kind),
        updated,
    }
}

pub fn fallback_quotes(widgets: &WidgetsConfig, updated: DateTime<Utc>) -> Vec<DbQuote> {
    FALLBACK_QUOTES
        .iter()
        .map(|(symbol, price, change_pct)| quote_row(widgets, symbol, *price, *change_pct, updated))
        .collect()
}

async fn fetch_quote(sources: &Sources, api_key: &str, symbol: &str) -> Result<DbQuote, OnairError> {
    let mut url = sources.upstreams.finnhub_url.join("api/v1/quote")?;
    url.query_pairs_mut()
        .append_pair("symbol", symbol)
        .append_pair("token", api_key);

    let quote: FinnhubQuote = with_linear_backoff(SOURCE, sources.retry_policy(), || async {
        sources.finnhub_limiter.until_ready().await;
        get_json(SOURCE, &sources.client, &url, None).await
    })
    .await?;

    match quote {
        FinnhubQuote { c: Some(price), dp } if price > 0.0 => Ok(quote_row(
            &sources.widgets,
            symbol,
            price,
            dp.unwrap_or(0.0),
            Utc::now(),
        )),
        _ => Err(OnairError::UpstreamPayload(format!(
            "no quote for symbol {symbol}"
        ))),
    }
}

/// Quotes for every configured symbol. Symbols that fail are left out; it is an error only
/// when nothing could be fetched at all.
pub async fn fetch_quotes(sources: &Sources) -> Result<Vec<DbQuote>, OnairError> {
    let api_key: String = sources
        .widgets
        .finnhub_api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or(OnairError::MissingConfig("widgets.finnhub_api_key"))?
        .to_string();

    let symbols: Vec<String> = sources.widgets.all_symbols().map(str::to_string).collect();
    let requested = symbols.len();

    let api_key = &api_key;
    let quotes: Vec<DbQuote> = stream::iter(symbols)
        .map(|symbol| async move {
            let res = fetch_quote(sources, api_key, &symbol).await;
            (symbol, res)
        })
        .buffered(QUOTE_CONCURRENCY)
        .filter_map(|(symbol, res)| async move {
            match res {
                Ok(q) => Some(q),
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "[{SOURCE}] quote unavailable, skipping symbol");
                    None
                }
            }
        })
        .collect()
        .await;

    if quotes.is_empty() {
        return Err(OnairError::UpstreamPayload(format!(
            "none of {requested} symbols returned a quote"
        )));
    }
    Ok(quotes)
}
