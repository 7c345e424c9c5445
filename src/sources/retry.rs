use backon::{BackoffBuilder, Retryable};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use url::Url;

use crate::error::{IsRetryable, OnairError};

/// Upper bound on how much of an upstream error body ends up in the logs.
pub(crate) const UPSTREAM_BODY_PREVIEW_CHARS: usize = 256;

/// Linear backoff: the n-th retry sleeps `n * delay`.
///
/// `attempts` counts the first call too, so `attempts = 3` means at most two sleeps
/// (`delay`, then `2 * delay`).
#[derive(Debug, Clone, Copy)]
pub struct LinearBuilder {
    delay: Duration,
    attempts: usize,
}

impl LinearBuilder {
    pub fn new(delay: Duration, attempts: usize) -> Self {
        Self {
            delay,
            attempts: attempts.max(1),
        }
    }
}

impl BackoffBuilder for LinearBuilder {
    type Backoff = LinearBackoff;

    fn build(self) -> Self::Backoff {
        LinearBackoff {
            delay: self.delay,
            retries_left: self.attempts - 1,
            retry: 0,
        }
    }
}

#[derive(Debug)]
pub struct LinearBackoff {
    delay: Duration,
    retries_left: usize,
    retry: u32,
}

impl Iterator for LinearBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        if self.retries_left == 0 {
            return None;
        }
        self.retries_left -= 1;
        self.retry += 1;
        Some(self.delay * self.retry)
    }
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or the policy is exhausted.
pub(crate) async fn with_linear_backoff<T, F, Fut>(
    source: &'static str,
    policy: LinearBuilder,
    op: F,
) -> Result<T, OnairError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, OnairError>>,
{
    op.retry(policy)
        .when(|e: &OnairError| e.is_retryable())
        .notify(|err: &OnairError, dur: Duration| {
            tracing::warn!(
                source,
                error = %err,
                "[{source}] upstream call failed, retrying after {:?}",
                dur
            );
        })
        .await
}

/// GET `url` and decode a JSON body. Non-2xx statuses become `UpstreamStatus`.
pub(crate) async fn get_json<T>(
    source: &'static str,
    client: &reqwest::Client,
    url: &Url,
    headers: Option<&HeaderMap>,
) -> Result<T, OnairError>
where
    T: DeserializeOwned,
{
    let mut request = client.get(url.clone());
    if let Some(headers) = headers {
        request = request.headers(headers.clone());
    }

    let resp = request.send().await?;
    let status = resp.status();

    if !status.is_success() {
        let body_preview = match resp.bytes().await {
            Ok(bytes) => {
                let raw_body = String::from_utf8_lossy(&bytes);
                format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS)
            }
            Err(e) => format!("<failed to read body: {e}>"),
        };

        tracing::debug!(
            source,
            %status,
            url = %redacted(url),
            body = %body_preview,
            "[{source}] Upstream returned an error status"
        );

        return Err(OnairError::UpstreamStatus(status));
    }

    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// The URL without its query string, which may carry an API token.
fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_backoff_grows_by_base_delay() {
        let delays: Vec<Duration> = LinearBuilder::new(Duration::from_millis(1000), 3)
            .build()
            .collect();
        assert_eq!(
            delays,
            vec![Duration::from_millis(1000), Duration::from_millis(2000)]
        );
    }

    #[test]
    fn single_attempt_never_sleeps() {
        assert_eq!(
            LinearBuilder::new(Duration::from_secs(1), 1).build().count(),
            0
        );
        assert_eq!(
            LinearBuilder::new(Duration::from_secs(1), 0).build().count(),
            0
        );
    }

    #[test]
    fn redacted_drops_tokens() {
        let url = Url::parse("https://finnhub.io/api/v1/quote?symbol=AAPL&token=secret").unwrap();
        assert_eq!(redacted(&url), "https://finnhub.io/api/v1/quote");
    }
}
