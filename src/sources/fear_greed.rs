use axum::http::StatusCode;
use chrono::Utc;
use serde::Deserialize;

use super::Sources;
use super::retry::{get_json, with_linear_backoff};
use crate::db::FearGreedData;
use crate::error::OnairError;

const SOURCE: &str = "fear_greed";

#[derive(Debug, Deserialize)]
struct FngResponse {
    #[serde(default)]
    data: Vec<FearGreedData>,
    #[serde(default)]
    metadata: FngMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct FngMetadata {
    error: Option<String>,
}

/// Neutral reading shown when Alternative.me is unavailable.
pub fn fallback_fear_greed() -> FearGreedData {
    FearGreedData {
        value: "50".to_string(),
        value_classification: "Neutral".to_string(),
        timestamp: Utc::now().timestamp().to_string(),
        time_until_update: Some("1 hour".to_string()),
    }
}

fn latest_reading(response: FngResponse) -> Result<FearGreedData, OnairError> {
    if let Some(error) = response.metadata.error {
        return Err(OnairError::UpstreamPayload(format!("fear & greed api: {error}")));
    }
    response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| OnairError::UpstreamPayload("fear & greed api returned no data".to_string()))
}

/// Latest Fear & Greed reading.
///
/// A 429 is reported as-is and not retried: the quota is hourly, so the caller should
/// fall back right away.
pub async fn fetch_index(sources: &Sources) -> Result<FearGreedData, OnairError> {
    let url = sources.upstreams.fear_greed_url.join("fng/")?;

    with_linear_backoff(SOURCE, sources.retry_policy(), || async {
        let response: FngResponse = get_json(SOURCE, &sources.client, &url, None).await?;
        latest_reading(response)
    })
    .await
}

/// Whether a fetch error means "quota exhausted" rather than "broken".
pub fn is_quota_exceeded(err: &OnairError) -> bool {
    matches!(err, OnairError::UpstreamStatus(StatusCode::TOO_MANY_REQUESTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_entry_is_the_current_reading() {
        let response: FngResponse = serde_json::from_value(json!({
            "name": "Fear and Greed Index",
            "data": [
                {
                    "value": "72",
                    "value_classification": "Greed",
                    "timestamp": "1731628800",
                    "time_until_update": "3600"
                },
                { "value": "60", "value_classification": "Greed", "timestamp": "1731542400" }
            ],
            "metadata": { "error": null }
        }))
        .unwrap();

        let reading = latest_reading(response).unwrap();
        assert_eq!(reading.value, "72");
        assert_eq!(reading.time_until_update.as_deref(), Some("3600"));
    }

    #[test]
    fn metadata_error_is_an_upstream_error() {
        let response: FngResponse = serde_json::from_value(json!({
            "data": [],
            "metadata": { "error": "quota" }
        }))
        .unwrap();
        assert!(matches!(
            latest_reading(response),
            Err(OnairError::UpstreamPayload(_))
        ));
    }

    #[test]
    fn fallback_is_neutral() {
        let fallback = fallback_fear_greed();
        assert_eq!(fallback.value, "50");
        assert_eq!(fallback.value_classification, "Neutral");
    }
}
