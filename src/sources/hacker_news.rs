use chrono::DateTime;
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tracing::debug;

use super::Sources;
use super::retry::{get_json, with_linear_backoff};
use crate::db::NewsStory;
use crate::error::OnairError;

const SOURCE: &str = "hacker_news";

/// Item lookups in flight at once.
const ITEM_CONCURRENCY: usize = 8;

#[derive(Debug, Deserialize)]
struct HnItem {
    /// `story`, `job`, `poll`, `comment` ...
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    url: Option<String>,
    time: Option<i64>,
    #[serde(default)]
    dead: bool,
    #[serde(default)]
    deleted: bool,
}

/// `1731628800 -> "Nov 15"` (UTC).
pub fn format_story_date(unix_secs: i64) -> String {
    DateTime::from_timestamp(unix_secs, 0)
        .map(|d| d.format("%b %-d").to_string())
        .unwrap_or_default()
}

impl HnItem {
    fn into_story(self) -> Option<NewsStory> {
        if self.dead || self.deleted || self.kind.as_deref() != Some("story") {
            return None;
        }
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        Some(NewsStory {
            title,
            url,
            date: self.time.map(format_story_date).unwrap_or_default(),
        })
    }
}

/// Current front-page stories that link somewhere, in rank order.
pub async fn fetch_top_stories(sources: &Sources) -> Result<Vec<NewsStory>, OnairError> {
    let base = &sources.upstreams.hacker_news_url;
    let top_url = base.join("v0/topstories.json")?;

    let ids: Vec<u64> = with_linear_backoff(SOURCE, sources.retry_policy(), || {
        get_json(SOURCE, &sources.client, &top_url, None)
    })
    .await?;

    let wanted = sources.widgets.news_story_count;
    let stories: Vec<NewsStory> = stream::iter(ids.into_iter().take(wanted))
        .map(|id| async move {
            let item_url = base.join(&format!("v0/item/{id}.json"))?;
            let item: Option<HnItem> = with_linear_backoff(SOURCE, sources.retry_policy(), || {
                get_json(SOURCE, &sources.client, &item_url, None)
            })
            .await?;
            Ok::<_, OnairError>((id, item))
        })
        .buffered(ITEM_CONCURRENCY)
        .filter_map(|res| async move {
            match res {
                Ok((_, Some(item))) => item.into_story(),
                Ok((id, None)) => {
                    debug!(id, "[{SOURCE}] item vanished, skipping");
                    None
                }
                Err(e) => {
                    debug!(error = %e, "[{SOURCE}] item fetch failed, skipping");
                    None
                }
            }
        })
        .collect()
        .await;

    if stories.is_empty() {
        return Err(OnairError::UpstreamPayload(
            "no linkable stories on the front page".to_string(),
        ));
    }
    Ok(stories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_dates_are_short_month_and_day() {
        assert_eq!(format_story_date(1_731_628_800), "Nov 15");
        assert_eq!(format_story_date(1_704_067_200), "Jan 1");
    }

    #[test]
    fn text_posts_and_dead_items_are_dropped() {
        let ask_hn = HnItem {
            kind: Some("story".to_string()),
            title: Some("Ask HN: anything".to_string()),
            url: None,
            time: Some(1_731_628_800),
            dead: false,
            deleted: false,
        };
        assert!(ask_hn.into_story().is_none());

        let dead = HnItem {
            kind: Some("story".to_string()),
            title: Some("gone".to_string()),
            url: Some("https://example.com".to_string()),
            time: None,
            dead: true,
            deleted: false,
        };
        assert!(dead.into_story().is_none());
    }

    #[test]
    fn only_stories_are_kept() {
        let item = |kind: &str| -> HnItem {
            serde_json::from_value(serde_json::json!({
                "type": kind,
                "title": "Acme is hiring",
                "url": "https://example.com/jobs",
                "time": 1_731_628_800
            }))
            .unwrap()
        };
        assert!(item("job").into_story().is_none());
        assert!(item("poll").into_story().is_none());
        assert_eq!(item("story").into_story().unwrap().date, "Nov 15");
    }
}
