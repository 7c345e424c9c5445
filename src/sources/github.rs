use chrono::{NaiveDate, TimeDelta, Utc};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;

use super::Sources;
use super::retry::{get_json, with_linear_backoff};
use crate::db::RepoCreate;
use crate::error::OnairError;

const SOURCE: &str = "github";

/// Names containing any of these (case-insensitive) are never shown.
const BANNED_WORDS: &[&str] = &["SHIT"];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<GithubRepo>,
}

#[derive(Debug, Deserialize)]
struct GithubRepo {
    name: String,
    html_url: String,
    stargazers_count: i64,
}

/// `1234 -> "1.2k"`, `999 -> "999"`.
pub fn format_star_count(stars: i64) -> String {
    if stars >= 1000 {
        format!("{:.1}k", stars as f64 / 1000.0)
    } else {
        stars.to_string()
    }
}

fn contains_banned_word(name: &str) -> bool {
    let upper = name.to_uppercase();
    BANNED_WORDS.iter().any(|w| upper.contains(w))
}

/// Young, moderately popular, live public repositories.
pub fn search_query(today: NaiveDate, window_days: i64) -> String {
    let since = today - TimeDelta::days(window_days);
    format!(
        "created:>{} stars:500..5000 archived:false is:public",
        since.format("%Y-%m-%d")
    )
}

/// Trending repositories from the GitHub search API, best first.
pub async fn fetch_trending_repos(sources: &Sources) -> Result<Vec<RepoCreate>, OnairError> {
    let widgets = &sources.widgets;
    let mut url = sources.upstreams.github_url.join("search/repositories")?;
    url.query_pairs_mut()
        .append_pair(
            "q",
            &search_query(Utc::now().date_naive(), widgets.repo_window_days),
        )
        .append_pair("sort", "stars")
        .append_pair("order", "desc")
        .append_pair("per_page", "100");

    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github.v3+json"),
    );

    let response: SearchResponse = with_linear_backoff(SOURCE, sources.retry_policy(), || {
        get_json(SOURCE, &sources.client, &url, Some(&headers))
    })
    .await?;

    Ok(response
        .items
        .into_iter()
        .filter(|repo| !contains_banned_word(&repo.name))
        .take(widgets.repo_count)
        .map(|repo| RepoCreate {
            stars: format_star_count(repo.stargazers_count),
            star_count: repo.stargazers_count,
            title: repo.name,
            url: repo.html_url,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_counts_abbreviate_from_one_thousand() {
        assert_eq!(format_star_count(0), "0");
        assert_eq!(format_star_count(999), "999");
        assert_eq!(format_star_count(1000), "1.0k");
        assert_eq!(format_star_count(4820), "4.8k");
    }

    #[test]
    fn banned_words_match_any_case() {
        assert!(contains_banned_word("shitty-app"));
        assert!(contains_banned_word("MyShitList"));
        assert!(!contains_banned_word("shell-tools"));
    }

    #[test]
    fn search_window_counts_back_from_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(
            search_query(today, 45),
            "created:>2025-01-24 stars:500..5000 archived:false is:public"
        );
    }
}
