use crate::db::{DbQuote, DbRepo, NewsDigest, QuoteKind, WeatherReport};
use crate::error::OnairError;
use crate::server::router::OnairState;
use crate::widgets::{ClockReading, FearGreedView, read_clocks, repo_display_limit};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::Deserialize;

pub const DEFAULT_REPO_LIMIT: u32 = 40;

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub kind: Option<QuoteKind>,
}

/// GET /api/quotes/highlights?kind=stock|crypto
pub async fn quote_highlights(
    State(state): State<OnairState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<Vec<DbQuote>>, OnairError> {
    let kind = query.kind.unwrap_or(QuoteKind::Stock);
    Ok(Json(state.db.quotes(kind, true).await?))
}

/// GET /api/quotes/ticker?kind=stock|crypto
pub async fn quote_ticker(
    State(state): State<OnairState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<Vec<DbQuote>>, OnairError> {
    let kind = query.kind.unwrap_or(QuoteKind::Stock);
    Ok(Json(state.db.quotes(kind, false).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct RepoQuery {
    pub limit: Option<u32>,
    #[serde(default)]
    pub mobile: bool,
}

impl RepoQuery {
    pub fn effective_limit(&self) -> u32 {
        let limit = self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_REPO_LIMIT);
        repo_display_limit(limit, self.mobile)
    }
}

/// GET /api/repos?limit=&mobile=
pub async fn repos(
    State(state): State<OnairState>,
    Query(query): Query<RepoQuery>,
) -> Result<Json<Vec<DbRepo>>, OnairError> {
    Ok(Json(state.db.repos(query.effective_limit()).await?))
}

/// GET /api/weather. `null` until the first refresh.
pub async fn weather(
    State(state): State<OnairState>,
) -> Result<Json<Option<WeatherReport>>, OnairError> {
    Ok(Json(state.db.weather().await?))
}

/// GET /api/news. `null` until the first refresh.
pub async fn news(State(state): State<OnairState>) -> Result<Json<Option<NewsDigest>>, OnairError> {
    Ok(Json(state.db.news().await?))
}

/// GET /api/fear-greed
pub async fn fear_greed(State(state): State<OnairState>) -> Result<Json<FearGreedView>, OnairError> {
    let reading = state.db.fear_greed().await?;
    Ok(Json(FearGreedView::new(reading)))
}

/// GET /api/timezones
pub async fn timezones(State(state): State<OnairState>) -> Json<Vec<ClockReading>> {
    Json(read_clocks(&state.widgets.clocks, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_limit_defaults_and_mobile() {
        assert_eq!(RepoQuery::default().effective_limit(), 40);
        let mobile = RepoQuery {
            limit: None,
            mobile: true,
        };
        assert_eq!(mobile.effective_limit(), 26);
        let custom = RepoQuery {
            limit: Some(10),
            mobile: false,
        };
        assert_eq!(custom.effective_limit(), 10);
        let zero = RepoQuery {
            limit: Some(0),
            mobile: false,
        };
        assert_eq!(zero.effective_limit(), 40);
    }
}
