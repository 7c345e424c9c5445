use crate::db::{
    DbQuote, DbRepo, DbSponsor, DbStreamInfo, NewsDigest, Placement, QuoteKind, WeatherReport,
};
use crate::error::OnairError;
use crate::server::router::OnairState;
use crate::server::routes::public::stream::StreamStatusView;
use crate::server::routes::public::widgets::RepoQuery;
use crate::widgets::{ClockReading, FearGreedView, read_clocks};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBoard {
    pub highlights: Vec<DbQuote>,
    pub ticker: Vec<DbQuote>,
}

/// Everything the landing page renders, in one round trip.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingSnapshot {
    pub status: StreamStatusView,
    pub info: DbStreamInfo,
    pub card_sponsors: Vec<DbSponsor>,
    pub banner_sponsors: Vec<DbSponsor>,
    pub stocks: QuoteBoard,
    pub crypto: QuoteBoard,
    pub repos: Vec<DbRepo>,
    pub weather: Option<WeatherReport>,
    pub news: Option<NewsDigest>,
    pub fear_greed: FearGreedView,
    pub timezones: Vec<ClockReading>,
}

/// GET /api/landing?mobile=
pub async fn snapshot(
    State(state): State<OnairState>,
    Query(query): Query<RepoQuery>,
) -> Result<Json<LandingSnapshot>, OnairError> {
    let db = &state.db;
    let (
        status,
        info,
        card_sponsors,
        banner_sponsors,
        stock_highlights,
        stock_ticker,
        crypto_highlights,
        crypto_ticker,
    ) = tokio::try_join!(
        db.current_status(),
        db.current_info(),
        db.list_active_sponsors(Some(Placement::Card)),
        db.list_active_sponsors(Some(Placement::Banner)),
        db.quotes(QuoteKind::Stock, true),
        db.quotes(QuoteKind::Stock, false),
        db.quotes(QuoteKind::Crypto, true),
        db.quotes(QuoteKind::Crypto, false),
    )?;
    let (repos, weather, news, fear_greed) = tokio::try_join!(
        db.repos(query.effective_limit()),
        db.weather(),
        db.news(),
        db.fear_greed(),
    )?;

    Ok(Json(LandingSnapshot {
        status: status.into(),
        info,
        card_sponsors,
        banner_sponsors,
        stocks: QuoteBoard {
            highlights: stock_highlights,
            ticker: stock_ticker,
        },
        crypto: QuoteBoard {
            highlights: crypto_highlights,
            ticker: crypto_ticker,
        },
        repos,
        weather,
        news,
        fear_greed: FearGreedView::new(fear_greed),
        timezones: read_clocks(&state.widgets.clocks, Utc::now()),
    }))
}
