//! Unauthenticated reads backing the landing page widgets.

use crate::server::router::OnairState;
use axum::{Router, routing::get};

pub mod landing;
pub mod sponsors;
pub mod stream;
pub mod widgets;

async fn health() -> &'static str {
    "ok"
}

pub fn router() -> Router<OnairState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/stream/status", get(stream::current_status))
        .route("/api/stream/status/history", get(stream::status_history))
        .route("/api/stream/info", get(stream::current_info))
        .route("/api/sponsors", get(sponsors::active_sponsors))
        .route("/api/quotes/highlights", get(widgets::quote_highlights))
        .route("/api/quotes/ticker", get(widgets::quote_ticker))
        .route("/api/repos", get(widgets::repos))
        .route("/api/weather", get(widgets::weather))
        .route("/api/news", get(widgets::news))
        .route("/api/fear-greed", get(widgets::fear_greed))
        .route("/api/timezones", get(widgets::timezones))
        .route("/api/landing", get(landing::snapshot))
}
