use crate::db::{DbStreamInfo, DbStreamStatus};
use crate::error::OnairError;
use crate::server::router::OnairState;
use crate::widgets::stream_elapsed_secs;
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

const DEFAULT_HISTORY_LIMIT: u32 = 10;
const MAX_HISTORY_LIMIT: u32 = 100;

/// Current status plus how long the stream has been live.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStatusView {
    #[serde(flatten)]
    pub status: DbStreamStatus,
    pub elapsed_secs: Option<i64>,
}

impl From<DbStreamStatus> for StreamStatusView {
    fn from(status: DbStreamStatus) -> Self {
        let elapsed_secs = stream_elapsed_secs(&status, Utc::now());
        Self {
            status,
            elapsed_secs,
        }
    }
}

/// GET /api/stream/status
pub async fn current_status(
    State(state): State<OnairState>,
) -> Result<Json<StreamStatusView>, OnairError> {
    let status = state.db.current_status().await?;
    Ok(Json(status.into()))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

/// GET /api/stream/status/history?limit=
pub async fn status_history(
    State(state): State<OnairState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<DbStreamStatus>>, OnairError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    Ok(Json(state.db.status_history(limit).await?))
}

/// GET /api/stream/info
pub async fn current_info(State(state): State<OnairState>) -> Result<Json<DbStreamInfo>, OnairError> {
    Ok(Json(state.db.current_info().await?))
}
