use super::Ack;
use crate::db::{DbStreamInfo, DbStreamStatus};
use crate::error::OnairError;
use crate::server::router::OnairState;
use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    #[serde(alias = "is_live")]
    pub is_live: bool,
}

/// PUT /api/admin/stream/status
pub async fn update_status(
    State(state): State<OnairState>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<DbStreamStatus>, OnairError> {
    let status = state.db.update_status(body.is_live).await?;
    info!(is_live = status.is_live, "Stream status set");
    Ok(Json(status))
}

#[derive(Debug, Default, Deserialize)]
pub struct InfoUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// PUT /api/admin/stream/info
pub async fn update_info(
    State(state): State<OnairState>,
    Json(body): Json<InfoUpdate>,
) -> Result<Json<DbStreamInfo>, OnairError> {
    Ok(Json(state.db.update_info(body.title, body.description).await?))
}

/// DELETE /api/admin/stream/info
pub async fn clear_info(State(state): State<OnairState>) -> Result<Json<Ack>, OnairError> {
    state.db.clear_info().await?;
    Ok(Json(Ack::OK))
}
