use super::Ack;
use crate::db::{DbSponsor, SponsorCreate, SponsorPatch};
use crate::error::OnairError;
use crate::server::router::OnairState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

/// GET /api/admin/sponsors, inactive ones included.
pub async fn list_sponsors(
    State(state): State<OnairState>,
) -> Result<Json<Vec<DbSponsor>>, OnairError> {
    Ok(Json(state.db.list_all_sponsors().await?))
}

/// POST /api/admin/sponsors
pub async fn create_sponsor(
    State(state): State<OnairState>,
    Json(body): Json<SponsorCreate>,
) -> Result<(StatusCode, Json<serde_json::Value>), OnairError> {
    if body.name.trim().is_empty() || body.link_url.trim().is_empty() {
        return Err(OnairError::InvalidRequest(
            "Sponsor name and link are required".to_string(),
        ));
    }
    let id = state.db.create_sponsor(body).await?;
    info!(id, "Sponsor created");
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// PATCH /api/admin/sponsors/{id}
pub async fn update_sponsor(
    State(state): State<OnairState>,
    Path(id): Path<i64>,
    Json(patch): Json<SponsorPatch>,
) -> Result<Json<Ack>, OnairError> {
    state.db.update_sponsor(id, patch).await?;
    Ok(Json(Ack::OK))
}

/// DELETE /api/admin/sponsors/{id}
pub async fn delete_sponsor(
    State(state): State<OnairState>,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, OnairError> {
    state.db.delete_sponsor(id).await?;
    info!(id, "Sponsor deleted");
    Ok(Json(Ack::OK))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveToggle {
    #[serde(alias = "is_active")]
    pub is_active: bool,
}

/// PUT /api/admin/sponsors/{id}/active
pub async fn toggle_sponsor(
    State(state): State<OnairState>,
    Path(id): Path<i64>,
    Json(body): Json<ActiveToggle>,
) -> Result<Json<Ack>, OnairError> {
    state.db.toggle_sponsor(id, body.is_active).await?;
    Ok(Json(Ack::OK))
}

#[derive(Debug, Serialize)]
pub struct SeedResult {
    pub inserted: Vec<i64>,
}

/// POST /api/admin/sponsors/seed. Does nothing once any sponsor exists.
pub async fn seed_sponsors(State(state): State<OnairState>) -> Result<Json<SeedResult>, OnairError> {
    let inserted = state.db.seed_sample_sponsors().await?;
    info!(count = inserted.len(), "Sample sponsors seeded");
    Ok(Json(SeedResult { inserted }))
}
