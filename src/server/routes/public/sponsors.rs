use crate::db::{DbSponsor, Placement};
use crate::error::OnairError;
use crate::server::router::OnairState;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SponsorQuery {
    pub placement: Option<Placement>,
}

/// GET /api/sponsors?placement=card|banner
pub async fn active_sponsors(
    State(state): State<OnairState>,
    Query(query): Query<SponsorQuery>,
) -> Result<Json<Vec<DbSponsor>>, OnairError> {
    Ok(Json(state.db.list_active_sponsors(query.placement).await?))
}
