use crate::error::OnairError;
use crate::jobs::{RefreshOutcome, RefreshScheduler, find_job};
use crate::server::router::OnairState;
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RefreshReport {
    pub job: &'static str,
    #[serde(flatten)]
    pub outcome: RefreshOutcome,
}

/// POST /api/admin/refresh/{job}
///
/// Runs the job inline, so the response waits out any upstream retries.
pub async fn refresh_job(
    State(state): State<OnairState>,
    Path(name): Path<String>,
) -> Result<Json<RefreshReport>, OnairError> {
    let job = find_job(&state.jobs, &name)
        .ok_or_else(|| OnairError::NotFound(format!("Refresh job '{name}'")))?;

    let outcome = RefreshScheduler::run_once(job.as_ref(), &state.refresh_context()).await;
    Ok(Json(RefreshReport {
        job: job.name(),
        outcome,
    }))
}
