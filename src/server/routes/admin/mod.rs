//! Admin surface: the password gate and the guarded mutations.

use crate::server::router::OnairState;
use axum::{
    Router,
    routing::{get, patch, post, put},
};
use serde::Serialize;

pub mod auth;
pub mod refresh;
pub mod sponsors;
pub mod stream;

#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub const OK: Ack = Ack { success: true };
}

/// Routes reachable without the admin password.
pub fn gate_router() -> Router<OnairState> {
    Router::new().route("/api/admin/auth", post(auth::admin_auth))
}

/// Routes behind `RequireAdmin`.
pub fn router() -> Router<OnairState> {
    Router::new()
        .route("/api/admin/stream/status", put(stream::update_status))
        .route(
            "/api/admin/stream/info",
            put(stream::update_info).delete(stream::clear_info),
        )
        .route(
            "/api/admin/sponsors",
            get(sponsors::list_sponsors).post(sponsors::create_sponsor),
        )
        .route("/api/admin/sponsors/seed", post(sponsors::seed_sponsors))
        .route(
            "/api/admin/sponsors/{id}",
            patch(sponsors::update_sponsor).delete(sponsors::delete_sponsor),
        )
        .route("/api/admin/sponsors/{id}/active", put(sponsors::toggle_sponsor))
        .route("/api/admin/refresh/{job}", post(refresh::refresh_job))
}
