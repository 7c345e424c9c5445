use crate::server::guards::auth::password_matches;
use crate::server::router::OnairState;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{error, warn};

fn failure(status: StatusCode, message: &'static str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// POST /api/admin/auth
///
/// Body `{"password": "..."}`. The body is read raw so that a malformed one answers like any
/// other internal failure instead of axum's JSON rejection.
pub async fn admin_auth(State(state): State<OnairState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(Value::Null) | Err(_) => {
            error!("Admin auth: request body is not a JSON object");
            return failure(StatusCode::INTERNAL_SERVER_ERROR, "Authentication failed");
        }
        Ok(payload) => payload,
    };

    let Some(expected) = state.admin_password.as_deref() else {
        error!("Admin auth: no admin password configured");
        return failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server configuration error",
        );
    };

    let given = payload.get("password").and_then(Value::as_str);
    match given {
        Some(given) if password_matches(expected, given) => {
            (StatusCode::OK, Json(json!({ "success": true }))).into_response()
        }
        _ => {
            warn!("Admin auth: invalid password");
            failure(StatusCode::UNAUTHORIZED, "Invalid password")
        }
    }
}
