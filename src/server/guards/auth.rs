use crate::server::router::OnairState;
use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, HeaderName, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use serde_json::json;
use subtle::ConstantTimeEq;

pub const X_ADMIN_PASSWORD: HeaderName = HeaderName::from_static("x-admin-password");

fn extract_password(headers: &HeaderMap) -> Option<String> {
    if let Some(pw) = headers.get(X_ADMIN_PASSWORD).and_then(|v| v.to_str().ok()) {
        return Some(pw.to_string());
    }
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

/// Constant-time comparison of a submitted password against the configured one.
pub fn password_matches(expected: &str, given: &str) -> bool {
    given.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Admin mutations require the admin password as a bearer token or `x-admin-password`.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<OnairState> for RequireAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &OnairState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_password.as_deref() else {
            tracing::error!("Admin route hit but no admin password is configured");
            return Err(AuthError::Unconfigured);
        };

        match extract_password(&parts.headers) {
            Some(given) if password_matches(expected, &given) => Ok(RequireAdmin),
            Some(_) => Err(AuthError::InvalidPassword),
            None => Err(AuthError::MissingPassword),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingPassword,
    InvalidPassword,
    Unconfigured,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingPassword => (StatusCode::UNAUTHORIZED, "Missing admin password"),
            AuthError::InvalidPassword => (StatusCode::UNAUTHORIZED, "Invalid password"),
            AuthError::Unconfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error",
            ),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
