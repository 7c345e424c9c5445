use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error as ThisError;

use super::IsRetryable;

#[derive(Debug, ThisError)]
pub enum OnairError {
    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("Upstream payload error: {0}")]
    UpstreamPayload(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl IntoResponse for OnairError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            OnairError::DatabaseError(_)
            | OnairError::RactorError(_)
            | OnairError::UnexpectedError(_)
            | OnairError::MissingConfig(_) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                };
                (status, body)
            }

            OnairError::InvalidRequest(message) => {
                let status = StatusCode::BAD_REQUEST;
                let body = ApiErrorObject {
                    code: "INVALID_REQUEST".to_string(),
                    message,
                    details: None,
                };
                (status, body)
            }

            OnairError::NotFound(what) => {
                let status = StatusCode::NOT_FOUND;
                let body = ApiErrorObject {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{what} not found."),
                    details: None,
                };
                (status, body)
            }

            OnairError::JsonError(_) | OnairError::UpstreamPayload(_) => {
                let status = StatusCode::BAD_GATEWAY;
                let body = ApiErrorObject {
                    code: "BAD_UPSTREAM_PAYLOAD".to_string(),
                    message: "Failed to parse upstream response.".to_string(),
                    details: None,
                };
                (status, body)
            }

            OnairError::ReqwestError(_) | OnairError::UrlError(_) => {
                let status = StatusCode::BAD_GATEWAY;
                let body = ApiErrorObject {
                    code: "UPSTREAM_ERROR".to_string(),
                    message: "Upstream service error.".to_string(),
                    details: None,
                };
                (status, body)
            }

            OnairError::UpstreamStatus(code) => {
                let (err_code, msg) = match code {
                    StatusCode::TOO_MANY_REQUESTS => {
                        ("RATE_LIMIT", "Upstream rate limit exceeded.")
                    }
                    StatusCode::UNAUTHORIZED => ("UNAUTHORIZED", "Upstream authentication failed."),
                    StatusCode::FORBIDDEN => ("FORBIDDEN", "Upstream permission denied."),
                    _ => ("UPSTREAM_ERROR", "An upstream error occurred."),
                };
                (
                    StatusCode::BAD_GATEWAY,
                    ApiErrorObject {
                        code: err_code.to_string(),
                        message: msg.to_string(),
                        details: Some(Value::from(code.as_u16())),
                    },
                )
            }
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}

impl IsRetryable for OnairError {
    fn is_retryable(&self) -> bool {
        match self {
            OnairError::ReqwestError(e) => !e.is_builder(),
            OnairError::UpstreamStatus(status) => {
                status.is_server_error() || *status == StatusCode::REQUEST_TIMEOUT
            }
            OnairError::JsonError(_) | OnairError::UpstreamPayload(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_retry_client_errors_do_not() {
        assert!(OnairError::UpstreamStatus(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(OnairError::UpstreamStatus(StatusCode::REQUEST_TIMEOUT).is_retryable());
        assert!(!OnairError::UpstreamStatus(StatusCode::NOT_FOUND).is_retryable());
        assert!(!OnairError::UpstreamStatus(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(!OnairError::MissingConfig("widgets.finnhub_api_key").is_retryable());
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = OnairError::NotFound("Sponsor 7".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = OnairError::InvalidRequest("No updates provided".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
