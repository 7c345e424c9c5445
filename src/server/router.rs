use crate::config::{BasicConfig, Config, WidgetsConfig};
use crate::db::DbActorHandle;
use crate::jobs::{RefreshContext, RefreshJob, default_jobs};
use crate::server::guards::auth::{RequireAdmin, X_ADMIN_PASSWORD};
use crate::server::routes::{admin, public};
use crate::sources::Sources;

use axum::{
    Json, Router,
    extract::Request,
    http::{HeaderName, HeaderValue, Method, StatusCode, Version, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use base64::Engine as _;
use rand::RngCore;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct OnairState {
    pub db: DbActorHandle,
    pub sources: Sources,
    /// `None` when no (non-blank) admin password is configured.
    pub admin_password: Option<Arc<str>>,
    pub jobs: Arc<[Arc<dyn RefreshJob>]>,
    pub widgets: Arc<WidgetsConfig>,
}

impl OnairState {
    pub fn new(db: DbActorHandle, sources: Sources, cfg: &Config) -> Self {
        Self {
            db,
            sources,
            admin_password: cfg.basic.admin_secret().map(Arc::from),
            jobs: default_jobs(&cfg.jobs).into(),
            widgets: Arc::new(cfg.widgets.clone()),
        }
    }

    pub fn refresh_context(&self) -> RefreshContext {
        RefreshContext {
            db: self.db.clone(),
            sources: self.sources.clone(),
        }
    }
}

async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": { "code": "NOT_FOUND", "message": "No such route." } })),
    )
        .into_response()
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status().as_u16();
    let latency_ms = start.elapsed().as_millis();
    let path = uri.path();
    let protocol = format_http_version(version);
    let method = method.as_str();

    if resp.status().is_server_error() {
        error!("| {status:>3} | {request_id} | {method:^7} | {protocol:<8} | {path} | {latency_ms}ms | {user_agent}");
    } else if resp.status().is_client_error() {
        warn!("| {status:>3} | {request_id} | {method:^7} | {protocol:<8} | {path} | {latency_ms}ms | {user_agent}");
    } else {
        info!("| {status:>3} | {request_id} | {method:^7} | {protocol:<8} | {path} | {latency_ms}ms | {user_agent}");
    }

    resp
}

/// Configured origins, or any origin when the list is empty.
fn cors_layer(basic: &BasicConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, X_ADMIN_PASSWORD]);

    let origins: Vec<HeaderValue> = basic
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn onair_router(state: OnairState, basic: &BasicConfig) -> Router {
    let admin = admin::router().route_layer(middleware::from_extractor_with_state::<
        RequireAdmin,
        _,
    >(state.clone()));

    Router::new()
        .merge(public::router())
        .merge(admin::gate_router())
        .merge(admin)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(cors_layer(basic))
        .layer(middleware::from_fn(access_log))
}
