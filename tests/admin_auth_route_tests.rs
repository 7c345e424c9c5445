use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use onair::config::Config;
use onair::server::router::{OnairState, onair_router};
use onair::sources::Sources;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

async fn build_app(tag: &str, admin_password: Option<&str>) -> (Router, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "onair-{tag}-{}-{nanos}.sqlite",
        std::process::id()
    ));
    let db = onair::db::spawn(&format!("sqlite:{}", path.display())).await;

    let mut cfg = Config::default();
    cfg.basic.admin_password = admin_password.map(str::to_string);
    let sources = Sources::new(&cfg).expect("sources");
    let state = OnairState::new(db, sources, &cfg);
    (onair_router(state, &cfg.basic), path)
}

fn auth_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/admin/auth")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn auth_endpoint_accepts_only_the_configured_password() {
    let (app, path) = build_app("auth-ok", Some("letmein")).await;

    // 1) correct password -> 200 {success:true}
    let resp = app
        .clone()
        .oneshot(auth_request(r#"{"password":"letmein"}"#))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({ "success": true }));

    // 2) wrong password -> 401
    let resp = app
        .clone()
        .oneshot(auth_request(r#"{"password":"letmein "}"#))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await, json!({ "error": "Invalid password" }));

    // 3) missing password field -> 401
    let resp = app
        .clone()
        .oneshot(auth_request("{}"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 4) malformed body -> 500 Authentication failed
    let resp = app
        .clone()
        .oneshot(auth_request("password=letmein"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(resp).await,
        json!({ "error": "Authentication failed" })
    );

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn auth_endpoint_without_configured_password_is_a_server_error() {
    let (app, path) = build_app("auth-unset", None).await;

    let resp = app
        .clone()
        .oneshot(auth_request(r#"{"password":""}"#))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(resp).await,
        json!({ "error": "Server configuration error" })
    );

    // Guarded routes answer the same way
    let resp = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/admin/sponsors")
                .header("x-admin-password", "anything")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn admin_mutations_require_the_password() {
    let (app, path) = build_app("auth-guard", Some("letmein")).await;

    // 1) no credentials -> 401
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/admin/stream/status")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"isLive":true}"#))
                .unwrap(),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 2) wrong bearer -> 401
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/admin/stream/status")
                .header("content-type", "application/json")
                .header("authorization", "Bearer nope")
                .body(Body::from(r#"{"isLive":true}"#))
                .unwrap(),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Public status is untouched
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/stream/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["isLive"], json!(false));

    // 3) correct bearer -> 200, and the stream is live
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/admin/stream/status")
                .header("content-type", "application/json")
                .header("authorization", "Bearer letmein")
                .body(Body::from(r#"{"isLive":true}"#))
                .unwrap(),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/stream/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request failed");
    let status = json_body(resp).await;
    assert_eq!(status["isLive"], json!(true));
    assert!(status["startedAt"].is_string());
    assert!(status["elapsedSecs"].is_number());

    // Unknown routes are 404, not 401
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let _ = std::fs::remove_file(&path);
}
