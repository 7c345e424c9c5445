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

const PASSWORD: &str = "letmein";

async fn build_app() -> (Router, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "onair-sponsor-routes-{}-{nanos}.sqlite",
        std::process::id()
    ));
    let db = onair::db::spawn(&format!("sqlite:{}", path.display())).await;

    let mut cfg = Config::default();
    cfg.basic.admin_password = Some(PASSWORD.to_string());
    let sources = Sources::new(&cfg).expect("sources");
    let state = OnairState::new(db, sources, &cfg);
    (onair_router(state, &cfg.basic), path)
}

fn admin(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-admin-password", PASSWORD);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn public(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn sponsor_admin_flow_is_reflected_publicly() {
    let (app, path) = build_app().await;

    // 1) create two cards and a banner
    let (status, created) = send(
        &app,
        admin(
            "POST",
            "/api/admin/sponsors",
            Some(json!({
                "placement": "card",
                "name": "Acme",
                "linkUrl": "https://acme.example",
                "displayOrder": 2,
                "isActive": true
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let acme = created["id"].as_i64().unwrap();

    let (status, created) = send(
        &app,
        admin(
            "POST",
            "/api/admin/sponsors",
            Some(json!({
                "placement": "card",
                "name": "Initech",
                "logoUrl": "/initech.svg",
                "linkUrl": "https://initech.example",
                "displayOrder": 1,
                "isActive": true,
                "paddingClass": "p-2"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let initech = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        admin(
            "POST",
            "/api/admin/sponsors",
            Some(json!({
                "placement": "banner",
                "name": "Hooli",
                "linkUrl": "https://hooli.example",
                "displayOrder": 1,
                "isActive": true
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // 2) public list honours placement and order
    let (status, cards) = send(&app, public("/api/sponsors?placement=card")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&cards), ["Initech", "Acme"]);
    assert_eq!(cards[0]["paddingClass"], json!("p-2"));

    let (_, everything) = send(&app, public("/api/sponsors")).await;
    assert_eq!(everything.as_array().unwrap().len(), 3);

    // 3) deactivate Initech
    let (status, ack) = send(
        &app,
        admin(
            "PUT",
            &format!("/api/admin/sponsors/{initech}/active"),
            Some(json!({ "isActive": false })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, json!({ "success": true }));

    let (_, cards) = send(&app, public("/api/sponsors?placement=card")).await;
    assert_eq!(names(&cards), ["Acme"]);
    let (_, all) = send(&app, admin("GET", "/api/admin/sponsors", None)).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    // 4) empty patch -> 400, unknown id -> 404
    let (status, err) = send(
        &app,
        admin("PATCH", &format!("/api/admin/sponsors/{acme}"), Some(json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["message"], json!("No updates provided"));

    let (status, _) = send(
        &app,
        admin(
            "PATCH",
            "/api/admin/sponsors/424242",
            Some(json!({ "name": "Ghost" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, admin("DELETE", "/api/admin/sponsors/424242", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 5) rename, then delete
    let (status, _) = send(
        &app,
        admin(
            "PATCH",
            &format!("/api/admin/sponsors/{acme}"),
            Some(json!({ "name": "Acme Corp" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, cards) = send(&app, public("/api/sponsors?placement=card")).await;
    assert_eq!(names(&cards), ["Acme Corp"]);

    let (status, _) = send(&app, admin("DELETE", &format!("/api/admin/sponsors/{acme}"), None)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, cards) = send(&app, public("/api/sponsors?placement=card")).await;
    assert!(cards.as_array().unwrap().is_empty());

    // 6) seeding is a no-op once sponsors exist
    let (status, seeded) = send(&app, admin("POST", "/api/admin/sponsors/seed", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seeded, json!({ "inserted": [] }));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn landing_snapshot_and_widgets_work_on_an_empty_database() {
    let (app, path) = build_app().await;

    let (status, _) = send(&app, admin("POST", "/api/admin/sponsors/seed", None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, landing) = send(&app, public("/api/landing?mobile=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(landing["status"]["isLive"], json!(false));
    assert_eq!(landing["cardSponsors"].as_array().unwrap().len(), 4);
    assert!(landing["bannerSponsors"].as_array().unwrap().is_empty());
    assert!(landing["weather"].is_null());
    assert!(landing["news"].is_null());
    assert_eq!(landing["fearGreed"]["displayValue"], json!("--"));
    assert_eq!(landing["fearGreed"]["band"]["label"], json!("----"));
    assert_eq!(landing["timezones"].as_array().unwrap().len(), 7);
    assert_eq!(landing["timezones"][0]["city"], json!("TOR"));

    let (status, clocks) = send(&app, public("/api/timezones")).await;
    assert_eq!(status, StatusCode::OK);
    let time = clocks[0]["time"].as_str().unwrap();
    assert_eq!(time.len(), 5);
    assert_eq!(&time[2..3], ":");

    let (status, repos) = send(&app, public("/api/repos?limit=10&mobile=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(repos.as_array().unwrap().is_empty());

    let (status, repos) = send(&app, public("/api/repos?limit=4294967295&mobile=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(repos.as_array().unwrap().is_empty());

    let (status, _) = send(&app, public("/api/repos?limit=0")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, public("/api/sponsors?placement=sidebar")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, public("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null(), "health is plain text");

    let _ = std::fs::remove_file(&path);
}
