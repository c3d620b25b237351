//! Router tests for the frontend service
//!
//! Each test serves a real backend on an ephemeral local port and drives the
//! frontend router against it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use reqwest::Url;
use tokio::net::TcpListener;
use tower::ServiceExt;

use baby_names::{
    frontend::{create_frontend_router, BackendClient, LookupOutcome},
    handlers::create_router,
    ApiError, NameRecord, NameRepository,
};

struct FixedRepository {
    records: Vec<NameRecord>,
}

#[async_trait]
impl NameRepository for FixedRepository {
    async fn lookup_by_name(&self, name: &str) -> Result<Option<NameRecord>, ApiError> {
        let wanted = name.to_lowercase();
        Ok(self
            .records
            .iter()
            .find(|r| r.name.to_lowercase() == wanted)
            .cloned())
    }

    async fn list_top(&self, limit: i64) -> Result<Vec<NameRecord>, ApiError> {
        Ok(self.records.iter().take(limit as usize).cloned().collect())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

fn record(name: &str, rank: i32, count: i32) -> NameRecord {
    NameRecord {
        name: name.to_string(),
        rank,
        count,
        year: 2024,
    }
}

async fn spawn_server(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_backend() -> SocketAddr {
    let repo = Arc::new(FixedRepository {
        records: vec![record("Noah", 1, 4382), record("Muhammad", 2, 4258)],
    });
    spawn_server(create_router(repo)).await
}

/// An address nothing is listening on
async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

fn client_for(addr: SocketAddr) -> BackendClient {
    let url = Url::parse(&format!("http://{}", addr)).unwrap();
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .no_proxy()
        .build()
        .unwrap();
    BackendClient::with_http_client(http, url)
}

async fn get_page(client: BackendClient, uri: &str) -> (StatusCode, String) {
    let app = create_frontend_router(client);

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_home_page_loads() {
    let (status, html) = get_page(client_for(closed_port().await), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Baby Names Rank Finder"));
    assert!(html.contains("<form"));
}

#[tokio::test]
async fn test_empty_search_shows_form_only() {
    let (status, html) = get_page(client_for(closed_port().await), "/?name=%20%20").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Baby Names Rank Finder"));
    assert!(!html.contains("class=\"error\""));
    assert!(!html.contains("class=\"result\""));
}

#[tokio::test]
async fn test_health_does_not_contact_backend() {
    let app = create_frontend_router(client_for(closed_port().await));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_search_round_trip() {
    let backend = spawn_backend().await;
    let (status, html) = get_page(client_for(backend), "/?name=muhammad").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Muhammad"));
    assert!(html.contains("#2"));
    assert!(html.contains("2024"));
    assert!(html.contains("4258"));
}

#[tokio::test]
async fn test_repeated_name_uses_first_value() {
    let backend = spawn_backend().await;
    let (status, html) = get_page(client_for(backend), "/?name=Noah&name=Muhammad").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h2>Noah</h2>"));
    assert!(html.contains("#1"));
    assert!(!html.contains("Muhammad"));
}

#[tokio::test]
async fn test_search_not_found() {
    let backend = spawn_backend().await;
    let (status, html) = get_page(client_for(backend), "/?name=ZzZzNonExistent").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("not found in the 2024 rankings"));
    assert!(html.contains("ZzZzNonExistent"));
}

#[tokio::test]
async fn test_search_backend_error() {
    let failing = Router::new().route(
        "/api/v1/names/:name",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let backend = spawn_server(failing).await;

    let (status, html) = get_page(client_for(backend), "/?name=TestName").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error searching for name"));
}

#[tokio::test]
async fn test_search_backend_unavailable() {
    let (status, html) = get_page(client_for(closed_port().await), "/?name=TestName").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Unable to connect to backend service"));
}

#[tokio::test]
async fn test_client_outcomes() {
    let backend = spawn_backend().await;
    let client = client_for(backend);

    assert_eq!(
        client.lookup("NOAH").await,
        LookupOutcome::Found(record("Noah", 1, 4382))
    );
    assert_eq!(client.lookup("Nobody").await, LookupOutcome::NotFound);

    let garbage = Router::new().route("/api/v1/names/:name", get(|| async { "not json" }));
    let client = client_for(spawn_server(garbage).await);
    assert!(matches!(
        client.lookup("Noah").await,
        LookupOutcome::InvalidResponse(_)
    ));

    let client = client_for(closed_port().await);
    assert!(matches!(
        client.lookup("Noah").await,
        LookupOutcome::Unreachable(_)
    ));
}

#[tokio::test]
async fn test_unknown_frontend_route() {
    let (status, body) = get_page(client_for(closed_port().await), "/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Endpoint not found"));
}
