//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use payment_router::config::RouterConfig;
use payment_router::http::HttpServer;
use payment_router::lifecycle::Shutdown;
use payment_router::routing::{FixedClock, RoutingEngine};
use tower::ServiceExt;

/// Instant used by every fixed-clock test server.
#[allow(dead_code)]
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 45).unwrap()
}

/// Server whose engine always sees [`fixed_instant`].
#[allow(dead_code)]
pub fn fixed_clock_server(config: RouterConfig) -> HttpServer {
    let engine = RoutingEngine::new(Arc::new(FixedClock::new(fixed_instant())));
    HttpServer::with_engine(config, engine)
}

/// Send one request through the in-process router and return status and body.
#[allow(dead_code)]
pub async fn send(server: &HttpServer, request: Request<Body>) -> (StatusCode, Response<Body>) {
    let response = server.router().oneshot(request).await.unwrap();
    (response.status(), response)
}

/// Build a `POST /route` request with a raw body.
#[allow(dead_code)]
pub fn post_route(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/route")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Start a live server on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server(server: HttpServer) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}
