//! Live-server tests over real sockets.

use std::time::{Duration, Instant};

use payment_router::config::RouterConfig;
use payment_router::http::HttpServer;
use payment_router_sdk::{RouteRequest, RouterClient};

mod common;

fn request(merchant: &str, amount: f64, channel: &str) -> RouteRequest {
    RouteRequest {
        merchant_id: merchant.to_string(),
        amount,
        currency: "USD".to_string(),
        channel: channel.to_string(),
    }
}

#[tokio::test]
async fn test_sdk_round_trip() {
    let (addr, shutdown) = common::start_server(common::fixed_clock_server(RouterConfig::default())).await;
    let client = RouterClient::new(&format!("http://{}", addr));

    assert!(client.health().await.unwrap());

    let decision = client.route(&request("m2", 1500.0, "online")).await.unwrap();
    assert_eq!(decision.gateway, "high-value-secondary");
    assert_eq!(decision.retry_in, 150_000_000);
    assert_eq!(decision.trace_id, "20240601-123045");

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_body_over_the_wire() {
    let (addr, shutdown) = common::start_server(HttpServer::new(RouterConfig::default())).await;

    let res = reqwest::Client::new()
        .post(format!("http://{}/route", addr))
        .body("not json at all")
        .send()
        .await
        .expect("Router unreachable");
    assert_eq!(res.status(), 400);

    shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let (addr, shutdown) = common::start_server(HttpServer::new(RouterConfig::default())).await;
    let url = format!("http://{}", addr);

    let concurrency = 20;
    let requests_per_task = 25;
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task in 0..concurrency {
        let client = RouterClient::new(&url);
        tasks.push(tokio::spawn(async move {
            let mut gateways = Vec::new();
            for i in 0..requests_per_task {
                let (channel, expected) = match (task + i) % 3 {
                    0 => ("pos", "card-present-primary"),
                    1 => ("online", "online-primary"),
                    _ => ("kiosk", "fallback"),
                };
                let decision = client
                    .route(&request("load", 100.0, channel))
                    .await
                    .expect("route failed");
                gateways.push((decision.gateway, expected));
            }
            gateways
        }));
    }

    let mut total = 0;
    for task in tasks {
        for (gateway, expected) in task.await.unwrap() {
            assert_eq!(gateway, expected);
            total += 1;
        }
    }

    assert_eq!(total, concurrency * requests_per_task);
    println!("{} decisions in {:?}", total, start.elapsed());

    shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let server = HttpServer::new(RouterConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let shutdown = payment_router::Shutdown::new();
    let rx = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, rx).await });
    tokio::time::sleep(Duration::from_millis(50)).await;

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
