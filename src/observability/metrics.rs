//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): requests by endpoint, status
//! - `router_request_duration_seconds` (histogram): latency by endpoint
//! - `router_decisions_total` (counter): decisions by gateway
//! - `router_decode_failures_total` (counter): rejected request bodies

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::Gateway;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished HTTP request.
pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "router_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("router_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

/// Record a routing decision.
pub fn record_decision(gateway: Gateway) {
    metrics::counter!("router_decisions_total", "gateway" => gateway.as_str()).increment(1);
}

/// Record a request body that could not be decoded.
pub fn record_decode_failure() {
    metrics::counter!("router_decode_failures_total").increment(1);
}
