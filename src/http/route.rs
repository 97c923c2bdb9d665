//! `POST /route` handler.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};

use crate::http::response::RouteError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{PaymentRequest, RoutingEngine};

const ENDPOINT: &str = "route";

/// Decode a payment request, route it and encode the decision.
///
/// The body is decoded as JSON whatever the `Content-Type`.
pub async fn route_payment(State(state): State<AppState>, body: Bytes) -> Response {
    let start = Instant::now();
    let response = match decide(&state.engine, &body) {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };
    metrics::record_request(ENDPOINT, response.status().as_u16(), start);
    response
}

fn decide(engine: &RoutingEngine, body: &[u8]) -> Result<Response, RouteError> {
    let request: PaymentRequest = serde_json::from_slice(body).map_err(|e| {
        metrics::record_decode_failure();
        RouteError::Decode(e)
    })?;

    let decision = engine.route(&request);
    metrics::record_decision(decision.gateway);

    let encoded = serde_json::to_vec(&decision).map_err(RouteError::Encode)?;
    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        encoded,
    )
        .into_response())
}
