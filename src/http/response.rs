//! Error responses.
//!
//! # Design Decisions
//! - Undecodable bodies are the client's fault: 400
//! - A decision that cannot be encoded is a defect: 500
//! - Errors are returned as a JSON envelope

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Failures at the HTTP boundary of the routing endpoint.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The request body is not a valid payment request.
    #[error("invalid payment request: {0}")]
    Decode(#[source] serde_json::Error),

    /// The routing decision could not be serialized.
    #[error("failed to encode routing decision: {0}")]
    Encode(#[source] serde_json::Error),
}

impl RouteError {
    pub fn status(&self) -> StatusCode {
        match self {
            RouteError::Decode(_) => StatusCode::BAD_REQUEST,
            RouteError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RouteError::Decode(_) => "invalid_request",
            RouteError::Encode(_) => "encode_failed",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match &self {
            RouteError::Decode(e) => tracing::warn!(error = %e, "Rejected payment request"),
            RouteError::Encode(e) => tracing::error!(error = %e, "Routing decision encode failed"),
        }

        let body = ErrorEnvelope {
            error: ErrorPayload {
                code: self.code(),
                message: self.to_string(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(RouteError::Decode(json_error()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RouteError::Encode(json_error()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = RouteError::Decode(json_error()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "invalid_request");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("invalid payment request"));
    }
}
