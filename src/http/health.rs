//! Liveness endpoint.

/// Static liveness acknowledgement, independent of the routing engine.
pub async fn health() -> &'static str {
    "ok"
}
