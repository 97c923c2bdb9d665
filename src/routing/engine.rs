//! Routing decision engine.

use std::sync::Arc;
use std::time::Duration;

use crate::routing::clock::{Clock, SystemClock};
use crate::routing::matcher::select_gateway;
use crate::routing::types::{PaymentRequest, RouteDecision, TraceId};

/// Retry hint attached to every decision.
pub const RETRY_IN: Duration = Duration::from_millis(150);

/// Engine that maps payment requests to gateway decisions.
///
/// Holds no mutable state; clone it or share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RoutingEngine {
    clock: Arc<dyn Clock>,
}

impl RoutingEngine {
    /// Create an engine reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Route a payment request.
    ///
    /// Reads the clock once; the trace ID and timestamp describe the same instant.
    pub fn route(&self, request: &PaymentRequest) -> RouteDecision {
        let gateway = select_gateway(&request.channel, request.amount);
        let timestamp = self.clock.now();
        let trace_id = TraceId::from_instant(&timestamp);

        tracing::debug!(
            merchant_id = %request.merchant_id,
            channel = %request.channel,
            gateway = %gateway,
            trace_id = %trace_id,
            "Routing decision made"
        );

        RouteDecision {
            gateway,
            retry_in: RETRY_IN,
            trace_id,
            timestamp,
        }
    }
}

impl Default for RoutingEngine {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
