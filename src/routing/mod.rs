//! Routing decision subsystem.
//!
//! # Data Flow
//! ```text
//! PaymentRequest (merchant, amount, currency, channel)
//!     → matcher.rs (ordered gateway rules over channel + amount)
//!     → engine.rs (attach retry hint, trace ID, timestamp)
//!     → Return: RouteDecision
//!
//! Time source:
//!     clock.rs (injected Clock, read once per decision)
//! ```
//!
//! # Design Decisions
//! - Stateless: the engine is shared via Arc without locks
//! - Deterministic: same (channel, amount) always selects the same gateway
//! - First match wins, unknown channels fall back
//! - Never fails once a request has been decoded

pub mod clock;
pub mod engine;
pub mod matcher;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{RoutingEngine, RETRY_IN};
pub use matcher::select_gateway;
pub use types::{Amount, Channel, Gateway, PaymentRequest, RouteDecision, TraceId};
