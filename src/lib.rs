//! Payment routing service library.
//!
//! Decides which downstream gateway should process a payment and exposes
//! the decision over HTTP.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{PaymentRequest, RouteDecision, RoutingEngine};
