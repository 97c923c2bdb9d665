//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware layers)
//!     → request.rs (request ID assigned, span opened)
//!     → route.rs (decode body → routing engine → encode decision)
//!     → response.rs (error mapping)
//!     → Send to client
//! ```

pub mod health;
pub mod request;
pub mod response;
pub mod route;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::RouteError;
pub use server::{AppState, HttpServer, ServerError};
