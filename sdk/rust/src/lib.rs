//! HTTP client for the payment router.

mod client;

pub use client::{RouteRequest, RouteResponse, RouterClient};
