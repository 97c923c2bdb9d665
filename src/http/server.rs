//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Bind server to a plain or TLS listener
//! - Stop accepting and drain on shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{any, post},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{RouterConfig, TlsConfig};
use crate::http::health::health;
use crate::http::request::{make_request_span, UuidRequestId, X_REQUEST_ID};
use crate::http::route::route_payment;
use crate::lifecycle::shutdown::wait as shutdown_signal;
use crate::routing::RoutingEngine;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RoutingEngine>,
}

/// Errors raised while serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid bind address '{address}': {source}")]
    InvalidAddress {
        address: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to load TLS material from {cert_path} / {key_path}: {source}")]
    Tls {
        cert_path: String,
        key_path: String,
        source: std::io::Error,
    },
}

/// HTTP server for the payment router.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server reading time from the system clock.
    pub fn new(config: RouterConfig) -> Self {
        Self::with_engine(config, RoutingEngine::default())
    }

    /// Create a new HTTP server around an existing engine.
    pub fn with_engine(config: RouterConfig, engine: RoutingEngine) -> Self {
        let state = AppState {
            engine: Arc::new(engine),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .route("/route", post(route_payment))
            .route("/health", any(health))
            .with_state(state)
            .layer(middleware)
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Bind according to config (TLS if configured) and serve until shutdown.
    pub async fn serve(self, shutdown: broadcast::Receiver<()>) -> Result<(), ServerError> {
        let address = self.config.listener.bind_address.clone();
        let addr: SocketAddr = address
            .parse()
            .map_err(|source| ServerError::InvalidAddress { address, source })?;

        match self.config.listener.tls.clone() {
            Some(tls) => self.run_tls(addr, tls, shutdown).await,
            None => {
                let listener = TcpListener::bind(addr).await?;
                self.run(listener, shutdown).await
            }
        }
    }

    /// Serve plain HTTP on an already bound listener until shutdown.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    async fn run_tls(
        self,
        addr: SocketAddr,
        tls: TlsConfig,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let rustls = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
            .await
            .map_err(|source| ServerError::Tls {
                cert_path: tls.cert_path.clone(),
                key_path: tls.key_path.clone(),
                source,
            })?;

        let handle = axum_server::Handle::new();
        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            shutdown_signal(shutdown).await;
            shutdown_handle.graceful_shutdown(Some(grace));
        });

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::bind_rustls(addr, rustls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_bind_address() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "nowhere".into();
        let server = HttpServer::new(config);
        let shutdown = crate::lifecycle::Shutdown::new();

        let err = server.serve(shutdown.subscribe()).await.unwrap_err();
        assert!(matches!(err, ServerError::InvalidAddress { .. }));
    }

    #[tokio::test]
    async fn test_missing_tls_material() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.listener.tls = Some(TlsConfig {
            cert_path: "/missing/cert.pem".into(),
            key_path: "/missing/key.pem".into(),
        });
        let server = HttpServer::new(config);
        let shutdown = crate::lifecycle::Shutdown::new();

        let err = server.serve(shutdown.subscribe()).await.unwrap_err();
        assert!(matches!(err, ServerError::Tls { .. }));
    }
}
