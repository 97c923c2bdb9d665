//! Payment Router
//!
//! Chooses a downstream payment gateway for each routing request.
//!
//! # Architecture Overview
//!
//! ```text
//!     POST /route            ┌──────────────────────────────────────────────┐
//!     ───────────────────────┼─▶ http::server ──▶ http::route (decode JSON) │
//!                            │                        │                     │
//!                            │                        ▼                     │
//!                            │                 routing::engine              │
//!                            │            (matcher + clock + trace ID)      │
//!                            │                        │                     │
//!     RouteDecision          │                        ▼                     │
//!     ◀──────────────────────┼──────────────── http::route (encode JSON)    │
//!                            │                                              │
//!                            │  config · observability · lifecycle          │
//!                            └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use payment_router::config::{load_config, validate_config, ConfigError, RouterConfig};
use payment_router::lifecycle::startup;
use payment_router::observability::logging;

#[derive(Parser)]
#[command(name = "payment-router")]
#[command(about = "Routes payment requests to downstream gateways", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);
    tracing::info!("payment-router v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
