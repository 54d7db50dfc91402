//! Edge Functions host - Main entry point
//!
//! A local stand-in for the serverless platform that:
//! - Serves every registered function under `{prefix}/{function}`
//! - Runs each invocation on the blocking pool, isolating handler panics
//! - Logs each request with its request id

mod config;
mod registry;
mod router;

use anyhow::Result;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::HostConfig;
use crate::registry::FunctionRegistry;

/// Shared host state
pub struct HostState {
    pub config: HostConfig,
    pub functions: FunctionRegistry,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,edge_functions_host=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Edge Functions host");

    let config = HostConfig::from_env();
    tracing::info!("Configuration loaded: {:?}", config);

    let functions = FunctionRegistry::builtin();
    for name in functions.names() {
        tracing::info!("Serving function {}{}/{}", config.listen_addr(), config.route_prefix, name);
    }

    let addr = config.listen_addr();
    let state = Arc::new(HostState { config, functions });

    let app = router::create_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Host listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
