//! tally: a visit-counting web page backed by Redis.
//!
//! This is the application entry point. It initializes tracing, resolves
//! configuration from environment variables, connects to Redis and verifies
//! the connection with a PING, sets up the Axum router, and starts the HTTP
//! server. Any startup failure is fatal; the process logs the error and
//! exits non-zero before the HTTP port is ever bound.

mod config;
mod error;
mod middleware;
mod routes;
mod shutdown;
mod state;
mod store;

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{AppConfig, DEFAULT_LOG_FILTER};
use routes::create_router;
use state::AppState;
use store::CounterStore;

/// tally: serve one page, count every visit in Redis
#[derive(Parser, Debug)]
#[command(name = "tally", version, about)]
struct Args {
    /// Log level filter (e.g., "tally=debug,axum=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Fatal startup error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Resolve configuration from the environment
    let config = AppConfig::from_env()?;
    tracing::info!(
        store = %config.store.addr(),
        username = %config.store.username,
        insecure_tls = config.store.insecure_tls,
        "Loaded configuration"
    );

    // Connect to Redis and verify the connection before accepting traffic
    let store = CounterStore::connect(&config.store).await?;
    store.ping().await?;
    tracing::info!("Connected to Redis");

    // Create application state and router
    let state = AppState::new(store);
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    Ok(())
}
