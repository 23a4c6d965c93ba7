//! Binary crate for the weather aggregator HTTP service.
//!
//! This crate focuses on:
//! - Logging and configuration at startup
//! - Routing and the optional static file mount
//! - Mapping aggregate results onto HTTP responses

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::EnvFilter;

use weather_core::{Aggregator, Config, providers_from_config};

mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let aggregator = Aggregator::new(providers_from_config(&config));

    let mut app = Router::new()
        .route("/", get(routes::root))
        .route("/weather/:city", get(routes::weather))
        .with_state(aggregator);

    // Assets are optional; mount them only when the directory is there.
    if Path::new("static").is_dir() {
        app = app.nest_service("/static", ServeDir::new("static"));
    }

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
        .parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
