mod analysis;
mod config;
mod errors;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::vocabulary::Vocabulary;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skillfit API v{}", env!("CARGO_PKG_VERSION"));

    // Vocabulary is loaded exactly once; an alias collision aborts startup
    // rather than silently picking a winner.
    let vocabulary = match &config.skills_path {
        Some(path) => Vocabulary::from_json_file(path)
            .with_context(|| format!("failed to load skills file {}", path.display()))?,
        None => Vocabulary::builtin().context("built-in skill table failed to load")?,
    };
    info!("Vocabulary loaded: {} skills", vocabulary.len());

    let state = AppState {
        vocabulary: Arc::new(vocabulary),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
