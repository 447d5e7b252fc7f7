//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful during development when only the HTTP surface is needed. The workspace's main
//! `pagewright-run` binary starts the same router after loading `.env`.

use anyhow::Context;
use api_rest::{rest_addr_from_env_value, router, AppState};
use pagewright_gemini::{GeminiClient, GeminiConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the standalone REST API server
///
/// # Errors
/// Returns an error if:
/// - `GEMINI_API_KEY` is missing or another Gemini setting is invalid,
/// - `PAGEWRIGHT_REST_ADDR` is not a socket address,
/// - the listener cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = rest_addr_from_env_value(std::env::var("PAGEWRIGHT_REST_ADDR").ok())
        .context("PAGEWRIGHT_REST_ADDR is not a valid socket address")?;

    let gemini = GeminiConfig::from_env()?;
    tracing::info!("-- Using Gemini model {}", gemini.model());
    let state = AppState::new(Arc::new(GeminiClient::new(gemini)?));

    tracing::info!("-- Starting Pagewright REST API on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
