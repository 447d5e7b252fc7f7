use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, rest_addr_from_env_value, router};
use pagewright_gemini::{GeminiClient, GeminiConfig};

/// Main entry point for the Pagewright application
///
/// Loads `.env`, resolves configuration once, and serves the REST API with its
/// OpenAPI document and Swagger UI.
///
/// # Environment Variables
/// - `PAGEWRIGHT_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `GEMINI_API_KEY`: API key for the Gemini API (required)
/// - `GEMINI_BASE_URL`, `GEMINI_MODEL`, `GEMINI_TEMPERATURE`, `GEMINI_TIMEOUT_SECS`: optional
///   overrides for the Gemini client
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pagewright=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = rest_addr_from_env_value(std::env::var("PAGEWRIGHT_REST_ADDR").ok())
        .context("PAGEWRIGHT_REST_ADDR is not a valid socket address")?;

    let gemini = GeminiConfig::from_env()?;
    tracing::info!("++ Gemini model {} at {}", gemini.model(), gemini.base_url());
    let state = AppState::new(Arc::new(GeminiClient::new(gemini)?));

    tracing::info!("++ Starting Pagewright REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
