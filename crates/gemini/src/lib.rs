//! # Pagewright Gemini
//!
//! The asynchronous half of the generation boundary:
//! - [`TextGenerator`], the seam between prompt assembly and any text model
//! - [`GeminiClient`], an implementation over the Google Generative Language REST API
//! - [`GenerationService`], which wraps a generator with modification history, output
//!   cleaning and editor block ids
//!
//! Configuration ([`GeminiConfig`]) is resolved once at startup and passed in.

mod client;
mod config;
mod service;

pub use client::GeminiClient;
pub use config::{
    api_key_from_env_value, base_url_from_env_value, model_from_env_value,
    temperature_from_env_value, timeout_from_env_value, GeminiConfig, SamplingSettings,
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
pub use service::{GeneratedFragment, GenerationLog, GenerationService};

use async_trait::async_trait;
use pagewright_core::CoreError;
use std::sync::Arc;

/// Errors raised while configuring or calling a text generator.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
    #[error("model API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("request to model API failed: {0}")]
    Transport(String),
    #[error("model returned no text")]
    EmptyResponse,
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// Anything that turns an instruction into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` to the model and returns its raw text output.
    async fn generate(&self, prompt: &str) -> GenerationResult<String>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        (**self).generate(prompt).await
    }
}
