//! Gemini client configuration.
//!
//! Resolved once at process startup and passed into [`crate::GeminiClient`]; nothing in this
//! crate reads environment variables during request handling. The `*_from_env_value` parsers
//! take the raw variable value so they can be tested without touching the process
//! environment.

use crate::{GenerationError, GenerationResult};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Sampling parameters sent as `generationConfig`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 2048,
        }
    }
}

/// Gemini API configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    api_key: String,
    base_url: String,
    model: String,
    sampling: SamplingSettings,
    timeout: Duration,
}

impl GeminiConfig {
    /// Create a new `GeminiConfig`.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Key sent in the `x-goog-api-key` header.
    /// * `base_url` - API root, e.g. [`DEFAULT_BASE_URL`]. A trailing slash is ignored.
    /// * `model` - Model name, e.g. [`DEFAULT_MODEL`].
    /// * `sampling` - Sampling parameters.
    /// * `timeout` - Per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingApiKey`] for a blank key, and
    /// [`GenerationError::InvalidConfig`] for an unparseable URL, a blank model, a zero
    /// timeout, or sampling values out of range (temperature outside 0..=2, top_p outside
    /// 0..=1, zero max tokens).
    pub fn new(
        api_key: String,
        base_url: &str,
        model: String,
        sampling: SamplingSettings,
        timeout: Duration,
    ) -> GenerationResult<Self> {
        if api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        let base_url = base_url.trim().trim_end_matches('/');
        url::Url::parse(base_url).map_err(|e| {
            GenerationError::InvalidConfig(format!("invalid Gemini base URL '{base_url}': {e}"))
        })?;

        if model.trim().is_empty() {
            return Err(GenerationError::InvalidConfig(
                "model name cannot be empty".into(),
            ));
        }
        if !(0.0..=2.0).contains(&sampling.temperature) {
            return Err(GenerationError::InvalidConfig(format!(
                "temperature must be between 0 and 2, got {}",
                sampling.temperature
            )));
        }
        if !(0.0..=1.0).contains(&sampling.top_p) {
            return Err(GenerationError::InvalidConfig(format!(
                "top_p must be between 0 and 1, got {}",
                sampling.top_p
            )));
        }
        if sampling.max_output_tokens == 0 {
            return Err(GenerationError::InvalidConfig(
                "max_output_tokens must be positive".into(),
            ));
        }
        if timeout.is_zero() {
            return Err(GenerationError::InvalidConfig(
                "timeout must be positive".into(),
            ));
        }

        Ok(Self {
            api_key: api_key.trim().to_string(),
            base_url: base_url.to_string(),
            model: model.trim().to_string(),
            sampling,
            timeout,
        })
    }

    /// Resolve the configuration from the process environment.
    ///
    /// Reads `GEMINI_API_KEY` (required), `GEMINI_BASE_URL`, `GEMINI_MODEL`,
    /// `GEMINI_TEMPERATURE` and `GEMINI_TIMEOUT_SECS`. Intended to be called once at startup.
    pub fn from_env() -> GenerationResult<Self> {
        let var = |name: &str| std::env::var(name).ok();

        let sampling = SamplingSettings {
            temperature: temperature_from_env_value(var("GEMINI_TEMPERATURE"))?,
            ..SamplingSettings::default()
        };

        Self::new(
            api_key_from_env_value(var("GEMINI_API_KEY"))?,
            &base_url_from_env_value(var("GEMINI_BASE_URL")),
            model_from_env_value(var("GEMINI_MODEL")),
            sampling,
            timeout_from_env_value(var("GEMINI_TIMEOUT_SECS"))?,
        )
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn sampling(&self) -> &SamplingSettings {
        &self.sampling
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("sampling", &self.sampling)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the API key. A missing or blank value is an error.
pub fn api_key_from_env_value(value: Option<String>) -> GenerationResult<String> {
    non_blank(value).ok_or(GenerationError::MissingApiKey)
}

/// Parse the base URL, falling back to [`DEFAULT_BASE_URL`]. Validation happens in
/// [`GeminiConfig::new`].
pub fn base_url_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Parse the model name, falling back to [`DEFAULT_MODEL`].
pub fn model_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// Parse the sampling temperature, falling back to the default of 0.2.
pub fn temperature_from_env_value(value: Option<String>) -> GenerationResult<f32> {
    match non_blank(value) {
        Some(v) => v.parse::<f32>().map_err(|_| {
            GenerationError::InvalidConfig(format!("GEMINI_TEMPERATURE is not a number: '{v}'"))
        }),
        None => Ok(SamplingSettings::default().temperature),
    }
}

/// Parse the request timeout in whole seconds, falling back to [`DEFAULT_TIMEOUT_SECS`].
pub fn timeout_from_env_value(value: Option<String>) -> GenerationResult<Duration> {
    let secs = match non_blank(value) {
        Some(v) => v.parse::<u64>().map_err(|_| {
            GenerationError::InvalidConfig(format!(
                "GEMINI_TIMEOUT_SECS is not a whole number of seconds: '{v}'"
            ))
        })?,
        None => DEFAULT_TIMEOUT_SECS,
    };
    Ok(Duration::from_secs(secs))
}
