#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("generated output contains no HTML element")]
    InvalidMarkup,
    #[error("failed to read options file: {0}")]
    FileRead(std::io::Error),
    #[error("invalid YAML: {0}")]
    InvalidYaml(serde_yaml::Error),
    #[error("invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
    #[error("options schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },
    #[error("invalid component id: {0}")]
    InvalidId(#[from] pagewright_types::TextError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
