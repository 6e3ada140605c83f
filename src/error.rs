//! Error types for the httpscan crate

use thiserror::Error;

/// Main error type for httpscan operations
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for httpscan operations
pub type Result<T> = std::result::Result<T, ScanError>;
