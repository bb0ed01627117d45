use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Parse error: {0}")]
    #[diagnostic(code(tuntikirja::parse))]
    Parse(String),

    #[error("Validation error: {0}")]
    #[diagnostic(code(tuntikirja::validation))]
    Validation(String),

    #[error("Not found: {0}")]
    #[diagnostic(code(tuntikirja::not_found))]
    NotFound(String),

    #[error("Storage error: {0}")]
    #[diagnostic(code(tuntikirja::storage))]
    Storage(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(tuntikirja::config))]
    Config(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(tuntikirja::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(tuntikirja::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(tuntikirja::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(tuntikirja::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type TrackerResult<T> = Result<T, Error>;

/// Helper to create parse errors
pub fn parse_error(message: &str) -> Error {
    Error::Parse(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create storage errors
pub fn storage_error(message: &str) -> Error {
    Error::Storage(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}
