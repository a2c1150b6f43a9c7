//! Error types and handling for magidoc-core

use thiserror::Error;

/// Result type alias for magidoc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for magidoc-core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Template rendering errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

/// Descriptor-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Introspection schema not found: {path}")]
    SchemaNotFound { path: String },

    #[error("Unsupported descriptor format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
}
