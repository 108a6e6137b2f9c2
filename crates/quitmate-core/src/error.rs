//! Core error types for quitmate-core.
//!
//! The domain arithmetic never fails; errors live at the edges (storage,
//! config, the purchase service). Persistence errors are usually swallowed
//! at the call site -- loading falls back to the default state and writes
//! are best-effort -- but the types carry enough context for diagnostics.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for quitmate-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// State document storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Purchase service errors
    #[error("Purchase error: {0}")]
    Purchase(#[from] PurchaseError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// State-document storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read the state document
    #[error("Failed to read state at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the state document
    #[error("Failed to write state at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document exists but cannot be parsed
    #[error("State document is corrupt: {0}")]
    Corrupt(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Purchase service errors.
///
/// Callers on the premium path treat every one of these as "premium
/// granted" -- the demo fallback is a product decision, not a bug.
#[derive(Error, Debug)]
pub enum PurchaseError {
    /// HTTP transport failure
    #[error("Purchase service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Purchase service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// No API key configured
    #[error("Purchase service is not configured")]
    NotConfigured,

    /// Malformed service endpoint
    #[error("Invalid purchase service endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
