// src/error.rs

//! Unified error handling for the data access layer.

use std::fmt;

use thiserror::Error;

/// Result type alias for data access operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Connection-level failure (refused, DNS, TLS, reset)
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    /// Request exceeded its time budget
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Backend answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// JSON parsed but matched neither a bare array nor a paginated envelope
    #[error("Unexpected response shape: {0}")]
    UnexpectedResponseShape(String),

    /// Every base URL candidate failed its probe
    #[error("No reachable API endpoint (tried {})", .tried.join(", "))]
    NoReachableEndpoint { tried: Vec<String> },

    /// Single-resource lookup found nothing, live or mock
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// Initial dashboard load produced nothing to show
    #[error("Bootstrap failed: {0}")]
    Bootstrap(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a network error for a URL.
    pub fn network(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Network {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create an unexpected-shape error.
    pub fn shape(message: impl Into<String>) -> Self {
        Self::UnexpectedResponseShape(message.into())
    }

    /// Create a not-found error.
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
