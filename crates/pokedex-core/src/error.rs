//! Error types for the Pokédex client.
//!
//! Every variant is `Clone` because a single failed request is handed to all
//! callers that were waiting on the same in-flight fetch.

use std::time::Duration;
use thiserror::Error;

/// Main error type for the Pokédex client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PokedexError {
    // Remote resource errors
    #[error("{resource} \"{identifier}\" not found.")]
    NotFound {
        resource: String,
        identifier: String,
    },

    #[error("Failed to fetch {url}: HTTP {status}")]
    Http { status: u16, url: String },

    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    // Serialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    // Validation errors
    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for Pokédex operations.
pub type Result<T> = std::result::Result<T, PokedexError>;

impl PokedexError {
    /// Build a validation error for a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PokedexError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True when the remote API answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PokedexError::NotFound { .. })
    }

    /// Check if this error is worth re-invoking the operation for.
    ///
    /// The client itself never retries; this only informs callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            PokedexError::Network { .. } | PokedexError::Timeout(_) => true,
            PokedexError::Http { status, .. } => matches!(status, 408 | 429 | 500..=599),
            _ => false,
        }
    }
}
