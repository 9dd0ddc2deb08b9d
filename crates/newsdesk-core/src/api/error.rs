//! # API Errors
//!
//! Error types for REST operations.

use thiserror::Error;

/// Errors that can occur during REST operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a status the operation does not accept.
    #[error("backend error: {status} - {message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The base URL cannot carry a request path.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Failed to deserialize response.
    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status of a backend rejection, if this error carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for REST operations.
pub type ApiResult<T> = Result<T, ApiError>;
