//! # Console Errors
//!
//! The error taxonomy surfaced to the user interface.

use thiserror::Error;

use crate::api::ApiError;
use crate::transport::Operation;

/// Why a login was refused or an operation required one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// Backend rejected the username/password pair.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Credentials are valid but the account is not an administrator.
    #[error("access is restricted to administrators")]
    NotAdministrator,

    /// No session is open.
    #[error("not logged in")]
    NotLoggedIn,
}

/// Errors returned by console operations.
///
/// None of these is fatal: the interface shows them and carries on.
#[derive(Error, Debug)]
pub enum AdminError {
    /// Login refused, or no session. Shown inline on the login screen.
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthFailure),

    /// Input rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The final transport attempt failed.
    #[error("{operation} failed: {source}")]
    Failed {
        /// What was attempted.
        operation: Operation,
        /// Last transport error.
        source: ApiError,
    },
}

impl AdminError {
    /// Whether the error was raised before any network round-trip.
    #[must_use]
    pub fn is_client_side(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Authentication(AuthFailure::NotLoggedIn))
    }
}

/// Result type for console operations.
pub type AdminResult<T> = Result<T, AdminError>;
