//! # RPC Errors
//!
//! Error types for the SOAP transport. Every variant means "RPC unavailable"
//! to the transport selector.

use thiserror::Error;

use crate::xml::XmlError;

/// Errors that can occur during SOAP operations.
#[derive(Error, Debug)]
pub enum RpcError {
    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Service description could not be fetched or understood.
    #[error("service description unusable: {0}")]
    ServiceDescription(String),

    /// Operation is not offered by the service description.
    #[error("operation not offered by the service: {0}")]
    UnknownOperation(String),

    /// Endpoint answered with a non-success status and no fault.
    #[error("endpoint error: {status} - {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Remote fault (business-rule rejection or server exception).
    #[error("remote fault: {0}")]
    Fault(String),

    /// Response body is not a SOAP envelope.
    #[error("malformed envelope: {0}")]
    Malformed(#[from] XmlError),

    /// Envelope is well formed but does not carry what the operation returns.
    #[error("unexpected reply: {0}")]
    UnexpectedReply(String),
}

/// Result type for SOAP operations.
pub type RpcResult<T> = Result<T, RpcError>;
