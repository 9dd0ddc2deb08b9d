//! # RPC Transport
//!
//! SOAP transport for the user-management web service.
//!
//! The service is located through its WSDL document, fetched once at login.
//! [`RpcClient`] offers the five user operations the service publishes; any
//! failure is reported as an [`RpcError`], which the transport selector
//! treats as "RPC unavailable".

mod client;
mod envelope;
mod error;
mod wsdl;

pub use client::{RpcClient, SERVICE_DESCRIPTION_PATH};
pub use envelope::{Param, Reply};
pub use error::{RpcError, RpcResult};
pub use wsdl::ServiceDescription;
