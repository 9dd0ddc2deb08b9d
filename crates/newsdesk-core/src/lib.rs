//! # Newsdesk Core
//!
//! Client core of the news platform administration desktop.
//!
//! ## Architecture
//!
//! The backend is reached over two transports:
//!
//! - [`api`] - JSON/REST API secured by a bearer credential
//! - [`rpc`] - SOAP user-management service located through its WSDL
//!
//! [`transport`] prefers RPC for user operations and falls back to REST
//! once. [`console::AdminConsole`] is the facade the user interface drives;
//! [`render`] turns raw JSON/XML bodies into highlighted text.
//!
//! ## Modules
//!
//! - [`api`] - REST client, records and write payloads
//! - [`rpc`] - SOAP client
//! - [`transport`] - RPC-first policy with REST fallback
//! - [`console`] - Session and entity operations
//! - [`listing`] - Cached listings and their filters
//! - [`display`] - Render-time formatting for list views
//! - [`render`] - JSON/XML pretty-printing and highlighting

pub mod api;
pub mod console;
pub mod display;
pub mod error;
pub mod listing;
pub mod render;
pub mod rpc;
pub mod session;
pub mod transport;
mod xml;

pub use console::AdminConsole;
pub use error::{AdminError, AdminResult, AuthFailure};
pub use listing::{DashboardStats, Listing, UserStats};
pub use render::{render, Rendered, Segment, Span, Style};
pub use session::{Operator, Session};
