//! # UI Components
//!
//! Reusable UI components for the Newsdesk desktop application.
//!
//! - [`Layout`] - Main application layout wrapper
//! - [`Sidebar`] - Navigation sidebar
//! - [`Header`] - Application header
//! - [`BusyOverlay`] / [`AlertDialog`] / [`ConfirmDialog`] - Modal overlays
//! - [`CodeView`] - Highlighted response body
//! - [`SearchBar`] - Listing filter input

mod code_view;
mod header;
mod layout;
mod overlay;
mod search_bar;
mod sidebar;

pub use code_view::CodeView;
pub use header::Header;
pub use layout::Layout;
pub use overlay::{AlertDialog, BusyOverlay, ConfirmDialog};
pub use search_bar::SearchBar;
pub use sidebar::Sidebar;
