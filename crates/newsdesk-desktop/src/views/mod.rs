//! # Views
//!
//! Page-level view components for the Newsdesk desktop application.
//!
//! - [`Login`] - Operator authentication
//! - [`Dashboard`] - Collection counters
//! - [`Users`] - User management
//! - [`Articles`] / [`CategoryArticles`] - Article management
//! - [`Categories`] - Category management
//! - [`Tokens`] - API token management
//! - [`Inspector`] - Raw REST request/response inspector
//! - [`Settings`] - Connection details

mod articles;
mod categories;
mod dashboard;
mod inspector;
mod login;
mod settings;
mod tokens;
mod users;

pub use articles::{Articles, CategoryArticles};
pub use categories::Categories;
pub use dashboard::Dashboard;
pub use inspector::Inspector;
pub use login::Login;
pub use settings::Settings;
pub use tokens::Tokens;
pub use users::Users;
