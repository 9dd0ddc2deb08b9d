//! # Routing
//!
//! The view-state enum. Each variant is one screen; views render purely
//! from [`crate::state::AppState`].

use dioxus::prelude::*;

use crate::components::Layout;
use crate::views::{
    Articles, Categories, CategoryArticles, Dashboard, Inspector, Login, Settings, Tokens, Users,
};

/// Application routes.
///
/// Everything but [`Route::Login`] is wrapped in the [`Layout`], which sends
/// the operator back to the login screen when no session is open.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    /// Operator login.
    #[route("/login")]
    Login {},

    #[layout(Layout)]
    /// Collection counters.
    #[route("/")]
    Dashboard {},

    /// User management.
    #[route("/users")]
    Users {},

    /// Article management.
    #[route("/articles")]
    Articles {},

    /// Articles of one category.
    ///
    /// # Parameters
    ///
    /// * `name` - Category name
    #[route("/categories/:name/articles")]
    CategoryArticles { name: String },

    /// Category management.
    #[route("/categories")]
    Categories {},

    /// API token management.
    #[route("/tokens")]
    Tokens {},

    /// Raw REST request/response inspector.
    #[route("/inspector")]
    Inspector {},

    /// Connection details.
    #[route("/settings")]
    Settings {},
}
