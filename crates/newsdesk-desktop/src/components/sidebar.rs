//! # Sidebar Component
//!
//! Navigation sidebar for the application.

use dioxus::prelude::*;

use crate::router::Route;

/// Navigation sidebar component.
#[component]
pub fn Sidebar() -> Element {
    rsx! {
        nav {
            class: "sidebar",

            div {
                class: "sidebar-brand",
                "Newsdesk"
            }

            div {
                class: "nav-links",

                Link { to: Route::Dashboard {}, class: "nav-link", "Dashboard" }
                Link { to: Route::Users {}, class: "nav-link", "Users" }
                Link { to: Route::Articles {}, class: "nav-link", "Articles" }
                Link { to: Route::Categories {}, class: "nav-link", "Categories" }
                Link { to: Route::Tokens {}, class: "nav-link", "API Tokens" }
                Link { to: Route::Inspector {}, class: "nav-link", "REST Inspector" }
                Link { to: Route::Settings {}, class: "nav-link", "Settings" }
            }
        }
    }
}
