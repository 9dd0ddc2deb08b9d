//! # Layout Component
//!
//! Main application layout wrapper providing consistent structure.

use dioxus::prelude::*;

use super::{AlertDialog, BusyOverlay, Header, Sidebar};
use crate::router::Route;
use crate::state::AppState;

/// Main layout wrapper component.
///
/// Provides the application shell with sidebar navigation and header.
/// All routed views are rendered inside the main content area via `Outlet`.
/// Without a session the operator is sent to the login screen.
///
/// # Structure
///
/// ```text
/// +---------------------------------------------+
/// | Sidebar |         Header                    |
/// |         |------------------------------------|
/// |  Nav    |                                   |
/// |  Items  |         Main Content              |
/// |         |         (Outlet)                  |
/// |         |                                   |
/// +---------------------------------------------+
/// ```
#[component]
pub fn Layout() -> Element {
    let state = use_context::<AppState>();
    let nav = use_navigator();

    if !state.is_logged_in() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        div {
            class: "app-layout",

            Sidebar {}

            div {
                class: "main-panel",

                Header {}

                main {
                    class: "content",

                    Outlet::<Route> {}
                }
            }

            BusyOverlay {}
            AlertDialog {}
        }
    }
}
