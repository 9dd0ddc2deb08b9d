//! # Header Component
//!
//! Application header with the operator and transport status.

use dioxus::prelude::*;

use crate::router::Route;
use crate::state::AppState;

/// Application header component.
#[component]
pub fn Header() -> Element {
    let mut state = use_context::<AppState>();
    let nav = use_navigator();
    let rpc = state.console.read().rpc_available();
    let username = state.operator_name().unwrap_or_default();

    let status_class = if rpc {
        "status-indicator connected"
    } else {
        "status-indicator degraded"
    };

    let on_logout = move |_| {
        if state.is_busy() {
            return;
        }
        state.logout();
        nav.replace(Route::Login {});
    };

    rsx! {
        header {
            class: "app-header",

            h1 { "News Platform Administration" }

            div { class: "header-right",
                div {
                    class: "connection-status",
                    title: "Transports used for user management",

                    span {
                        class: "{status_class}",
                    }

                    span {
                        if rpc { "SOAP + REST" } else { "REST only" }
                    }
                }

                div { class: "user-menu",
                    div { class: "user-avatar",
                        "{username.chars().next().unwrap_or('?').to_uppercase()}"
                    }
                    span { class: "username", "{username}" }
                    button {
                        class: "btn-sm btn-ghost",
                        onclick: on_logout,
                        "Logout"
                    }
                }
            }
        }
    }
}
