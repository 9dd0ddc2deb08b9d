//! # Settings View
//!
//! Read-only connection details for the current session.

use dioxus::prelude::*;
use newsdesk_core::api::BASE_URL;

use crate::state::AppState;

/// Settings view component.
#[component]
pub fn Settings() -> Element {
    let state = use_context::<AppState>();
    let rpc = state.console.read().rpc_available();
    let operator = state.operator_name().unwrap_or_default();

    rsx! {
        div {
            class: "settings-view",

            h2 { class: "mb-lg", "Settings" }

            div {
                class: "current-state",

                h3 { class: "mb-md", "Current Session" }

                div {
                    div {
                        strong { "Backend URL: " }
                        span { class: "mono", "{BASE_URL}" }
                    }

                    div {
                        strong { "Operator: " }
                        span { "{operator}" }
                    }

                    div {
                        strong { "User management transport: " }
                        if rpc {
                            span { class: "text-success", "SOAP (REST fallback)" }
                        } else {
                            span { class: "text-warning", "REST only" }
                        }
                    }
                }
            }
        }
    }
}
