//! # Overlays
//!
//! Modal loading indicator, error alert and confirmation dialog.

use dioxus::prelude::*;

use crate::state::AppState;

/// Shown while a backend call is in flight. Blocks all interaction.
#[component]
pub fn BusyOverlay() -> Element {
    let state = use_context::<AppState>();
    let busy = state.busy.read().clone();

    rsx! {
        if let Some(label) = busy {
            div { class: "modal-backdrop busy",
                div { class: "busy-card glass-panel",
                    div { class: "spinner" }
                    p { "{label}..." }
                }
            }
        }
    }
}

/// Blocking error message; dismissed by the operator.
#[component]
pub fn AlertDialog() -> Element {
    let mut state = use_context::<AppState>();
    let alert = state.alert.read().clone();

    rsx! {
        if let Some(message) = alert {
            div { class: "modal-backdrop",
                div { class: "modal glass-panel",
                    h3 { "Error" }
                    p { class: "alert alert-error", "{message}" }
                    div { class: "btn-group",
                        button {
                            class: "btn-primary",
                            onclick: move |_| state.alert.set(None),
                            "OK"
                        }
                    }
                }
            }
        }
    }
}

/// Asks the operator to confirm a destructive action.
#[component]
pub fn ConfirmDialog(
    message: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal glass-panel",
                h3 { "Confirm" }
                p { "{message}" }
                div { class: "btn-group",
                    button {
                        class: "btn-danger",
                        onclick: move |_| on_confirm.call(()),
                        "Confirm"
                    }
                    button {
                        class: "btn-ghost",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
