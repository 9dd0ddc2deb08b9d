//! # Tokens View
//!
//! API token generation, copying and revocation. List rows show a shortened
//! token; copying always fetches the full value again.

use dioxus::prelude::*;
use newsdesk_core::api::{Record, TokenRequest};
use newsdesk_core::display;

use crate::components::{ConfirmDialog, SearchBar};
use crate::state::AppState;

#[derive(Clone, PartialEq)]
struct TokenRow {
    id: u64,
    description: String,
    preview: String,
    created: String,
    expires: String,
    status: &'static str,
}

impl From<&Record> for TokenRow {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id().unwrap_or_default(),
            description: record.text("description"),
            preview: display::truncate_token(&record.text("token")),
            created: display::format_day(&record.text("createdAt")),
            expires: display::format_day(&record.text("expiresAt")),
            status: display::token_status(record),
        }
    }
}

fn copy_to_clipboard(text: &str) {
    let literal = serde_json::to_string(text).unwrap_or_default();
    document::eval(&format!("navigator.clipboard.writeText({literal});"));
    tracing::debug!("token copied to clipboard");
}

/// Token list with generation and revocation.
#[component]
pub fn Tokens() -> Element {
    let state = use_context::<AppState>();
    let query = use_signal(String::new);
    let mut creating = use_signal(|| false);
    let mut created = use_signal(|| Option::<String>::None);
    let mut pending_revoke = use_signal(|| Option::<(u64, String)>::None);

    use_effect(move || state.refresh_tokens());

    let rows: Vec<TokenRow> = state
        .tokens
        .read()
        .filter_tokens(&query.read())
        .into_iter()
        .map(TokenRow::from)
        .collect();

    let copy = move |id: u64| {
        state.run(
            "Fetching token",
            move |console| async move { console.get_token(id).await },
            |record| copy_to_clipboard(&record.text("token")),
        );
    };

    let on_revoke = move |_: ()| {
        let Some((id, _)) = pending_revoke() else {
            return;
        };
        pending_revoke.set(None);
        state.run(
            "Revoking token",
            move |console| async move { console.revoke_token(id).await },
            move |()| state.refresh_tokens(),
        );
    };

    rsx! {
        div { class: "list-view",
            div { class: "view-header",
                h2 { "API Tokens" }
                div { class: "toolbar",
                    SearchBar { value: query, placeholder: "Search description" }
                    button { class: "btn-ghost", onclick: move |_| state.refresh_tokens(), "Refresh" }
                    button {
                        class: "btn-primary",
                        onclick: move |_| creating.set(true),
                        "+ Generate Token"
                    }
                }
            }

            if let Some(token) = created() {
                div { class: "alert alert-success token-created",
                    p { "New token generated. Copy it now:" }
                    code { class: "mono token-full", "{token}" }
                    div { class: "btn-group",
                        button {
                            class: "btn-sm btn-primary",
                            onclick: {
                                let token = token.clone();
                                move |_| copy_to_clipboard(&token)
                            },
                            "Copy"
                        }
                        button {
                            class: "btn-sm btn-ghost",
                            onclick: move |_| created.set(None),
                            "Dismiss"
                        }
                    }
                }
            }

            table { class: "data-table",
                thead {
                    tr {
                        th { "ID" }
                        th { "Description" }
                        th { "Token" }
                        th { "Created" }
                        th { "Expires" }
                        th { "Status" }
                        th { "" }
                    }
                }
                tbody {
                    for row in rows {
                        tr { key: "{row.id}",
                            td { "{row.id}" }
                            td { "{row.description}" }
                            td { class: "mono", "{row.preview}" }
                            td { "{row.created}" }
                            td { "{row.expires}" }
                            td { "{row.status}" }
                            td { class: "row-actions",
                                button {
                                    class: "btn-sm btn-ghost",
                                    onclick: {
                                        let id = row.id;
                                        move |_| copy(id)
                                    },
                                    "Copy"
                                }
                                button {
                                    class: "btn-sm btn-danger",
                                    onclick: {
                                        let target = (row.id, row.description.clone());
                                        move |_| pending_revoke.set(Some(target.clone()))
                                    },
                                    "Revoke"
                                }
                            }
                        }
                    }
                }
            }

            if creating() {
                TokenForm {
                    on_close: move |token: Option<String>| {
                        creating.set(false);
                        if token.is_some() {
                            created.set(token);
                            state.refresh_tokens();
                        }
                    },
                }
            }

            if let Some((_, description)) = pending_revoke() {
                ConfirmDialog {
                    message: "Revoke token '{description}'? Clients using it will be rejected.",
                    on_confirm: on_revoke,
                    on_cancel: move |_| pending_revoke.set(None),
                }
            }
        }
    }
}

/// Token generation form. Closes with the new token value, or `None`.
#[component]
fn TokenForm(on_close: EventHandler<Option<String>>) -> Element {
    let state = use_context::<AppState>();
    let mut description = use_signal(String::new);
    let mut validity_days = use_signal(|| TokenRequest::default().validity_days);

    let on_save = move |_| {
        let request = TokenRequest {
            description: description(),
            validity_days: validity_days(),
        };
        state.run(
            "Generating token",
            move |console| async move { console.create_token(&request).await },
            move |record| on_close.call(Some(record.text("token"))),
        );
    };

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal glass-panel",
                h3 { "Generate API Token" }

                div { class: "form-group",
                    label { "Description" }
                    input { value: "{description}", oninput: move |evt| description.set(evt.value()) }
                }
                div { class: "form-group",
                    label { "Validity (days)" }
                    input {
                        r#type: "number",
                        min: "1",
                        value: "{validity_days}",
                        oninput: move |evt| validity_days.set(evt.value().trim().parse().unwrap_or(0)),
                    }
                }

                div { class: "btn-group",
                    button { class: "btn-primary", onclick: on_save, "Generate" }
                    button { class: "btn-ghost", onclick: move |_| on_close.call(None), "Cancel" }
                }
            }
        }
    }
}
