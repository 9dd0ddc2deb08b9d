//! # Inspector View
//!
//! Sends raw reads to the public article service and shows the response
//! pretty-printed and highlighted.

use dioxus::prelude::*;
use newsdesk_core::api::{InspectorQuery, ResponseFormat};
use newsdesk_core::{render, Rendered};

use crate::components::CodeView;
use crate::state::AppState;

#[derive(Clone, Copy, PartialEq)]
enum QueryKind {
    All,
    Category,
    Grouped,
}

/// REST request/response inspector.
#[component]
pub fn Inspector() -> Element {
    let state = use_context::<AppState>();
    let mut kind = use_signal(|| QueryKind::All);
    let mut category = use_signal(String::new);
    let mut format = use_signal(ResponseFormat::default);
    let mut response = use_signal(|| Option::<(String, Rendered)>::None);

    let build_query = move || match kind() {
        QueryKind::All => InspectorQuery::AllArticles,
        QueryKind::Category => InspectorQuery::ByCategory(category().trim().to_string()),
        QueryKind::Grouped => InspectorQuery::Grouped,
    };

    let on_send = move |_| {
        let query = build_query();
        if matches!(&query, InspectorQuery::ByCategory(name) if name.is_empty()) {
            let mut alert = state.alert;
            alert.set(Some("Enter a category name".to_string()));
            return;
        }
        let format = format();
        let request_line = format!("GET {}  (Accept: {})", query.path(), format.accept());

        state.run(
            "Sending request",
            move |console| async move { console.inspect(&query, format).await },
            move |body| response.set(Some((request_line, render(&body, format)))),
        );
    };

    let category_names: Vec<String> = state
        .categories
        .read()
        .records()
        .iter()
        .map(|c| c.text("name"))
        .collect();

    let (json_class, xml_class) = match format() {
        ResponseFormat::Json => ("btn-primary", "btn-ghost"),
        ResponseFormat::Xml => ("btn-ghost", "btn-primary"),
    };

    rsx! {
        div { class: "inspector-view",
            h2 { class: "mb-lg", "REST Inspector" }

            div { class: "inspector-controls glass-panel",
                div { class: "form-row",
                    div { class: "form-group",
                        label { "Request" }
                        select {
                            onchange: move |evt| kind.set(match evt.value().as_str() {
                                "category" => QueryKind::Category,
                                "grouped" => QueryKind::Grouped,
                                _ => QueryKind::All,
                            }),
                            option { value: "all", "All published articles" }
                            option { value: "category", "Articles by category" }
                            option { value: "grouped", "Articles grouped by category" }
                        }
                    }

                    if kind() == QueryKind::Category {
                        div { class: "form-group",
                            label { "Category" }
                            input {
                                list: "category-names",
                                value: "{category}",
                                oninput: move |evt| category.set(evt.value()),
                            }
                            datalist { id: "category-names",
                                for name in category_names.iter() {
                                    option { value: "{name}" }
                                }
                            }
                        }
                    }

                    div { class: "form-group",
                        label { "Format" }
                        div { class: "btn-group",
                            button {
                                class: "{json_class}",
                                onclick: move |_| format.set(ResponseFormat::Json),
                                "JSON"
                            }
                            button {
                                class: "{xml_class}",
                                onclick: move |_| format.set(ResponseFormat::Xml),
                                "XML"
                            }
                        }
                    }
                }

                button { class: "btn-primary", onclick: on_send, "Send {format}" }
            }

            if let Some((request_line, rendered)) = response() {
                div { class: "inspector-response",
                    p { class: "mono text-secondary", "{request_line}" }
                    if rendered.is_plain() {
                        p { class: "text-tertiary", "Response shown as received." }
                    }
                    CodeView { rendered: rendered }
                }
            }
        }
    }
}
