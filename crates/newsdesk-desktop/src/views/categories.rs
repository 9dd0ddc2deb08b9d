//! # Categories View
//!
//! Category management. A category that still has articles in the cached
//! article listing cannot be deleted.

use dioxus::prelude::*;
use newsdesk_core::api::{CategoryDraft, Record};

use crate::components::{ConfirmDialog, SearchBar};
use crate::router::Route;
use crate::state::AppState;

#[derive(Clone, PartialEq)]
struct CategoryRow {
    id: u64,
    name: String,
    description: String,
    articles: usize,
    record: Record,
}

/// Category list with per-category article counts.
#[component]
pub fn Categories() -> Element {
    let state = use_context::<AppState>();
    let query = use_signal(String::new);
    let mut editing = use_signal(|| Option::<(Option<u64>, CategoryDraft)>::None);
    let mut pending_delete = use_signal(|| Option::<Record>::None);

    use_effect(move || state.refresh_categories());

    let articles = state.articles.read();
    let rows: Vec<CategoryRow> = state
        .categories
        .read()
        .filter_categories(&query.read())
        .into_iter()
        .map(|record| CategoryRow {
            id: record.id().unwrap_or_default(),
            name: record.text("name"),
            description: record.text("description"),
            articles: articles.article_count(&record.text("name")),
            record: record.clone(),
        })
        .collect();
    drop(articles);
    let pending_name = pending_delete.read().as_ref().map(|c| c.text("name"));

    let on_delete = move |_: ()| {
        let Some(category) = pending_delete() else {
            return;
        };
        pending_delete.set(None);
        let articles = state.articles.peek().clone();
        state.run(
            "Deleting category",
            move |console| async move { console.delete_category(&category, &articles).await },
            move |()| state.refresh_categories(),
        );
    };

    rsx! {
        div { class: "list-view",
            div { class: "view-header",
                h2 { "Categories" }
                div { class: "toolbar",
                    SearchBar { value: query, placeholder: "Search name or description" }
                    button { class: "btn-ghost", onclick: move |_| state.refresh_categories(), "Refresh" }
                    button {
                        class: "btn-primary",
                        onclick: move |_| editing.set(Some((None, CategoryDraft::default()))),
                        "+ New Category"
                    }
                }
            }

            table { class: "data-table",
                thead {
                    tr {
                        th { "ID" }
                        th { "Name" }
                        th { "Description" }
                        th { "Articles" }
                        th { "" }
                    }
                }
                tbody {
                    for row in rows {
                        tr { key: "{row.id}",
                            td { "{row.id}" }
                            td { "{row.name}" }
                            td { "{row.description}" }
                            td {
                                Link {
                                    to: Route::CategoryArticles { name: row.name.clone() },
                                    "{row.articles}"
                                }
                            }
                            td { class: "row-actions",
                                button {
                                    class: "btn-sm btn-ghost",
                                    onclick: {
                                        let record = row.record.clone();
                                        move |_| editing.set(Some((record.id(), CategoryDraft::from_record(&record))))
                                    },
                                    "Edit"
                                }
                                button {
                                    class: "btn-sm btn-danger",
                                    onclick: {
                                        let record = row.record.clone();
                                        move |_| pending_delete.set(Some(record.clone()))
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }

            if let Some((id, draft)) = editing() {
                CategoryForm {
                    id: id,
                    draft: draft,
                    on_close: move |saved: bool| {
                        editing.set(None);
                        if saved {
                            state.refresh_categories();
                        }
                    },
                }
            }

            if let Some(name) = pending_name {
                ConfirmDialog {
                    message: "Delete category '{name}'?",
                    on_confirm: on_delete,
                    on_cancel: move |_| pending_delete.set(None),
                }
            }
        }
    }
}

/// Create/edit form for a category. `id` is `None` when creating.
#[component]
fn CategoryForm(id: Option<u64>, draft: CategoryDraft, on_close: EventHandler<bool>) -> Element {
    let state = use_context::<AppState>();
    let mut name = use_signal(|| draft.name.clone());
    let mut description = use_signal(|| draft.description.clone());

    let on_save = move |_| {
        let draft = CategoryDraft {
            name: name(),
            description: description(),
        };
        state.run(
            "Saving category",
            move |console| async move {
                match id {
                    Some(id) => console.update_category(id, &draft).await,
                    None => console.create_category(&draft).await,
                }
            },
            move |_| on_close.call(true),
        );
    };

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal glass-panel",
                h3 { if id.is_some() { "Edit Category" } else { "New Category" } }

                div { class: "form-group",
                    label { "Name" }
                    input { value: "{name}", oninput: move |evt| name.set(evt.value()) }
                }
                div { class: "form-group",
                    label { "Description" }
                    textarea {
                        rows: "4",
                        value: "{description}",
                        oninput: move |evt| description.set(evt.value()),
                    }
                }

                div { class: "btn-group",
                    button { class: "btn-primary", onclick: on_save, "Save" }
                    button { class: "btn-ghost", onclick: move |_| on_close.call(false), "Cancel" }
                }
            }
        }
    }
}
