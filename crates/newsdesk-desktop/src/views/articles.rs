//! # Articles View
//!
//! Article management, optionally scoped to one category.

use dioxus::prelude::*;
use newsdesk_core::api::{ArticleDraft, ArticleStatus, Record};
use newsdesk_core::display;

use crate::components::{ConfirmDialog, SearchBar};
use crate::state::AppState;

const STATUSES: [ArticleStatus; 3] = [
    ArticleStatus::Draft,
    ArticleStatus::Published,
    ArticleStatus::Archived,
];

#[derive(Clone, PartialEq)]
struct ArticleRow {
    id: u64,
    title: String,
    category: String,
    author: String,
    status: ArticleStatus,
    status_label: &'static str,
    date: String,
    record: Record,
}

impl From<&Record> for ArticleRow {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id().unwrap_or_default(),
            title: record.text("title"),
            category: record.text("categoryName"),
            author: record.text("authorName"),
            status: ArticleStatus::of(record),
            status_label: display::article_status(record),
            date: display::article_date(record),
            record: record.clone(),
        }
    }
}

/// All articles.
#[component]
pub fn Articles() -> Element {
    rsx! { ArticleList { category: None } }
}

/// Articles filed under one category.
#[component]
pub fn CategoryArticles(name: String) -> Element {
    rsx! { ArticleList { category: Some(name) } }
}

#[component]
fn ArticleList(category: Option<String>) -> Element {
    let state = use_context::<AppState>();
    let query = use_signal(String::new);
    let mut category_filter = use_signal(|| category.clone().unwrap_or_default());
    let mut editing = use_signal(|| Option::<(Option<u64>, ArticleDraft)>::None);
    let mut pending_delete = use_signal(|| Option::<(u64, String)>::None);

    use_effect(move || state.refresh_articles());

    let filter = category_filter();
    let rows: Vec<ArticleRow> = state
        .articles
        .read()
        .filter_articles(&query.read(), (!filter.is_empty()).then_some(filter.as_str()))
        .into_iter()
        .map(ArticleRow::from)
        .collect();
    let category_names: Vec<String> = state
        .categories
        .read()
        .records()
        .iter()
        .map(|c| c.text("name"))
        .collect();

    let set_status = move |id: u64, status: ArticleStatus| {
        state.run(
            "Changing article status",
            move |console| async move { console.set_article_status(id, status).await },
            move |()| state.refresh_articles(),
        );
    };

    let on_delete = move |_: ()| {
        let Some((id, _)) = pending_delete() else {
            return;
        };
        pending_delete.set(None);
        state.run(
            "Deleting article",
            move |console| async move { console.delete_article(id).await },
            move |()| state.refresh_articles(),
        );
    };

    rsx! {
        div { class: "list-view",
            div { class: "view-header",
                h2 {
                    if let Some(name) = category.as_ref() {
                        "Articles in {name}"
                    } else {
                        "Articles"
                    }
                }
                div { class: "toolbar",
                    SearchBar { value: query, placeholder: "Search title, content or author" }
                    select {
                        value: "{filter}",
                        onchange: move |evt| category_filter.set(evt.value()),
                        option { value: "", "All categories" }
                        for name in category_names.iter() {
                            option { value: "{name}", "{name}" }
                        }
                    }
                    button { class: "btn-ghost", onclick: move |_| state.refresh_articles(), "Refresh" }
                    button {
                        class: "btn-primary",
                        onclick: move |_| {
                            let draft = ArticleDraft {
                                category_name: category_filter(),
                                ..ArticleDraft::default()
                            };
                            editing.set(Some((None, draft)));
                        },
                        "+ New Article"
                    }
                }
            }

            table { class: "data-table",
                thead {
                    tr {
                        th { "ID" }
                        th { "Title" }
                        th { "Category" }
                        th { "Author" }
                        th { "Status" }
                        th { "Date" }
                        th { "" }
                    }
                }
                tbody {
                    for row in rows {
                        tr { key: "{row.id}",
                            td { "{row.id}" }
                            td { "{row.title}" }
                            td { "{row.category}" }
                            td { "{row.author}" }
                            td {
                                select {
                                    class: "status-select",
                                    value: "{row.status.as_str()}",
                                    onchange: {
                                        let id = row.id;
                                        move |evt: FormEvent| {
                                            if let Some(status) = ArticleStatus::parse(&evt.value()) {
                                                set_status(id, status);
                                            }
                                        }
                                    },
                                    for status in STATUSES {
                                        option { value: "{status.as_str()}", "{status.as_str()}" }
                                    }
                                }
                                span { class: "text-tertiary", " {row.status_label}" }
                            }
                            td { "{row.date}" }
                            td { class: "row-actions",
                                button {
                                    class: "btn-sm btn-ghost",
                                    onclick: {
                                        let record = row.record.clone();
                                        move |_| editing.set(Some((record.id(), ArticleDraft::from_record(&record))))
                                    },
                                    "Edit"
                                }
                                button {
                                    class: "btn-sm btn-ghost",
                                    onclick: {
                                        let record = row.record.clone();
                                        move |_| editing.set(Some((None, ArticleDraft::duplicate_of(&record))))
                                    },
                                    "Duplicate"
                                }
                                button {
                                    class: "btn-sm btn-danger",
                                    onclick: {
                                        let target = (row.id, row.title.clone());
                                        move |_| pending_delete.set(Some(target.clone()))
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }

            if let Some((id, draft)) = editing() {
                ArticleForm {
                    id: id,
                    draft: draft,
                    categories: category_names.clone(),
                    on_close: move |saved: bool| {
                        editing.set(None);
                        if saved {
                            state.refresh_articles();
                        }
                    },
                }
            }

            if let Some((_, title)) = pending_delete() {
                ConfirmDialog {
                    message: "Delete article '{title}'?",
                    on_confirm: on_delete,
                    on_cancel: move |_| pending_delete.set(None),
                }
            }
        }
    }
}

/// Create/edit form for an article. `id` is `None` when creating.
#[component]
fn ArticleForm(
    id: Option<u64>,
    draft: ArticleDraft,
    categories: Vec<String>,
    on_close: EventHandler<bool>,
) -> Element {
    let state = use_context::<AppState>();
    let mut title = use_signal(|| draft.title.clone());
    let mut summary = use_signal(|| draft.summary.clone());
    let mut content = use_signal(|| draft.content.clone());
    let mut category_name = use_signal(|| draft.category_name.clone());
    let mut status = use_signal(|| draft.status);
    let status_value = status().as_str();

    let on_save = move |_| {
        let draft = ArticleDraft {
            title: title(),
            summary: summary(),
            content: content(),
            category_name: category_name(),
            status: status(),
            author_id: None,
        };
        state.run(
            "Saving article",
            move |console| async move {
                match id {
                    Some(id) => console.update_article(id, &draft).await,
                    None => console.create_article(&draft).await,
                }
            },
            move |_| on_close.call(true),
        );
    };

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal modal-wide glass-panel",
                h3 { if id.is_some() { "Edit Article" } else { "New Article" } }

                div { class: "form-group",
                    label { "Title" }
                    input { value: "{title}", oninput: move |evt| title.set(evt.value()) }
                }
                div { class: "form-group",
                    label { "Summary" }
                    input { value: "{summary}", oninput: move |evt| summary.set(evt.value()) }
                }
                div { class: "form-group",
                    label { "Content" }
                    textarea {
                        rows: "10",
                        value: "{content}",
                        oninput: move |evt| content.set(evt.value()),
                    }
                }
                div { class: "form-row",
                    div { class: "form-group",
                        label { "Category" }
                        select {
                            value: "{category_name}",
                            onchange: move |evt| category_name.set(evt.value()),
                            option { value: "", "(none)" }
                            for name in categories.iter() {
                                option { value: "{name}", "{name}" }
                            }
                        }
                    }
                    div { class: "form-group",
                        label { "Status" }
                        select {
                            value: "{status_value}",
                            onchange: move |evt| status.set(ArticleStatus::parse(&evt.value()).unwrap_or_default()),
                            for s in STATUSES {
                                option { value: "{s.as_str()}", "{s.as_str()}" }
                            }
                        }
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
