//! # Users View
//!
//! User management. Listing, creation, update and deletion prefer the RPC
//! transport; the console falls back to REST on its own.

use dioxus::prelude::*;
use newsdesk_core::api::{Record, Role, UserDraft};
use newsdesk_core::display;
use newsdesk_core::listing::full_name;

use crate::components::{ConfirmDialog, SearchBar};
use crate::state::AppState;

#[derive(Clone, PartialEq)]
struct UserRow {
    id: u64,
    username: String,
    email: String,
    name: String,
    role: String,
    status: &'static str,
    record: Record,
}

impl From<&Record> for UserRow {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id().unwrap_or_default(),
            username: record.text("username"),
            email: record.text("email"),
            name: full_name(record),
            role: record.text("role"),
            status: display::user_status(record),
            record: record.clone(),
        }
    }
}

/// User list with search, role counts and row actions.
#[component]
pub fn Users() -> Element {
    let state = use_context::<AppState>();
    let query = use_signal(String::new);
    let mut editing = use_signal(|| Option::<(Option<u64>, UserDraft)>::None);
    let mut pending_delete = use_signal(|| Option::<(u64, String)>::None);

    use_effect(move || state.refresh_users());

    let users = state.users.read();
    let stats = users.user_stats();
    let rows: Vec<UserRow> = users
        .filter_users(&query.read())
        .into_iter()
        .map(UserRow::from)
        .collect();
    drop(users);

    let on_delete = move |_: ()| {
        let Some((id, _)) = pending_delete() else {
            return;
        };
        pending_delete.set(None);
        state.run(
            "Deleting user",
            move |console| async move { console.delete_user(id).await },
            move |()| state.refresh_users(),
        );
    };

    rsx! {
        div { class: "list-view",
            div { class: "view-header",
                h2 { "Users" }
                div { class: "toolbar",
                    SearchBar { value: query, placeholder: "Search username, email or name" }
                    button { class: "btn-ghost", onclick: move |_| state.refresh_users(), "Refresh" }
                    button {
                        class: "btn-primary",
                        onclick: move |_| editing.set(Some((None, UserDraft { active: true, ..UserDraft::default() }))),
                        "+ New User"
                    }
                }
            }

            p { class: "text-secondary",
                "{stats.total} users: {stats.admins} admins, {stats.editors} editors, {stats.visitors} visitors"
            }

            table { class: "data-table",
                thead {
                    tr {
                        th { "ID" }
                        th { "Username" }
                        th { "Email" }
                        th { "Name" }
                        th { "Role" }
                        th { "Status" }
                        th { "" }
                    }
                }
                tbody {
                    for row in rows {
                        tr { key: "{row.id}",
                            td { "{row.id}" }
                            td { "{row.username}" }
                            td { "{row.email}" }
                            td { "{row.name}" }
                            td { "{row.role}" }
                            td { "{row.status}" }
                            td { class: "row-actions",
                                button {
                                    class: "btn-sm btn-ghost",
                                    onclick: {
                                        let record = row.record.clone();
                                        move |_| editing.set(Some((record.id(), UserDraft::from_record(&record))))
                                    },
                                    "Edit"
                                }
                                button {
                                    class: "btn-sm btn-ghost",
                                    onclick: {
                                        let record = row.record.clone();
                                        move |_| editing.set(Some((None, UserDraft::duplicate_of(&record))))
                                    },
                                    "Duplicate"
                                }
                                button {
                                    class: "btn-sm btn-danger",
                                    onclick: {
                                        let target = (row.id, row.username.clone());
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
                UserForm {
                    id: id,
                    draft: draft,
                    on_close: move |saved: bool| {
                        editing.set(None);
                        if saved {
                            state.refresh_users();
                        }
                    },
                }
            }

            if let Some((_, name)) = pending_delete() {
                ConfirmDialog {
                    message: "Delete user '{name}'?",
                    on_confirm: on_delete,
                    on_cancel: move |_| pending_delete.set(None),
                }
            }
        }
    }
}

/// Create/edit form for a user. `id` is `None` when creating.
#[component]
fn UserForm(id: Option<u64>, draft: UserDraft, on_close: EventHandler<bool>) -> Element {
    let state = use_context::<AppState>();
    let mut username = use_signal(|| draft.username.clone());
    let mut email = use_signal(|| draft.email.clone());
    let mut password = use_signal(String::new);
    let mut first_name = use_signal(|| draft.first_name.clone());
    let mut last_name = use_signal(|| draft.last_name.clone());
    let mut role = use_signal(|| draft.role);
    let mut active = use_signal(|| draft.active);
    let role_value = role().as_str();

    let on_save = move |_| {
        let draft = UserDraft {
            username: username(),
            email: email(),
            password: password(),
            first_name: first_name(),
            last_name: last_name(),
            role: role(),
            active: active(),
        };
        state.run(
            "Saving user",
            move |console| async move {
                match id {
                    Some(id) => console.update_user(id, &draft).await,
                    None => console.create_user(&draft).await,
                }
            },
            move |_| on_close.call(true),
        );
    };

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal glass-panel",
                h3 { if id.is_some() { "Edit User" } else { "New User" } }

                div { class: "form-group",
                    label { "Username" }
                    input { value: "{username}", oninput: move |evt| username.set(evt.value()) }
                }
                div { class: "form-group",
                    label { "Email" }
                    input { r#type: "email", value: "{email}", oninput: move |evt| email.set(evt.value()) }
                }
                div { class: "form-group",
                    label { if id.is_some() { "Password (leave empty to keep)" } else { "Password" } }
                    input { r#type: "password", value: "{password}", oninput: move |evt| password.set(evt.value()) }
                }
                div { class: "form-row",
                    div { class: "form-group",
                        label { "First name" }
                        input { value: "{first_name}", oninput: move |evt| first_name.set(evt.value()) }
                    }
                    div { class: "form-group",
                        label { "Last name" }
                        input { value: "{last_name}", oninput: move |evt| last_name.set(evt.value()) }
                    }
                }
                div { class: "form-group",
                    label { "Role" }
                    select {
                        value: "{role_value}",
                        onchange: move |evt| role.set(Role::parse(&evt.value()).unwrap_or_default()),
                        option { value: "ADMIN", "Admin" }
                        option { value: "EDITOR", "Editor" }
                        option { value: "VISITOR", "Visitor" }
                    }
                }
                label { class: "checkbox",
                    input {
                        r#type: "checkbox",
                        checked: active(),
                        onchange: move |evt| active.set(evt.checked()),
                    }
                    "Active"
                }

                div { class: "btn-group",
                    button { class: "btn-primary", onclick: on_save, "Save" }
                    button { class: "btn-ghost", onclick: move |_| on_close.call(false), "Cancel" }
                }
            }
        }
    }
}
