//! # Dashboard View
//!
//! Collection counters for the backend.

use dioxus::prelude::*;
use newsdesk_core::DashboardStats;

use crate::router::Route;
use crate::state::AppState;

#[component]
fn StatCard(label: String, value: usize, to: Route) -> Element {
    rsx! {
        Link { to: to,
            div { class: "stat-card glass-panel",
                div { class: "stat-value", "{value}" }
                div { class: "stat-label text-secondary", "{label}" }
            }
        }
    }
}

/// Dashboard view. Collections that fail to load count as zero.
#[component]
pub fn Dashboard() -> Element {
    let state = use_context::<AppState>();
    let mut stats = use_signal(|| Option::<DashboardStats>::None);

    let mut load = move || {
        state.run(
            "Loading statistics",
            |console| async move { console.dashboard_stats().await },
            move |loaded| stats.set(Some(loaded)),
        );
    };

    use_effect(move || load());

    let username = state.operator_name().unwrap_or_default();

    rsx! {
        div { class: "dashboard-view",
            div { class: "view-header",
                h2 { "Welcome, {username}" }
                button { class: "btn-ghost", onclick: move |_| load(), "Refresh" }
            }

            match stats() {
                Some(s) => rsx! {
                    div { class: "stat-grid",
                        StatCard { label: "Users", value: s.users, to: Route::Users {} }
                        StatCard { label: "Active users", value: s.active_users, to: Route::Users {} }
                        StatCard { label: "Articles", value: s.articles, to: Route::Articles {} }
                        StatCard { label: "Categories", value: s.categories, to: Route::Categories {} }
                    }
                },
                None => rsx! {
                    p { class: "text-secondary", "No statistics loaded yet." }
                },
            }
        }
    }
}
