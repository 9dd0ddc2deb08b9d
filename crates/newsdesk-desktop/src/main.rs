//! # Newsdesk Desktop
//!
//! Native administration client for the news platform backend.
//!
//! ## Architecture
//!
//! All backend work goes through [`newsdesk_core::AdminConsole`]; this crate
//! only renders state and forwards operator actions. Calls run one at a
//! time: while one is in flight a loading overlay is shown and further
//! actions are refused.
//!
//! ## Modules
//!
//! - [`components`] - Layout, overlays and the highlighted code view
//! - [`router`] - Application routes
//! - [`state`] - Global application state
//! - [`views`] - Page-level view components

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use dioxus::prelude::*;
use tracing_subscriber::EnvFilter;

mod components;
mod router;
mod state;
mod views;

use router::Route;
use state::AppState;

fn main() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");

    tracing::info!("Starting Newsdesk");

    let cfg = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Newsdesk Administration")
            .with_inner_size(LogicalSize::new(1280.0, 820.0))
            .with_min_inner_size(LogicalSize::new(960.0, 600.0)),
    );

    dioxus::LaunchBuilder::desktop().with_cfg(cfg).launch(App);
}

/// Root application component.
#[component]
fn App() -> Element {
    use_context_provider(AppState::new);

    rsx! {
        document::Stylesheet { href: asset!("/assets/styles.css") }
        Router::<Route> {}
    }
}
