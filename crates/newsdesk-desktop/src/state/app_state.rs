//! # Application State
//!
//! Global state management using Dioxus signals and context.

use std::future::Future;

use dioxus::prelude::*;
use newsdesk_core::api::{RestClient, BASE_URL};
use newsdesk_core::{AdminConsole, AdminError, AdminResult, Listing};

/// Global application state.
///
/// Shared across all components via Dioxus context.
/// Use `use_context::<AppState>()` to access in components.
///
/// # Examples
///
/// ```rust,ignore
/// #[component]
/// fn MyComponent() -> Element {
///     let state = use_context::<AppState>();
///     let name = state.operator_name().unwrap_or_default();
///
///     rsx! {
///         p { "Signed in as {name}" }
///     }
/// }
/// ```
#[derive(Clone, Copy)]
pub struct AppState {
    /// The console, holding the session while logged in.
    pub console: Signal<AdminConsole>,

    /// Label of the backend call in flight, if any.
    pub busy: Signal<Option<String>>,

    /// Blocking error message, if any.
    pub alert: Signal<Option<String>>,

    // ==================== Cached Listings ====================
    pub users: Signal<Listing>,
    pub articles: Signal<Listing>,
    pub categories: Signal<Listing>,
    pub tokens: Signal<Listing>,
}

fn console() -> AdminConsole {
    AdminConsole::new(RestClient::with_http(BASE_URL, reqwest::Client::new()))
}

impl AppState {
    /// Creates the application state with a logged-out console.
    #[must_use]
    pub fn new() -> Self {
        Self {
            console: Signal::new(console()),
            busy: Signal::new(None),
            alert: Signal::new(None),
            users: Signal::new(Listing::default()),
            articles: Signal::new(Listing::default()),
            categories: Signal::new(Listing::default()),
            tokens: Signal::new(Listing::default()),
        }
    }

    // ==================== Session ====================

    /// Check if an operator is logged in.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.console.read().session().is_some()
    }

    /// Username of the operator, if logged in.
    #[must_use]
    pub fn operator_name(&self) -> Option<String> {
        self.console
            .read()
            .session()
            .map(|s| s.operator().username.clone())
    }

    /// Closes the session and forgets every cached listing.
    pub fn logout(&mut self) {
        self.console.write().logout();
        self.users.set(Listing::default());
        self.articles.set(Listing::default());
        self.categories.set(Listing::default());
        self.tokens.set(Listing::default());
    }

    // ==================== Backend Calls ====================

    /// Whether a backend call is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.read().is_some()
    }

    /// Runs one backend call with the console, showing the loading overlay
    /// until it completes. Errors are shown as a blocking alert.
    pub fn run<T, W, Fut, D>(&self, label: &str, work: W, done: D)
    where
        T: 'static,
        W: FnOnce(AdminConsole) -> Fut + 'static,
        Fut: Future<Output = AdminResult<T>> + 'static,
        D: FnOnce(T) + 'static,
    {
        let mut alert = self.alert;
        self.run_with(label, work, done, move |e| alert.set(Some(e.to_string())));
    }

    /// Like [`AppState::run`], with a custom error handler.
    ///
    /// A call is refused while another one is in flight. Signals are peeked,
    /// so calling this from an effect does not subscribe the effect.
    pub fn run_with<T, W, Fut, D, F>(&self, label: &str, work: W, done: D, failed: F)
    where
        T: 'static,
        W: FnOnce(AdminConsole) -> Fut + 'static,
        Fut: Future<Output = AdminResult<T>> + 'static,
        D: FnOnce(T) + 'static,
        F: FnOnce(AdminError) + 'static,
    {
        let mut busy = self.busy;
        if let Some(current) = busy.peek().as_ref() {
            tracing::debug!(%current, refused = label, "backend call already in flight");
            return;
        }

        busy.set(Some(label.to_string()));
        let console = self.console.peek().clone();

        spawn(async move {
            let result = work(console).await;
            busy.set(None);
            match result {
                Ok(value) => done(value),
                Err(e) => failed(e),
            }
        });
    }

    // ==================== Listings ====================

    /// Reloads the user listing.
    pub fn refresh_users(&self) {
        let mut users = self.users;
        self.run(
            "Loading users",
            |console| async move { console.list_users().await },
            move |records| users.set(Listing::new(records)),
        );
    }

    /// Reloads the article listing, together with the categories used by
    /// its filter and forms.
    pub fn refresh_articles(&self) {
        let mut articles = self.articles;
        let mut categories = self.categories;
        self.run(
            "Loading articles",
            |console| async move {
                let list = console.list_articles().await?;
                let cats = console.list_categories().await?;
                Ok::<_, AdminError>((list, cats))
            },
            move |(list, cats)| {
                articles.set(Listing::new(list));
                categories.set(Listing::new(cats));
            },
        );
    }

    /// Reloads the category listing, together with the articles used for
    /// the per-category counts.
    pub fn refresh_categories(&self) {
        let mut articles = self.articles;
        let mut categories = self.categories;
        self.run(
            "Loading categories",
            |console| async move {
                let cats = console.list_categories().await?;
                let list = console.list_articles().await?;
                Ok::<_, AdminError>((cats, list))
            },
            move |(cats, list)| {
                categories.set(Listing::new(cats));
                articles.set(Listing::new(list));
            },
        );
    }

    /// Reloads the token listing.
    pub fn refresh_tokens(&self) {
        let mut tokens = self.tokens;
        self.run(
            "Loading tokens",
            |console| async move { console.list_tokens().await },
            move |records| tokens.set(Listing::new(records)),
        );
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
