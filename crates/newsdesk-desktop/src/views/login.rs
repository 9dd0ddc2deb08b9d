//! # Login View
//!
//! Operator authentication. Only administrators may sign in.

use dioxus::prelude::*;
use newsdesk_core::api::BASE_URL;
use newsdesk_core::AdminError;

use crate::components::BusyOverlay;
use crate::router::Route;
use crate::state::AppState;

/// Login view component.
///
/// Authentication errors are shown inline rather than as an alert.
#[component]
pub fn Login() -> Element {
    let state = use_context::<AppState>();
    let nav = use_navigator();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    if state.is_logged_in() {
        nav.replace(Route::Dashboard {});
    }

    let mut do_login = move || {
        let user = username.read().clone();
        let pass = password.read().clone();
        let mut console_signal = state.console;
        error.set(None);

        state.run_with(
            "Signing in",
            move |mut console| async move {
                console.login(&user, &pass).await?;
                Ok::<_, AdminError>(console)
            },
            move |console| {
                console_signal.set(console);
                password.set(String::new());
                nav.replace(Route::Dashboard {});
            },
            move |e| error.set(Some(e.to_string())),
        );
    };

    let busy = state.is_busy();

    rsx! {
        div { class: "login-view",
            div { class: "login-card glass-panel",
                div { class: "login-header",
                    h1 { "Newsdesk" }
                    p { class: "text-secondary", "News platform administration" }
                }

                div { class: "login-form",
                    div { class: "form-group",
                        label { r#for: "username", "Username" }
                        input {
                            id: "username",
                            r#type: "text",
                            placeholder: "Enter your username",
                            value: "{username}",
                            disabled: busy,
                            oninput: move |evt| username.set(evt.value()),
                        }
                    }

                    div { class: "form-group",
                        label { r#for: "password", "Password" }
                        input {
                            id: "password",
                            r#type: "password",
                            placeholder: "Enter your password",
                            value: "{password}",
                            disabled: busy,
                            oninput: move |evt| password.set(evt.value()),
                            onkeypress: move |evt| {
                                if evt.key() == Key::Enter && !state.is_busy() {
                                    do_login();
                                }
                            },
                        }
                    }

                    if let Some(err) = error.read().as_ref() {
                        div { class: "alert alert-error", "{err}" }
                    }

                    button {
                        class: "btn-primary btn-lg btn-block",
                        disabled: busy,
                        onclick: move |_| do_login(),
                        if busy { "Signing in..." } else { "Sign in" }
                    }

                    p { class: "login-hint text-tertiary",
                        "Backend: {BASE_URL}"
                    }
                }
            }

            BusyOverlay {}
        }
    }
}
