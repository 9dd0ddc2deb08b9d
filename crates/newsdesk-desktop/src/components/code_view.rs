//! # Code View
//!
//! Read-only view of a rendered response body.

use dioxus::prelude::*;
use newsdesk_core::{Rendered, Style};

fn css(style: Style) -> String {
    if style.italic() {
        format!("color: {}; font-style: italic", style.color())
    } else {
        format!("color: {}", style.color())
    }
}

/// Shows rendered text with its resolved token colors.
#[component]
pub fn CodeView(rendered: Rendered) -> Element {
    let segments = rendered.segments();

    rsx! {
        pre { class: "code-view mono",
            for segment in segments {
                match segment.style {
                    Some(style) => rsx! {
                        span { style: css(style), "{segment.text}" }
                    },
                    None => rsx! { span { "{segment.text}" } },
                }
            }
        }
    }
}
