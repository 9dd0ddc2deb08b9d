use dioxus::prelude::*;

/// Filter input for a cached listing.
#[component]
pub fn SearchBar(value: Signal<String>, placeholder: String) -> Element {
    let mut value = value;

    rsx! {
        input {
            class: "search-input",
            r#type: "search",
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |evt| value.set(evt.value()),
        }
    }
}
