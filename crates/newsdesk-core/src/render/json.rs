use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{push_matches, Rendered, Style};

const STRING: &str = r#""(?:[^"\\]|\\.)*""#;

/// Object key at the start of a line, up to (not including) the colon.
static KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?m)^\s*({STRING}):")).expect("Invalid regex"));

fn value_pattern(value: &str) -> Regex {
    Regex::new(&format!(r"(?m)(?:^\s*|: )({value}),?$")).expect("Invalid regex")
}

static STRING_VALUE: Lazy<Regex> = Lazy::new(|| value_pattern(STRING));
static NUMBER_VALUE: Lazy<Regex> =
    Lazy::new(|| value_pattern(r"-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?"));
static BOOLEAN_VALUE: Lazy<Regex> = Lazy::new(|| value_pattern("true|false"));
static NULL_VALUE: Lazy<Regex> = Lazy::new(|| value_pattern("null"));

/// Pretty-prints a JSON body with two-space indentation, keeping key order.
#[must_use]
pub fn render_json(body: &str) -> Rendered {
    let text = match serde_json::from_str::<Value>(body).and_then(|v| serde_json::to_string_pretty(&v)) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(error = %e, "body is not JSON, showing it raw");
            return Rendered::plain(body);
        }
    };

    let mut spans = Vec::new();
    push_matches(&mut spans, &KEY, &text, 1, Style::Key);
    push_matches(&mut spans, &STRING_VALUE, &text, 1, Style::String);
    push_matches(&mut spans, &NUMBER_VALUE, &text, 1, Style::Number);
    push_matches(&mut spans, &BOOLEAN_VALUE, &text, 1, Style::Boolean);
    push_matches(&mut spans, &NULL_VALUE, &text, 1, Style::Null);

    Rendered { text, spans }
}
