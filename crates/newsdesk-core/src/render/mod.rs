//! # Response Renderer
//!
//! Pretty-prints JSON and XML bodies and marks up their tokens for display.
//!
//! Rendering is a pure function of the body. Each format is reformatted
//! first and then scanned by independent tokenization passes; every pass
//! contributes [`Span`]s over the reformatted text. Spans from different
//! passes may overlap: [`Rendered::segments`] resolves them for display,
//! with later passes winning. A body that does not parse is returned
//! verbatim with no spans.

mod json;
mod xml;

use std::ops::Range;

use crate::api::ResponseFormat;

pub use json::render_json;
pub use xml::render_xml;

/// Token classes recognised by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// JSON object key.
    Key,
    /// JSON string value.
    String,
    /// JSON number.
    Number,
    /// JSON `true`/`false`.
    Boolean,
    /// JSON `null`.
    Null,
    /// XML tag, from `<` to `>`.
    Tag,
    /// XML attribute name.
    Attribute,
    /// XML attribute value, quotes included.
    Value,
    /// XML comment.
    Comment,
}

impl Style {
    /// Display color.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Key | Self::Attribute => "#FF9500",
            Self::String | Self::Value => "#34C759",
            Self::Number | Self::Tag => "#007AFF",
            Self::Boolean => "#FF3B30",
            Self::Null | Self::Comment => "#8E8E93",
        }
    }

    /// Whether the token is shown in italics.
    #[must_use]
    pub fn italic(self) -> bool {
        self == Self::Comment
    }
}

/// A styled byte range of the rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte range into [`Rendered::text`].
    pub range: Range<usize>,
    /// Style applied to the range.
    pub style: Style,
}

/// A maximal run of text with a single resolved style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The run of text.
    pub text: &'a str,
    /// Resolved style, `None` for unstyled text.
    pub style: Option<Style>,
}

/// Reformatted text plus the spans found in it, in pass order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    /// Pretty-printed body, or the raw body when it could not be parsed.
    pub text: String,
    /// Highlight spans; empty for raw text.
    pub spans: Vec<Span>,
}

impl Rendered {
    /// Raw, unstyled text.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Whether no token was marked.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.spans.is_empty()
    }

    /// Text covered by a span.
    #[must_use]
    pub fn slice(&self, span: &Span) -> &str {
        &self.text[span.range.clone()]
    }

    /// Spans of one style, as text.
    #[must_use]
    pub fn tokens(&self, style: Style) -> Vec<&str> {
        self.spans
            .iter()
            .filter(|span| span.style == style)
            .map(|span| self.slice(span))
            .collect()
    }

    /// Splits the text into non-overlapping runs. Where spans overlap, the
    /// one added last wins.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let mut styles: Vec<Option<Style>> = vec![None; self.text.len()];
        for span in &self.spans {
            for slot in &mut styles[span.range.clone()] {
                *slot = Some(span.style);
            }
        }

        let mut segments = Vec::new();
        let mut start = 0;
        for end in 1..=styles.len() {
            if end == styles.len() || styles[end] != styles[start] {
                segments.push(Segment {
                    text: &self.text[start..end],
                    style: styles[start],
                });
                start = end;
            }
        }
        segments
    }
}

/// Renders a body in the given format.
#[must_use]
pub fn render(body: &str, format: ResponseFormat) -> Rendered {
    match format {
        ResponseFormat::Json => render_json(body),
        ResponseFormat::Xml => render_xml(body),
    }
}

fn push_matches(spans: &mut Vec<Span>, re: &regex::Regex, text: &str, group: usize, style: Style) {
    for caps in re.captures_iter(text) {
        if let Some(m) = caps.get(group) {
            spans.push(Span {
                range: m.range(),
                style,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_later_span_wins() {
        let rendered = Rendered {
            text: "<a x=\"1\">".to_string(),
            spans: vec![
                Span {
                    range: 0..9,
                    style: Style::Tag,
                },
                Span {
                    range: 3..4,
                    style: Style::Attribute,
                },
                Span {
                    range: 5..8,
                    style: Style::Value,
                },
            ],
        };

        let segments = rendered.segments();
        let texts: Vec<_> = segments.iter().map(|s| (s.text, s.style)).collect();
        assert_eq!(
            texts,
            vec![
                ("<a ", Some(Style::Tag)),
                ("x", Some(Style::Attribute)),
                ("=", Some(Style::Tag)),
                ("\"1\"", Some(Style::Value)),
                (">", Some(Style::Tag)),
            ]
        );
    }

    #[test]
    fn test_segments_of_plain_text() {
        let rendered = Rendered::plain("raw");
        assert_eq!(
            rendered.segments(),
            vec![Segment {
                text: "raw",
                style: None
            }]
        );
        assert!(Rendered::plain("").segments().is_empty());
    }

    #[test]
    fn test_render_dispatches_on_format() {
        assert!(render("<r/>", ResponseFormat::Json).is_plain());
        assert!(!render("<r/>", ResponseFormat::Xml).is_plain());
    }
}
