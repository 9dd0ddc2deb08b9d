use once_cell::sync::Lazy;
use quick_xml::escape::{escape, partial_escape};
use regex::Regex;

use super::{push_matches, Rendered, Span, Style};
use crate::xml::{Document, Element, Node};

const INDENT: &str = "  ";

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[^>]+>").expect("Invalid regex"));
static ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([\w:.-]+)="([^"]*)""#).expect("Invalid regex"));
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid regex"));

/// Pretty-prints an XML body, one element per line, two spaces per level.
#[must_use]
pub fn render_xml(body: &str) -> Rendered {
    let doc = match Document::parse(body) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!(error = %e, "body is not XML, showing it raw");
            return Rendered::plain(body);
        }
    };

    let text = pretty(&doc);

    let mut spans = Vec::new();
    push_matches(&mut spans, &TAG, &text, 0, Style::Tag);
    push_attributes(&mut spans, &text);
    push_matches(&mut spans, &COMMENT, &text, 0, Style::Comment);

    Rendered { text, spans }
}

/// Attribute names and quoted values, searched only inside tags so that
/// `name="value"` in text content stays unstyled.
fn push_attributes(spans: &mut Vec<Span>, text: &str) {
    for tag in TAG.find_iter(text) {
        if tag.as_str().starts_with("<!--") {
            continue;
        }
        for caps in ATTRIBUTE.captures_iter(tag.as_str()) {
            if let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) {
                let offset = tag.start();
                spans.push(Span {
                    range: offset + name.start()..offset + name.end(),
                    style: Style::Attribute,
                });
                spans.push(Span {
                    range: offset + value.start() - 1..offset + value.end() + 1,
                    style: Style::Value,
                });
            }
        }
    }
}

fn pretty(doc: &Document) -> String {
    let mut lines = Vec::new();
    if let Some(decl) = &doc.declaration {
        lines.push(format!("<?{decl}?>"));
    }
    for node in &doc.prolog {
        write_node(node, 0, &mut lines);
    }
    write_element(&doc.root, 0, &mut lines);
    for node in &doc.epilog {
        write_node(node, 0, &mut lines);
    }
    lines.join("\n")
}

fn open_tag(el: &Element) -> String {
    let mut tag = format!("<{}", el.name);
    for (key, value) in &el.attributes {
        tag.push_str(&format!(" {key}=\"{}\"", escape(value.as_str())));
    }
    tag
}

fn write_element(el: &Element, depth: usize, lines: &mut Vec<String>) {
    let pad = INDENT.repeat(depth);
    let open = open_tag(el);
    let has_markup = el
        .children
        .iter()
        .any(|node| !matches!(node, Node::Text(_)));

    if !has_markup {
        let text = el.text();
        if text.trim().is_empty() {
            lines.push(format!("{pad}{open} />"));
        } else {
            lines.push(format!("{pad}{open}>{}</{}>", partial_escape(text.as_str()), el.name));
        }
        return;
    }

    lines.push(format!("{pad}{open}>"));
    for node in &el.children {
        write_node(node, depth + 1, lines);
    }
    lines.push(format!("{pad}</{}>", el.name));
}

fn write_node(node: &Node, depth: usize, lines: &mut Vec<String>) {
    match node {
        Node::Element(el) => write_element(el, depth, lines),
        Node::Text(text) => {
            let text = text.trim();
            if !text.is_empty() {
                lines.push(format!("{}{}", INDENT.repeat(depth), partial_escape(text)));
            }
        }
        Node::Comment(body) => lines.push(format!("{}<!--{body}-->", INDENT.repeat(depth))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_element_with_attribute() {
        let rendered = render_xml(r#"<r><a x="1">t</a></r>"#);

        assert_eq!(rendered.text, "<r>\n  <a x=\"1\">t</a>\n</r>");
        assert_eq!(rendered.tokens(Style::Attribute), vec!["x"]);
        assert_eq!(rendered.tokens(Style::Value), vec!["\"1\""]);
        assert_eq!(
            rendered.tokens(Style::Tag),
            vec!["<r>", "<a x=\"1\">", "</a>", "</r>"]
        );
    }

    #[test]
    fn test_assignments_in_text_are_not_attributes() {
        let rendered = render_xml(r#"<a k="v">say x="1"</a>"#);

        assert_eq!(rendered.text, "<a k=\"v\">say x=\"1\"</a>");
        assert_eq!(rendered.tokens(Style::Attribute), vec!["k"]);
        assert_eq!(rendered.tokens(Style::Value), vec!["\"v\""]);
    }

    #[test]
    fn test_whitespace_is_normalised() {
        let rendered = render_xml("<list>\n\n   <item/>   <item>  </item>\n</list>");
        assert_eq!(rendered.text, "<list>\n  <item />\n  <item />\n</list>");
    }

    #[test]
    fn test_declaration_and_comments_are_kept() {
        let rendered = render_xml(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><articles><!-- none yet --></articles>",
        );

        assert_eq!(
            rendered.text,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<articles>\n  <!-- none yet -->\n</articles>"
        );
        assert_eq!(rendered.tokens(Style::Comment), vec!["<!-- none yet -->"]);

        let last_comment = rendered
            .segments()
            .into_iter()
            .find(|s| s.text.contains("none yet"))
            .unwrap();
        assert_eq!(last_comment.style, Some(Style::Comment));
    }

    #[test]
    fn test_mixed_content_and_escapes() {
        let rendered = render_xml("<p>a &amp; b<b>c</b>tail</p>");
        assert_eq!(rendered.text, "<p>\n  a &amp; b\n  <b>c</b>\n  tail\n</p>");
    }

    #[test]
    fn test_rerender_is_identical() {
        let body = r#"<?xml version="1.0"?><root xmlns:n="urn:n"><n:a id="1" q="x &amp; &quot;y&quot;">t &lt; u</n:a><!--c--><b>mixed<c/></b></root>"#;
        let first = render_xml(body);
        let second = render_xml(&first.text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_renders_raw() {
        let body = "<a><b></a>";
        let rendered = render_xml(body);

        assert_eq!(rendered.text, body);
        assert!(rendered.is_plain());
    }
}
