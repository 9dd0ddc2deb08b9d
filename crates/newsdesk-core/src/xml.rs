//! # XML Tree
//!
//! Minimal owned XML document model built on `quick-xml` events.
//!
//! Shared by the SOAP transport (service descriptions and envelopes) and the
//! XML response renderer. Namespaces are kept as written; lookups go by
//! local name.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Errors raised while building a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// Tokenizer rejected the input.
    #[error("xml syntax error: {0}")]
    Syntax(String),

    /// Input ended with open elements, or closed one never opened.
    #[error("unbalanced element nesting")]
    Unbalanced,

    /// More than one top-level element.
    #[error("junk after document element")]
    MultipleRoots,

    /// Character data outside the document element.
    #[error("text outside the document element")]
    TextOutsideRoot,

    /// No document element at all.
    #[error("no document element")]
    Empty,
}

fn syntax(e: impl std::fmt::Display) -> XmlError {
    XmlError::Syntax(e.to_string())
}

/// A node inside an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Child element.
    Element(Element),
    /// Unescaped character data (CDATA included).
    Text(String),
    /// Comment body, without the `<!--`/`-->` delimiters.
    Comment(String),
}

/// An element with its attributes and children, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Qualified name as written (`soap:Body`).
    pub name: String,
    /// Attributes as written, values unescaped.
    pub attributes: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(syntax)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(syntax)?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            children: Vec::new(),
        })
    }

    /// Name without its namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        local(&self.name)
    }

    /// Attribute value by local name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| local(key) == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// First child element with the given local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|el| el.local_name() == name)
    }

    /// All descendants (depth-first) with the given local name.
    #[must_use]
    pub fn descendants(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for el in self.elements() {
            if el.local_name() == name {
                found.push(el);
            }
            el.collect_descendants(name, found);
        }
    }

    /// Concatenated direct text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether the element has element children.
    #[must_use]
    pub fn has_elements(&self) -> bool {
        self.elements().next().is_some()
    }
}

fn local(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// A parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Content of the XML declaration (`version="1.0"`), if present.
    pub declaration: Option<String>,
    /// Comments before the document element.
    pub prolog: Vec<Node>,
    /// The document element.
    pub root: Element,
    /// Comments after the document element.
    pub epilog: Vec<Node>,
}

impl Document {
    /// Parses a complete document.
    ///
    /// # Errors
    ///
    /// Returns an [`XmlError`] for malformed input, unbalanced tags, several
    /// top-level elements or stray text outside the document element.
    pub fn parse(input: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(input);
        let mut declaration = None;
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<Element> = None;
        let mut stack: Vec<Element> = Vec::new();

        loop {
            let node = match reader.read_event().map_err(syntax)? {
                Event::Decl(decl) => {
                    declaration = Some(String::from_utf8_lossy(&decl).trim().to_string());
                    continue;
                }
                Event::Start(start) => {
                    stack.push(Element::open(&start)?);
                    continue;
                }
                Event::Empty(start) => Node::Element(Element::open(&start)?),
                Event::End(_) => Node::Element(stack.pop().ok_or(XmlError::Unbalanced)?),
                Event::Text(text) => Node::Text(text.unescape().map_err(syntax)?.into_owned()),
                Event::CData(data) => Node::Text(String::from_utf8_lossy(&data).into_owned()),
                Event::Comment(comment) => {
                    Node::Comment(String::from_utf8_lossy(&comment).into_owned())
                }
                Event::PI(_) | Event::DocType(_) => continue,
                Event::Eof => break,
            };

            if let Some(parent) = stack.last_mut() {
                parent.children.push(node);
                continue;
            }

            match node {
                Node::Element(el) => {
                    if root.is_some() {
                        return Err(XmlError::MultipleRoots);
                    }
                    root = Some(el);
                }
                Node::Text(text) if text.trim().is_empty() => {}
                Node::Text(_) => return Err(XmlError::TextOutsideRoot),
                comment @ Node::Comment(_) => {
                    if root.is_some() {
                        epilog.push(comment);
                    } else {
                        prolog.push(comment);
                    }
                }
            }
        }

        if !stack.is_empty() {
            return Err(XmlError::Unbalanced);
        }

        Ok(Self {
            declaration,
            prolog,
            root: root.ok_or(XmlError::Empty)?,
            epilog,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_attributes_and_text() {
        let doc = Document::parse(r#"<r><a x="1">t &amp; u</a></r>"#).unwrap();
        let a = doc.root.child("a").unwrap();

        assert_eq!(a.attribute("x"), Some("1"));
        assert_eq!(a.text(), "t & u");
    }

    #[test]
    fn test_parse_declaration_and_comments() {
        let doc = Document::parse("<?xml version=\"1.0\"?>\n<!-- top --><r/>").unwrap();

        assert_eq!(doc.declaration.as_deref(), Some("xml version=\"1.0\""));
        assert_eq!(doc.prolog, vec![Node::Comment(" top ".to_string())]);
        assert_eq!(doc.root.name, "r");
    }

    #[test]
    fn test_local_name_lookup_ignores_prefix() {
        let doc = Document::parse(
            r#"<soap:Envelope xmlns:soap="urn:x"><soap:Body><ns2:op/></soap:Body></soap:Envelope>"#,
        )
        .unwrap();

        let body = doc.root.child("Body").unwrap();
        assert_eq!(body.elements().next().unwrap().local_name(), "op");
    }

    #[test]
    fn test_unclosed_element_is_rejected() {
        assert!(Document::parse("<r><a></r>").is_err());
        assert!(Document::parse("<r><a>").is_err());
    }

    #[test]
    fn test_second_root_is_rejected() {
        assert_eq!(Document::parse("<a/><b/>"), Err(XmlError::MultipleRoots));
    }

    #[test]
    fn test_stray_text_is_rejected() {
        assert_eq!(Document::parse("hello"), Err(XmlError::TextOutsideRoot));
        assert_eq!(Document::parse("   "), Err(XmlError::Empty));
    }
}
