//! Small HTML/SVG element builder.
//!
//! Attribute values and text nodes are escaped; `Node::Raw` is emitted as-is
//! and is reserved for trusted content such as generated stylesheets.

use std::fmt::Display;

use indexmap::IndexMap;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Raw(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl Node {
    fn write_to(&self, out: &mut String) {
        match self {
            Self::Element(element) => element.write_to(out),
            Self::Text(text) => out.push_str(&escape(text)),
            Self::Raw(raw) => out.push_str(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    children: Vec<Node>,
    self_closing: bool,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Childless SVG element written as `<tag ... />`.
    #[must_use]
    pub fn svg_leaf(tag: impl Into<String>) -> Self {
        Self {
            self_closing: true,
            ..Self::new(tag)
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.attributes.insert(name.into(), value.to_string());
        self
    }

    #[must_use]
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.self_closing = false;
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.self_closing = false;
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    #[must_use]
    pub fn raw(self, raw: impl Into<String>) -> Self {
        self.child(Node::Raw(raw.into()))
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn to_html_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }

        if VOID_ELEMENTS.contains(&self.tag.as_str()) || self.self_closing {
            out.push_str(" />");
            return;
        }

        out.push('>');
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Escapes `& < > " '` for attribute values and text content.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{Element, escape};

    #[test]
    fn void_elements_self_close() {
        let html = Element::new("img").attr("src", "a.png").to_html_string();
        assert_eq!(html, r#"<img src="a.png" />"#);
    }

    #[test]
    fn attributes_and_text_are_escaped() {
        let html = Element::new("div")
            .attr("title", "a \"quoted\" <value>")
            .text("x & y")
            .to_html_string();
        assert_eq!(
            html,
            r#"<div title="a &quot;quoted&quot; &lt;value&gt;">x &amp; y</div>"#
        );
    }

    #[test]
    fn nested_children_render_in_order() {
        let html = Element::new("ul")
            .children(["a", "b"].map(|item| Element::new("li").text(item)))
            .to_html_string();
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(escape("'"), "&#x27;");
    }
}
