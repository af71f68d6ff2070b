//! Minimal markup tree.
//!
//! Every [`Node::Text`] and every attribute value is escaped on
//! serialization. Unescaped markup can only enter through [`Node::Raw`],
//! which takes a `&'static str`, or through [`script_json`], whose payload
//! comes from [`json_for_script`].

use serde::Serialize;

use crate::escape::{escape_html, json_for_script};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Raw(&'static str),
    /// JSON already made safe for a script element.
    ScriptData(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

/// Shorthand for [`Element::new`].
pub fn el(tag: &'static str) -> Element {
    Element::new(tag)
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Space-joins the non-empty classes.
    pub fn classes<'a>(self, classes: impl IntoIterator<Item = &'a str>) -> Self {
        let joined = classes
            .into_iter()
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        self.class(joined)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<N: Into<Node>>(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn raw(self, markup: &'static str) -> Self {
        self.child(Node::Raw(markup))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

/// `<script type="application/json" id="...">` holding `value`.
pub fn script_json<T: Serialize>(id: &str, value: &T) -> Result<Element> {
    let json = json_for_script(value)?;
    Ok(el("script")
        .attr("type", "application/json")
        .id(id)
        .child(Node::ScriptData(json)))
}

/// Serializes a complete document with the HTML5 doctype.
pub fn render_document(lang: &str, head: Element, body: Element) -> String {
    let html = el("html").attr("lang", lang).child(head).child(body);
    let mut out = String::from("<!DOCTYPE html>\n");
    write_element(&html, &mut out);
    out.push('\n');
    out
}

/// Elements that take no closing tag.
#[inline]
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(element) => write_element(element, out),
        Node::Text(text) => out.push_str(&escape_html(text)),
        Node::Raw(markup) => out.push_str(markup),
        Node::ScriptData(json) => out.push_str(json),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
    }
    out.push('>');
    if is_void_element(element.tag) {
        return;
    }
    for child in &element.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(element.tag);
    out.push('>');
}
