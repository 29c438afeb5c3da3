//! Minimal element tree used to build and update charts, and the page body they are appended to.
//!
//! Charts are plain trees of [`Element`]s. A [`Page`] plays the role of the document body:
//! every render call appends a new chart, nothing is ever removed implicitly.
//!
//! ```
//! use rusty_snn_viz::svg::Element;
//!
//! let mut svg = Element::new("svg").attr("width", 960);
//! svg.append(Element::new("g").attr("class", "x axis"));
//! assert!(svg.select(".x.axis").is_some());
//! assert_eq!(svg.to_string(), "<svg width=\"960\"><g class=\"x axis\"/></svg>");
//! ```
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::VizError;

/// The SVG namespace, required on the root of standalone documents.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Default styling for the CSS hooks of the charts (axes, lines and labels).
pub const DEFAULT_STYLE: &str = "\
body { font: 10px sans-serif; }
.axis path, .axis line { fill: none; stroke: #000; shape-rendering: crispEdges; }
.line { fill: none; stroke-width: 1.5px; }
.title { font-size: 14px; font-weight: bold; }
.label { font-size: 12px; }";

/// A node of the tree, either an element or a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create a new element without attributes nor children.
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            attributes: vec![],
            children: vec![],
        }
    }

    /// Returns the element with the given attribute set.
    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Returns the element with its children replaced by the given text.
    pub fn text(mut self, text: impl ToString) -> Self {
        self.children = vec![Node::Text(text.to_string())];
        self
    }

    /// Returns the element with the given child appended.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Returns the element with the given children appended.
    pub fn children_from<I: IntoIterator<Item = Element>>(mut self, children: I) -> Self {
        self.extend(children);
        self
    }

    /// Set an attribute, replacing its previous value if any. The attribute order is preserved.
    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, old)) => *old = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|(key, _)| key != name);
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Append a child after the existing ones.
    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn extend<I: IntoIterator<Item = Element>>(&mut self, children: I) {
        self.children
            .extend(children.into_iter().map(Node::Element));
    }

    /// Remove all children.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Returns an iterator over the child elements (text nodes are skipped).
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Returns the concatenated text of the element and its descendants.
    pub fn text_content(&self) -> String {
        let mut content = String::new();
        for node in self.children.iter() {
            match node {
                Node::Text(text) => content.push_str(text),
                Node::Element(el) => content.push_str(&el.text_content()),
            }
        }
        content
    }

    /// Returns true if the class attribute contains all the given classes.
    pub fn has_classes(&self, classes: &[&str]) -> bool {
        let own: Vec<&str> = self
            .get_attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default();
        classes.iter().all(|c| own.contains(c))
    }

    /// Returns the first descendant matching the selector, in document order.
    /// Selectors are a tag name and/or a chain of classes, e.g., `circle`, `.x.axis` or `path.line`.
    pub fn select(&self, selector: &str) -> Option<&Element> {
        self.find(&Selector::parse(selector))
    }

    pub fn select_mut(&mut self, selector: &str) -> Option<&mut Element> {
        self.find_mut(&Selector::parse(selector))
    }

    /// Returns all descendants matching the selector, in document order.
    /// The descendants of a matching element are not searched.
    pub fn select_all(&self, selector: &str) -> Vec<&Element> {
        let mut found = vec![];
        self.collect(&Selector::parse(selector), &mut found);
        found
    }

    pub fn select_all_mut(&mut self, selector: &str) -> Vec<&mut Element> {
        let mut found = vec![];
        self.collect_mut(&Selector::parse(selector), &mut found);
        found
    }

    fn find(&self, selector: &Selector) -> Option<&Element> {
        for el in self.children() {
            if selector.matches(el) {
                return Some(el);
            }
            if let Some(found) = el.find(selector) {
                return Some(found);
            }
        }
        None
    }

    fn find_mut(&mut self, selector: &Selector) -> Option<&mut Element> {
        for node in self.children.iter_mut() {
            if let Node::Element(el) = node {
                if selector.matches(el) {
                    return Some(el);
                }
                if let Some(found) = el.find_mut(selector) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn collect<'a>(&'a self, selector: &Selector, found: &mut Vec<&'a Element>) {
        for el in self.children() {
            if selector.matches(el) {
                found.push(el);
            } else {
                el.collect(selector, found);
            }
        }
    }

    fn collect_mut<'a>(&'a mut self, selector: &Selector, found: &mut Vec<&'a mut Element>) {
        for node in self.children.iter_mut() {
            if let Node::Element(el) = node {
                if selector.matches(el) {
                    found.push(el);
                } else {
                    el.collect_mut(selector, found);
                }
            }
        }
    }

    /// Returns the element as a standalone SVG document, with namespace and default style.
    pub fn to_svg_document(&self) -> String {
        let mut root = self.clone();
        if root.get_attr("xmlns").is_none() {
            root.attributes
                .insert(0, ("xmlns".to_string(), SVG_NAMESPACE.to_string()));
        }
        root.children.insert(
            0,
            Node::Element(Element::new("style").text(DEFAULT_STYLE)),
        );
        format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}\n", root)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in self.attributes.iter() {
            write!(f, " {}=\"{}\"", name, escape(value, true))?;
        }
        if self.children.is_empty() {
            return write!(f, "/>");
        }
        write!(f, ">")?;
        for node in self.children.iter() {
            match node {
                Node::Element(el) => write!(f, "{}", el)?,
                Node::Text(text) => write!(f, "{}", escape(text, false))?,
            }
        }
        write!(f, "</{}>", self.tag)
    }
}

fn escape(raw: &str, quotes: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if quotes => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

struct Selector<'a> {
    tag: Option<&'a str>,
    classes: Vec<&'a str>,
}

impl<'a> Selector<'a> {
    fn parse(selector: &'a str) -> Self {
        let mut parts = selector.trim().split('.');
        let tag = parts.next().filter(|tag| !tag.is_empty());
        let classes = parts.filter(|c| !c.is_empty()).collect();
        Selector { tag, classes }
    }

    fn matches(&self, el: &Element) -> bool {
        self.tag.map_or(true, |tag| el.tag == tag) && el.has_classes(&self.classes)
    }
}

/// The body of a page, holding the charts in the order they were appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    body: Vec<Element>,
}

impl Page {
    pub fn new() -> Self {
        Page { body: vec![] }
    }

    /// Append an element to the body and return its position.
    /// Existing content is kept, so drawing the same chart twice yields two charts.
    pub fn append(&mut self, el: Element) -> usize {
        self.body.push(el);
        self.body.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.body.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.body.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.body.iter()
    }

    /// Remove every element from the body.
    pub fn clear(&mut self) {
        self.body.clear();
    }

    /// Returns all elements of the body (top-level included) matching the selector.
    pub fn select_all(&self, selector: &str) -> Vec<&Element> {
        let parsed = Selector::parse(selector);
        let mut found = vec![];
        for el in self.body.iter() {
            if parsed.matches(el) {
                found.push(el);
            } else {
                el.collect(&parsed, &mut found);
            }
        }
        found
    }

    /// Returns the page as an HTML document.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<style>\n{}\n</style>\n", DEFAULT_STYLE));
        html.push_str("</head>\n<body>\n");
        for el in self.body.iter() {
            html.push_str(&el.to_string());
            html.push('\n');
        }
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Write the page as an HTML document to the given path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), VizError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.to_html().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
