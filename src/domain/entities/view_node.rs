//! Generic element tree handed to a document layer.

use std::fmt::Write as _;

const VOID_ELEMENTS: &[&str] = &["img", "input", "br", "hr", "meta", "link"];

/// One element of a view tree: tag, classes, attributes, text and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewNode {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<ViewNode>,
}

impl ViewNode {
    /// Creates an element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Sets the class list from a whitespace separated string.
    #[must_use]
    pub fn class(mut self, classes: &str) -> Self {
        self.classes = classes.split_whitespace().map(String::from).collect();
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child element in place.
    pub fn append(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Returns the tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the class list.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns true if the element carries the class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns the text content, if any.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the children.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets or replaces an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Removes an attribute, returning whether it was present.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|(key, _)| key != name);
        before != self.attributes.len()
    }

    /// Finds the first element, depth first, whose attribute equals `value`.
    #[must_use]
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<&Self> {
        if self.attribute(name) == Some(value) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_by_attribute(name, value))
    }

    /// Mutable variant of [`Self::find_by_attribute`].
    pub fn find_by_attribute_mut(&mut self, name: &str, value: &str) -> Option<&mut Self> {
        if self.attribute(name) == Some(value) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_by_attribute_mut(name, value))
    }

    /// Collects every element, depth first, carrying the class.
    #[must_use]
    pub fn select_class<'a>(&'a self, class: &str) -> Vec<&'a Self> {
        let mut found = Vec::new();
        self.collect_class(class, &mut found);
        found
    }

    fn collect_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Self>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_class(class, found);
        }
    }

    /// Applies `f` to this element and every descendant, depth first.
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Self)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// Serializes the tree to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (name, value) in &self.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_html() {
        let node = ViewNode::new("div")
            .class("card  body")
            .attr("data-id", "a")
            .child(ViewNode::new("img").attr("src", "x.jpg"))
            .child(ViewNode::new("p").text("cat & dog"));

        assert_eq!(
            node.to_html(),
            "<div class=\"card body\" data-id=\"a\"><img src=\"x.jpg\"><p>cat &amp; dog</p></div>"
        );
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut node = ViewNode::new("img").attr("src", "a");
        node.set_attribute("src", "b");
        assert_eq!(node.attribute("src"), Some("b"));
        assert!(node.remove_attribute("src"));
        assert_eq!(node.attribute("src"), None);
    }

    #[test]
    fn test_find_and_select() {
        let mut tree = ViewNode::new("div")
            .child(ViewNode::new("img").class("lazy-image").attr("id", "one"))
            .child(
                ViewNode::new("div")
                    .child(ViewNode::new("img").class("lazy-image").attr("id", "two")),
            );

        assert_eq!(tree.select_class("lazy-image").len(), 2);
        let two = tree.find_by_attribute_mut("id", "two").unwrap();
        two.set_attribute("src", "y.jpg");
        assert_eq!(
            tree.find_by_attribute("id", "two").and_then(|n| n.attribute("src")),
            Some("y.jpg")
        );
        assert!(tree.find_by_attribute("id", "three").is_none());
    }

    #[test]
    fn test_visit_mut_reaches_descendants() {
        let mut tree = ViewNode::new("form")
            .child(ViewNode::new("input"))
            .child(ViewNode::new("label").child(ViewNode::new("input")));

        let mut count = 0;
        tree.visit_mut(&mut |node| {
            if node.tag() == "input" {
                node.set_attribute("disabled", "disabled");
                count += 1;
            }
        });

        assert_eq!(count, 2);
        assert_eq!(tree.to_html().matches("disabled=").count(), 2);
    }

    #[test]
    fn test_escapes_attribute_values() {
        let node = ViewNode::new("img").attr("alt", "\"quoted\" <b>");
        assert_eq!(node.to_html(), "<img alt=\"&quot;quoted&quot; &lt;b&gt;\">");
    }
}
