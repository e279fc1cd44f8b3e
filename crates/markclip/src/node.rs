//! CDP-style DOM node snapshot used as conversion input.
//!
//! The engine never talks to a live document. Hosts (a browser extension
//! content script, a CDP client, the bundled HTML parser) hand it a snapshot
//! tree in this shape and the engine reads it without mutating it.

use crate::utilities::is_void;

/// Node kinds matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

impl From<u32> for NodeType {
    fn from(value: u32) -> Self {
        match value {
            3 => NodeType::Text,
            8 => NodeType::Comment,
            9 => NodeType::Document,
            11 => NodeType::DocumentFragment,
            _ => NodeType::Element,
        }
    }
}

/// Computed-style snapshot for visibility checks.
///
/// Only the two properties the conversion rules care about. Hosts that can
/// query a renderer fill these from the computed style; the HTML parser
/// falls back to inline declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    pub display: Option<String>,
    pub visibility: Option<String>,
}

impl ComputedStyle {
    /// True when the element would not render at all.
    pub fn is_hidden(&self) -> bool {
        self.display.as_deref() == Some("none") || self.visibility.as_deref() == Some("hidden")
    }
}

/// A DOM node following the CDP DOM.Node structure.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node type (1 = Element, 3 = Text, ...)
    pub node_type: NodeType,

    /// Node name (uppercase for elements, "#text" / "#comment" otherwise)
    pub node_name: String,

    /// Text content for text and comment nodes
    pub node_value: Option<String>,

    /// Attributes as flat array [name, value, name, value, ...] (CDP style)
    pub attributes: Option<Vec<String>>,

    /// Child nodes
    pub children: Option<Vec<Node>>,

    /// Computed-style snapshot, when the host captured one
    pub style: Option<ComputedStyle>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(Vec::new()),
            children: Some(Vec::new()),
            style: None,
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let flat_attrs: Vec<String> = attrs
            .into_iter()
            .flat_map(|(k, v)| vec![k.to_string(), v.to_string()])
            .collect();

        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(flat_attrs),
            children: Some(Vec::new()),
            style: None,
        }
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            node_name: "#text".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
            style: None,
        }
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self {
            node_type: NodeType::Comment,
            node_name: "#comment".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
            style: None,
        }
    }

    /// Create a document node
    pub fn document() -> Self {
        Self {
            node_type: NodeType::Document,
            node_name: "#document".to_string(),
            node_value: None,
            attributes: None,
            children: Some(Vec::new()),
            style: None,
        }
    }

    /// Create a document fragment node
    pub fn document_fragment() -> Self {
        Self {
            node_type: NodeType::DocumentFragment,
            node_name: "#document-fragment".to_string(),
            node_value: None,
            attributes: None,
            children: Some(Vec::new()),
            style: None,
        }
    }

    /// Attach a computed-style snapshot, builder style
    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Check if this is a comment node
    pub fn is_comment(&self) -> bool {
        self.node_type == NodeType::Comment
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> String {
        self.node_name.to_lowercase()
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        let attrs = self.attributes.as_ref()?;
        let name_lower = name.to_lowercase();

        // CDP stores attributes as flat array: [name, value, name, value, ...]
        let mut iter = attrs.iter();
        while let Some(attr_name) = iter.next() {
            if let Some(attr_value) = iter.next() {
                if attr_name.to_lowercase() == name_lower {
                    return Some(attr_value.as_str());
                }
            }
        }
        None
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Check if the class attribute contains the given class name
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|v| v.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().flat_map(|c| c.iter())
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        if let Some(ref mut children) = self.children {
            children.push(child);
        } else {
            self.children = Some(vec![child]);
        }
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if self.attributes.is_none() {
            self.attributes = Some(Vec::new());
        }

        if let Some(ref mut attrs) = self.attributes {
            let name_lower = name.to_lowercase();
            let mut i = 0;
            while i + 1 < attrs.len() {
                if attrs[i].to_lowercase() == name_lower {
                    attrs[i + 1] = value.to_string();
                    return;
                }
                i += 2;
            }
            attrs.push(name.to_string());
            attrs.push(value.to_string());
        }
    }

    /// Preorder traversal of all descendants, excluding this node itself.
    ///
    /// Matches document order, so "first matching descendant" semantics line
    /// up with what a selector query against the live document would return.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&Node> = self.children().collect();
        stack.reverse();
        Descendants { stack }
    }

    /// First descendant satisfying the predicate, in document order
    pub fn find_descendant(&self, pred: impl Fn(&Node) -> bool) -> Option<&Node> {
        self.descendants().find(|n| pred(n))
    }

    /// First descendant element with the given tag name
    pub fn find_tag(&self, tag: &str) -> Option<&Node> {
        self.find_descendant(|n| n.is_element() && n.tag_name() == tag)
    }

    /// Get all text content from this node and descendants.
    ///
    /// Comments contribute nothing.
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.node_value.clone().unwrap_or_default(),
            NodeType::Comment => String::new(),
            _ => self
                .children()
                .map(|child| child.text_content())
                .collect::<Vec<_>>()
                .join(""),
        }
    }

    /// Short selector-like label: `tag#id.class1.class2`
    pub fn descriptor(&self) -> String {
        let mut out = self.tag_name();
        if let Some(id) = self.attr("id") {
            if !id.is_empty() {
                out.push('#');
                out.push_str(id);
            }
        }
        if let Some(classes) = self.attr("class") {
            for class in classes.split_whitespace() {
                out.push('.');
                out.push_str(class);
            }
        }
        out
    }

    /// Reconstruct outer HTML (for preserve rules)
    pub fn outer_html(&self) -> String {
        match self.node_type {
            NodeType::Text => self.node_value.clone().unwrap_or_default(),
            NodeType::Comment => {
                format!("<!--{}-->", self.node_value.as_deref().unwrap_or(""))
            }
            NodeType::Element => {
                let tag = self.tag_name();
                let attrs = self.attributes_string();

                if is_void(&tag) {
                    if attrs.is_empty() {
                        format!("<{}>", tag)
                    } else {
                        format!("<{} {}>", tag, attrs)
                    }
                } else {
                    let inner = self.inner_html();
                    if attrs.is_empty() {
                        format!("<{}>{}</{}>", tag, inner, tag)
                    } else {
                        format!("<{} {}>{}</{}>", tag, attrs, inner, tag)
                    }
                }
            }
            _ => self.inner_html(),
        }
    }

    /// Reconstruct inner HTML
    pub fn inner_html(&self) -> String {
        self.children()
            .map(|child| child.outer_html())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Get attributes as a string for HTML output
    fn attributes_string(&self) -> String {
        let Some(ref attrs) = self.attributes else {
            return String::new();
        };

        let mut result = Vec::new();
        let mut iter = attrs.iter();
        while let Some(name) = iter.next() {
            if let Some(value) = iter.next() {
                if value.is_empty() {
                    result.push(name.clone());
                } else {
                    result.push(format!("{}=\"{}\"", name, escape_html_attr(value)));
                }
            }
        }
        result.join(" ")
    }
}

/// Preorder descendant iterator, see [`Node::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let start = self.stack.len();
        for child in node.children() {
            self.stack.push(child);
        }
        self.stack[start..].reverse();
        Some(node)
    }
}

/// Escape HTML attribute value
fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A node paired with its parent's tag name.
///
/// Rules need one hop of ancestry (is this `<code>` directly inside a
/// `<pre>`?) and the snapshot tree has no parent pointers, so the walker
/// threads the parent tag through instead.
#[derive(Debug, Clone)]
pub struct NodeRef<'a> {
    /// The node itself
    pub node: &'a Node,
    parent_tag: Option<&'a str>,
}

impl<'a> NodeRef<'a> {
    /// Create a new NodeRef without parent context
    pub fn new(node: &'a Node) -> Self {
        Self {
            node,
            parent_tag: None,
        }
    }

    /// Create a new NodeRef with parent tag context
    pub fn with_parent(node: &'a Node, parent_tag: &'a str) -> Self {
        Self {
            node,
            parent_tag: Some(parent_tag),
        }
    }

    /// Get the parent tag name if known
    pub fn parent_tag(&self) -> Option<&str> {
        self.parent_tag
    }

    pub fn is_element(&self) -> bool {
        self.node.is_element()
    }

    pub fn is_text(&self) -> bool {
        self.node.is_text()
    }

    pub fn is_comment(&self) -> bool {
        self.node.is_comment()
    }

    pub fn tag_name(&self) -> String {
        self.node.tag_name()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.node.attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.node.has_attr(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.node.has_class(class)
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.node.children()
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.node.element_children()
    }

    pub fn text_content(&self) -> String {
        self.node.text_content()
    }

    pub fn outer_html(&self) -> String {
        self.node.outer_html()
    }

    /// True when the computed-style snapshot marks the node invisible
    pub fn is_hidden(&self) -> bool {
        self.node
            .style
            .as_ref()
            .map(ComputedStyle::is_hidden)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = Node::element("div");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "div");
        assert_eq!(node.node_name, "DIV");
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes() {
        let node =
            Node::element_with_attrs("a", vec![("href", "https://example.com"), ("title", "Example")]);
        assert_eq!(node.attr("href"), Some("https://example.com"));
        assert_eq!(node.attr("title"), Some("Example"));
        assert_eq!(node.attr("class"), None);
    }

    #[test]
    fn test_has_class() {
        let node = Node::element_with_attrs("div", vec![("class", "note wide content")]);
        assert!(node.has_class("note"));
        assert!(node.has_class("content"));
        assert!(!node.has_class("con"));
    }

    #[test]
    fn test_children() {
        let mut parent = Node::element("div");
        parent.add_child(Node::text("Hello"));
        parent.add_child(Node::element("span"));
        parent.add_child(Node::text("World"));

        assert_eq!(parent.children().count(), 3);
        assert_eq!(parent.element_children().count(), 1);
    }

    #[test]
    fn test_text_content_skips_comments() {
        let mut div = Node::element("div");
        div.add_child(Node::text("Hello "));
        div.add_child(Node::comment("not text"));
        let mut span = Node::element("span");
        span.add_child(Node::text("World"));
        div.add_child(span);

        assert_eq!(div.text_content(), "Hello World");
    }

    #[test]
    fn test_descendants_document_order() {
        let mut root = Node::element("div");
        let mut a = Node::element("p");
        a.add_child(Node::element("em"));
        root.add_child(a);
        root.add_child(Node::element("ul"));

        let tags: Vec<String> = root
            .descendants()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name())
            .collect();
        assert_eq!(tags, ["p", "em", "ul"]);
    }

    #[test]
    fn test_find_tag() {
        let mut root = Node::element("figure");
        root.add_child(Node::element("img"));
        let mut caption = Node::element("figcaption");
        caption.add_child(Node::text("A caption"));
        root.add_child(caption);

        let found = root.find_tag("figcaption").unwrap();
        assert_eq!(found.text_content(), "A caption");
        assert!(root.find_tag("video").is_none());
    }

    #[test]
    fn test_descriptor() {
        let node = Node::element_with_attrs(
            "section",
            vec![("id", "intro"), ("class", "hero wide")],
        );
        assert_eq!(node.descriptor(), "section#intro.hero.wide");
        assert_eq!(Node::element("p").descriptor(), "p");
    }

    #[test]
    fn test_outer_html() {
        let mut a = Node::element_with_attrs("a", vec![("href", "https://example.com")]);
        a.add_child(Node::text("Link"));

        assert_eq!(a.outer_html(), "<a href=\"https://example.com\">Link</a>");
    }

    #[test]
    fn test_void_element_html() {
        let br = Node::element("br");
        assert_eq!(br.outer_html(), "<br>");

        let img = Node::element_with_attrs("img", vec![("src", "test.png"), ("alt", "Test")]);
        assert_eq!(img.outer_html(), "<img src=\"test.png\" alt=\"Test\">");
    }

    #[test]
    fn test_comment_outer_html() {
        let comment = Node::comment(" hidden ");
        assert_eq!(comment.outer_html(), "<!-- hidden -->");
    }

    #[test]
    fn test_hidden_style() {
        let node = Node::element("div").with_style(ComputedStyle {
            display: Some("none".into()),
            visibility: None,
        });
        assert!(NodeRef::new(&node).is_hidden());
        assert!(!NodeRef::new(&Node::element("div")).is_hidden());
    }
}
