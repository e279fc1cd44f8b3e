//! HTML parsing support.
//!
//! Converts an HTML string into the snapshot [`Node`] tree, for hosts that
//! have markup rather than a live DOM. Since a string parser has no renderer
//! to ask for computed style, inline `display`/`visibility` declarations are
//! folded into the style snapshot so the hidden-node rule still applies.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::{ComputedStyle, Node};

/// Parse an HTML string into a Node tree.
///
/// The returned root is the synthetic `html` element wrapping the fragment.
///
/// # Example
///
/// ```rust
/// use markclip::{parse_html, ConvertService};
///
/// let tree = parse_html("<h1>Hello <em>World</em></h1>");
/// let markdown = ConvertService::new().convert(&tree).unwrap();
/// assert_eq!(markdown, "# Hello *World*");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    scraper_to_node(document.root_element())
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();

    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();

    let mut node = if attrs.is_empty() {
        Node::element(tag)
    } else {
        Node::element_with_attrs(tag, attrs)
    };

    if let Some(style) = element.value().attr("style").and_then(parse_inline_style) {
        node.style = Some(style);
    }

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}

/// Pick `display` and `visibility` out of an inline style declaration
fn parse_inline_style(style: &str) -> Option<ComputedStyle> {
    let mut snapshot = ComputedStyle::default();
    let mut any = false;

    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let value = value.trim().to_lowercase();
        match property.trim().to_lowercase().as_str() {
            "display" => {
                snapshot.display = Some(value);
                any = true;
            }
            "visibility" => {
                snapshot.visibility = Some(value);
                any = true;
            }
            _ => {}
        }
    }

    any.then_some(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConvertService;

    #[test]
    fn test_parse_simple_html() {
        let node = parse_html("<p>Hello World</p>");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "html");
    }

    #[test]
    fn test_parse_keeps_comments() {
        let node = parse_html("<div><!-- note --><p>x</p></div>");
        let div = node.children().next().unwrap();
        assert!(div.children().any(|c| c.is_comment()));
    }

    #[test]
    fn test_parse_inline_style_snapshot() {
        let node = parse_html(r#"<div style="color: red; display: none">gone</div>"#);
        let div = node.children().next().unwrap();
        assert!(div.style.as_ref().unwrap().is_hidden());

        let visible = parse_html(r#"<div style="color: red">here</div>"#);
        let div = visible.children().next().unwrap();
        assert!(div.style.is_none());
    }

    #[test]
    fn test_convert_parsed_html() {
        let service = ConvertService::new();
        let tree = parse_html("<p>Hello <strong>World</strong></p>");
        assert_eq!(service.convert(&tree).unwrap(), "Hello **World**");
    }

    #[test]
    fn test_convert_parsed_heading() {
        let service = ConvertService::new();
        let tree = parse_html("<h1>Title</h1>");
        assert_eq!(service.convert(&tree).unwrap(), "# Title");
    }
}
