//! Page metadata extraction from a document snapshot.

use markclip::Node;
use markclip_metadata::PageMetadata;

/// Populate a [`PageMetadata`] record from the document tree.
///
/// `url` and `extracted_at` come from the host (only the browser knows
/// them); everything else is read from the snapshot: `<title>` text,
/// description meta (falling back to `og:description`), the canonical link,
/// the root `lang` attribute, and the SEO/social meta tags. `selected` is
/// the node the user pointed at, recorded as a selector-like descriptor.
pub fn extract_page_metadata(
    document: &Node,
    url: &str,
    extracted_at: &str,
    selected: Option<&Node>,
) -> PageMetadata {
    let title = document
        .find_tag("title")
        .map(|t| t.text_content().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled Page".to_string());

    let description =
        meta_named(document, "description").or_else(|| meta_property(document, "og:description"));

    let canonical = document
        .find_descendant(|n| {
            n.is_element() && n.tag_name() == "link" && n.attr("rel") == Some("canonical")
        })
        .and_then(|link| link.attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string);

    let page_lang = root_html(document)
        .and_then(|html| html.attr("lang"))
        .filter(|lang| !lang.is_empty())
        .map(str::to_string);

    PageMetadata {
        title: Some(title),
        url: Some(url.to_string()),
        description,
        canonical,
        page_lang,
        extracted_at: Some(extracted_at.to_string()),
        keywords: meta_named(document, "keywords"),
        author: meta_named(document, "author"),
        og_title: meta_property(document, "og:title"),
        og_type: meta_property(document, "og:type"),
        og_image: meta_property(document, "og:image"),
        og_site_name: meta_property(document, "og:site_name"),
        twitter_card: meta_named(document, "twitter:card"),
        twitter_site: meta_named(document, "twitter:site"),
        element_description: selected.map(Node::descriptor),
    }
}

/// The document's `html` element, whether the snapshot root is the document
/// node or the element itself
fn root_html(document: &Node) -> Option<&Node> {
    if document.is_element() && document.tag_name() == "html" {
        return Some(document);
    }
    document.find_tag("html")
}

/// Content of the first `meta[name=...]` tag
fn meta_named(document: &Node, name: &str) -> Option<String> {
    meta_content(document, "name", name)
}

/// Content of the first `meta[property=...]` tag
fn meta_property(document: &Node, property: &str) -> Option<String> {
    meta_content(document, "property", property)
}

fn meta_content(document: &Node, key: &str, value: &str) -> Option<String> {
    document
        .find_descendant(|n| n.is_element() && n.tag_name() == "meta" && n.attr(key) == Some(value))
        .and_then(|meta| meta.attr("content"))
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}
