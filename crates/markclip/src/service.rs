//! ConvertService - the main entry point for DOM to Markdown conversion.

use std::cell::Cell;

use crate::node::{Node, NodeRef};
use crate::rules::{Rule, RuleSet};
use crate::utilities::{collapse_whitespace, escape_markdown, is_block, normalize_blank_lines};
use crate::{ConvertError, Result};

/// Ceiling on converter recursion.
///
/// Recursion depth tracks DOM tree depth (plus rule re-entry, e.g. the list
/// rule), so a snapshot nested deeper than this aborts with
/// [`ConvertError::RecursionDepthExceeded`] instead of exhausting the stack.
pub const MAX_DEPTH: usize = 512;

/// Options for ConvertService.
///
/// Fixed at construction; rules read them but nothing can change them once
/// a service exists. Headings are always ATX style.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Bullet list marker
    pub bullet_marker: char,

    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Strong delimiter
    pub strong_delimiter: String,

    /// Fence string for code blocks
    pub fence: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            bullet_marker: '-',
            em_delimiter: '*',
            strong_delimiter: "**".to_string(),
            fence: "```".to_string(),
        }
    }
}

/// The main service for converting DOM snapshots to Markdown
pub struct ConvertService {
    options: ConvertOptions,
    rules: RuleSet,
}

impl ConvertService {
    /// Create a new ConvertService with default options and the built-in
    /// rule catalogue
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
            rules: RuleSet::new(),
        }
    }

    /// Create a ConvertService with custom options
    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            options,
            rules: RuleSet::new(),
        }
    }

    /// Create a ConvertService with custom options and rules
    pub fn with_rules(options: ConvertOptions, rules: RuleSet) -> Self {
        Self { options, rules }
    }

    /// Append a custom rule; see [`RuleSet::add`] for the uniqueness and
    /// priority semantics
    pub fn add_rule(&mut self, name: &str, rule: Rule) -> bool {
        self.rules.add(name, rule)
    }

    /// Get the options
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Get the rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Convert a subtree to Markdown.
    ///
    /// Deterministic for a fixed rule set and snapshot. Each call owns its
    /// own context, so a service can be shared freely across conversions.
    pub fn convert(&self, root: &Node) -> Result<String> {
        let ctx = ConvertContext::new(self);
        let raw = ctx.convert_node(&NodeRef::new(root))?;
        Ok(post_process(&raw))
    }

    /// Convert the subtree a user pointed at, widening to an enclosing
    /// `<pre>` when the target sits inside a code block
    pub fn convert_selection(&self, document: &Node, target: &Node) -> Result<String> {
        self.convert(conversion_unit(document, target))
    }

    /// Convert the document's content root
    pub fn convert_full_page(&self, document: &Node) -> Result<String> {
        self.convert(resolve_content_root(document))
    }
}

impl Default for ConvertService {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-invocation conversion state.
///
/// Holds the recursion depth for one `convert` call and hands rules a way
/// to re-enter the converter for child content. Never shared between
/// conversions.
pub struct ConvertContext<'a> {
    service: &'a ConvertService,
    depth: Cell<usize>,
}

impl<'a> ConvertContext<'a> {
    fn new(service: &'a ConvertService) -> Self {
        Self {
            service,
            depth: Cell::new(0),
        }
    }

    /// Options of the owning service
    pub fn options(&self) -> &ConvertOptions {
        &self.service.options
    }

    /// Convert a single node.
    ///
    /// Children are converted first (bottom-up), then the node's governing
    /// rule transforms the accumulated string. Nodes with no matching rule
    /// pass their children's output through; text nodes emit collapsed,
    /// escaped literal text. A failing replacement is recovered here by
    /// substituting the node's raw text; the depth error always propagates.
    pub fn convert_node(&self, node: &NodeRef) -> Result<String> {
        if node.is_text() {
            let text = node.node.node_value.as_deref().unwrap_or("");
            return Ok(escape_markdown(&collapse_whitespace(text)));
        }

        let content = self.convert_children(node.node)?;

        match self.service.rules.resolve(node, &self.service.options) {
            Some((name, rule)) => match rule.replace(self, node, &content) {
                Ok(fragment) => Ok(fragment),
                Err(err @ ConvertError::RecursionDepthExceeded { .. }) => Err(err),
                Err(err) => {
                    log::warn!(
                        "rule '{}' failed on <{}>, substituting raw text: {}",
                        name,
                        node.tag_name(),
                        err
                    );
                    Ok(node.text_content())
                }
            },
            None => Ok(content),
        }
    }

    /// Convert a node's children and concatenate the fragments.
    ///
    /// Fragments from block-level element children are separated from their
    /// siblings by blank lines; inline fragments concatenate directly.
    /// Whitespace-only text survives as a single space only between two
    /// inline siblings.
    pub fn convert_children(&self, parent: &Node) -> Result<String> {
        let depth = self.depth.get();
        if depth >= MAX_DEPTH {
            return Err(ConvertError::RecursionDepthExceeded { limit: MAX_DEPTH });
        }
        self.depth.set(depth + 1);
        let result = self.children_content(parent);
        self.depth.set(depth);
        result
    }

    /// Re-enter the top-level converter for a subtree, returning finished
    /// Markdown. Composite rules (list items) use this so nested structures
    /// come out fully formed.
    pub fn convert_fragment(&self, node: &Node) -> Result<String> {
        Ok(post_process(&self.convert_children(node)?))
    }

    fn children_content(&self, parent: &Node) -> Result<String> {
        let Some(children) = parent.children.as_deref() else {
            return Ok(String::new());
        };
        let parent_tag = parent.is_element().then(|| parent.tag_name());

        let mut out = String::new();
        for (index, child) in children.iter().enumerate() {
            if child.is_text() {
                let collapsed = collapse_whitespace(child.node_value.as_deref().unwrap_or(""));
                if collapsed.trim().is_empty() {
                    if has_inline_neighbors(children, index) {
                        out.push(' ');
                    }
                } else {
                    out.push_str(&escape_markdown(&collapsed));
                }
                continue;
            }

            let node_ref = match parent_tag.as_deref() {
                Some(tag) => NodeRef::with_parent(child, tag),
                None => NodeRef::new(child),
            };
            let fragment = self.convert_node(&node_ref)?;
            if fragment.is_empty() {
                continue;
            }

            if child.is_element() && is_block(&child.tag_name()) {
                out.push_str("\n\n");
                out.push_str(&fragment);
                out.push_str("\n\n");
            } else {
                out.push_str(&fragment);
            }
        }
        Ok(out)
    }
}

/// Whitespace-only text is kept (as one space) only when flanked by two
/// inline siblings
fn has_inline_neighbors(children: &[Node], index: usize) -> bool {
    let inline = |n: &Node| n.is_text() || (n.is_element() && !is_block(&n.tag_name()));
    let prev = index.checked_sub(1).and_then(|i| children.get(i));
    let next = children.get(index + 1);
    matches!((prev, next), (Some(p), Some(n)) if inline(p) && inline(n))
}

/// Normalize rule output: collapse runs of three or more newlines to a
/// blank line and trim the outer edges
fn post_process(output: &str) -> String {
    normalize_blank_lines(output).trim().to_string()
}

/// Pick the conversion root for a whole-page request.
///
/// Probes, in order: `main`, `article`, an element with class `content`,
/// an element with id `content`, `body`; the document itself is the final
/// fallback.
pub fn resolve_content_root(document: &Node) -> &Node {
    if let Some(node) = document.find_tag("main") {
        return node;
    }
    if let Some(node) = document.find_tag("article") {
        return node;
    }
    if let Some(node) = document.find_descendant(|n| n.is_element() && n.has_class("content")) {
        return node;
    }
    if let Some(node) = document.find_descendant(|n| n.is_element() && n.attr("id") == Some("content"))
    {
        return node;
    }
    if let Some(node) = document.find_tag("body") {
        return node;
    }
    document
}

/// Map a pointed-at node to its conversion unit.
///
/// A target inside a `<pre>` (the target itself included) widens to the
/// nearest enclosing `pre`, so clicking anywhere in a code block converts
/// the whole block. A target not under `document` converts as-is.
pub fn conversion_unit<'a>(document: &'a Node, target: &'a Node) -> &'a Node {
    let mut path = Vec::new();
    if !path_to(document, target, &mut path) {
        return target;
    }
    path.iter()
        .rev()
        .find(|n| n.is_element() && n.tag_name() == "pre")
        .copied()
        .unwrap_or(target)
}

/// Build the root-to-target node path by identity
fn path_to<'a>(current: &'a Node, target: &Node, path: &mut Vec<&'a Node>) -> bool {
    path.push(current);
    if std::ptr::eq(current, target) {
        return true;
    }
    for child in current.children() {
        if path_to(child, target, path) {
            return true;
        }
    }
    path.pop();
    false
}
