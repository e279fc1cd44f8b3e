//! Rule and Filter types for Markdown conversion.

use crate::node::NodeRef;
use crate::service::{ConvertContext, ConvertOptions};
use crate::Result;

/// Type alias for replacement functions.
///
/// A replacement receives the per-invocation conversion context (so
/// composite rules can re-enter the converter for child nodes), the node,
/// and the already-converted child content. Failures are recovered by the
/// dispatcher, which falls back to the node's raw text.
pub type ReplacementFn =
    Box<dyn Fn(&ConvertContext, &NodeRef, &str) -> Result<String> + Send + Sync>;

/// Type alias for predicate filters.
///
/// A failing predicate is treated as a non-match; resolution continues with
/// the remaining rules.
pub type PredicateFn = Box<dyn Fn(&NodeRef, &ConvertOptions) -> Result<bool> + Send + Sync>;

/// A filter determines which nodes a rule applies to
pub enum Filter {
    /// Match a single tag name
    TagName(String),
    /// Match any of multiple tag names
    TagNames(Vec<String>),
    /// Match using a predicate over the node view
    Predicate(PredicateFn),
}

impl Filter {
    /// Create a filter for a single tag
    pub fn tag(name: &str) -> Self {
        Filter::TagName(name.to_lowercase())
    }

    /// Create a filter for multiple tags
    pub fn tags(names: &[&str]) -> Self {
        Filter::TagNames(names.iter().map(|s| s.to_lowercase()).collect())
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&NodeRef, &ConvertOptions) -> Result<bool> + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches a node.
    ///
    /// Tag filters only ever match element nodes; predicates see every node
    /// kind the dispatcher consults rules for (elements and comments).
    pub fn matches(&self, node: &NodeRef, options: &ConvertOptions) -> Result<bool> {
        match self {
            Filter::TagName(t) => Ok(node.is_element() && node.tag_name() == *t),
            Filter::TagNames(tags) => Ok(node.is_element() && tags.contains(&node.tag_name())),
            Filter::Predicate(f) => f(node, options),
        }
    }
}

/// A rule defines how to convert a matched node to Markdown
pub struct Rule {
    /// Filter to determine which nodes this rule applies to
    pub filter: Filter,
    /// Replacement function that generates Markdown
    pub replacement: ReplacementFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(filter: Filter, replacement: F) -> Self
    where
        F: Fn(&ConvertContext, &NodeRef, &str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            filter,
            replacement: Box::new(replacement),
        }
    }

    /// Create a rule that matches a single tag
    pub fn for_tag<F>(tag: &str, replacement: F) -> Self
    where
        F: Fn(&ConvertContext, &NodeRef, &str) -> Result<String> + Send + Sync + 'static,
    {
        Self::new(Filter::tag(tag), replacement)
    }

    /// Create a rule that matches multiple tags
    pub fn for_tags<F>(tags: &[&str], replacement: F) -> Self
    where
        F: Fn(&ConvertContext, &NodeRef, &str) -> Result<String> + Send + Sync + 'static,
    {
        Self::new(Filter::tags(tags), replacement)
    }

    /// Apply this rule's replacement
    pub fn replace(&self, ctx: &ConvertContext, node: &NodeRef, content: &str) -> Result<String> {
        (self.replacement)(ctx, node, content)
    }
}
