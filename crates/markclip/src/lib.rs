//! # markclip
//!
//! Convert DOM snapshots to Markdown with an ordered, extensible rule set.
//!
//! The engine walks a [`Node`] tree depth-first, converts each node's
//! children to Markdown first, then applies the highest-priority matching
//! [`Rule`] to the accumulated string. The built-in catalogue covers tables,
//! lists, fenced code blocks, definition lists, details/summary, form
//! controls and media, and strips injected UI, hidden nodes and non-content
//! tags before any content rule can see them.
//!
//! ## Design
//!
//! The engine accepts a CDP-style DOM snapshot rather than parsing HTML
//! itself:
//!
//! - **Zero parsing overhead** when a DOM snapshot is already at hand
//! - **Parser agnostic**: any HTML source can be converted to the Node shape
//! - **Smaller binaries**: no HTML parser bundled unless the `html` feature
//!   is enabled
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use markclip::{ConvertService, Node};
//!
//! let service = ConvertService::new();
//!
//! let mut h1 = Node::element("h1");
//! h1.add_child(Node::text("Hello World"));
//!
//! let markdown = service.convert(&h1).unwrap();
//! assert_eq!(markdown, "# Hello World");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use markclip::{parse_html, ConvertService};
//!
//! let service = ConvertService::new();
//! let tree = parse_html("<p>Hello <strong>World</strong></p>");
//! assert_eq!(service.convert(&tree).unwrap(), "Hello **World**");
//! ```

#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod rules;
mod service;
pub mod utilities;

#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{ComputedStyle, Descendants, Node, NodeRef, NodeType};
pub use rules::{
    builtin_rules, Filter, PredicateFn, ReplacementFn, Rule, RuleSet, INJECTED_UI_CLASS,
    NON_CONTENT_TAGS, PRESERVED_TAGS,
};
pub use service::{
    conversion_unit, resolve_content_root, ConvertContext, ConvertOptions, ConvertService,
    MAX_DEPTH,
};

/// Error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The converter recursed past [`MAX_DEPTH`]; the snapshot is nested
    /// too deeply to convert safely
    #[error("recursion depth limit of {limit} exceeded")]
    RecursionDepthExceeded { limit: usize },

    /// A rule's filter or replacement failed. The dispatcher recovers from
    /// these per node; they only surface to rule authors.
    #[error("rule failure: {0}")]
    Rule(String),
}

impl ConvertError {
    /// Build a rule failure from any message
    pub fn rule(message: impl Into<String>) -> Self {
        ConvertError::Rule(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
