//! # markclip-metadata
//!
//! Build the Markdown preamble that describes where a converted document
//! came from: page title, source and canonical URLs, extraction timestamp,
//! SEO/social tags, and a fixed explanation of what the extraction covers.
//!
//! The generator is a pure function over a [`PageMetadata`] record and a
//! [`Language`]; it never fails and never touches the outside world. Absent
//! fields simply read as empty. Callers prepend the result to the converted
//! body when the user asked for provenance.
//!
//! ```rust
//! use markclip_metadata::{generate, Language, PageMetadata};
//!
//! let meta = PageMetadata {
//!     title: Some("Example Domain".into()),
//!     url: Some("https://example.com/".into()),
//!     ..Default::default()
//! };
//!
//! let preamble = generate(&meta, Language::from_code("en"));
//! assert!(preamble.starts_with("# Content Context"));
//! ```

mod generate;
mod record;
mod templates;

pub use generate::generate;
pub use record::PageMetadata;
pub use templates::Language;
