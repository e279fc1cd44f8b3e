//! # markclip-session
//!
//! Orchestration around the `markclip` engine: an owned conversion session
//! with an explicit state machine (replacing ad-hoc re-entrancy flags), the
//! clipboard and settings boundary contracts, and extraction of page
//! metadata from a document snapshot.
//!
//! The messaging layer that triggers conversions, the highlight UI, and the
//! settings store itself are external; this crate is what they call into.
//!
//! ```rust
//! use markclip::{ConvertService, Node};
//! use markclip_session::{ConversionSession, MemoryClipboard, ResolvedSettings};
//!
//! let mut body = Node::element("body");
//! let mut p = Node::element("p");
//! p.add_child(Node::text("Hello"));
//! body.add_child(p);
//! let mut document = Node::document();
//! document.add_child(body);
//!
//! let mut session = ConversionSession::new(
//!     ConvertService::new(),
//!     ResolvedSettings { include_metadata: false, ..Default::default() },
//! );
//! let mut clipboard = MemoryClipboard::default();
//! let outcome = session
//!     .convert_full_page(&document, "https://example.com/", "2025/03/14 09:30", &mut clipboard)
//!     .unwrap();
//! assert!(outcome.copied);
//! assert_eq!(outcome.markdown, "Hello");
//! ```

mod clipboard;
mod extract;
mod session;
mod settings;

pub use clipboard::{ClipboardSink, MemoryClipboard};
pub use extract::extract_page_metadata;
pub use session::{ConversionMode, ConversionSession, CopyOutcome, SessionState};
pub use settings::ResolvedSettings;

use markclip::ConvertError;

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Another conversion is already active in this session
    #[error("a conversion is already active (state: {state:?})")]
    Busy { state: SessionState },

    /// A selection result arrived while selection mode was not armed
    #[error("selection mode is not armed")]
    NotSelecting,

    /// The engine failed to convert the subtree
    #[error(transparent)]
    Conversion(#[from] ConvertError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
