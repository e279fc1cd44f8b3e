//! Resolved user settings.

use markclip_metadata::Language;

/// The two settings the session consumes, already resolved by the host's
/// settings store. The store itself (and its persistence) is external.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    /// Prepend the provenance preamble to the converted body
    pub include_metadata: bool,

    /// Preamble language code; unsupported codes fall back to the default
    pub language: String,
}

impl ResolvedSettings {
    /// The preamble language these settings resolve to
    pub fn preamble_language(&self) -> Language {
        Language::from_code(&self.language)
    }
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            include_metadata: true,
            language: "en".to_string(),
        }
    }
}
