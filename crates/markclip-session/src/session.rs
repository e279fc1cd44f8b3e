//! The conversion session state machine.

use markclip::{ConvertService, Node};
use markclip_metadata::generate;

use crate::clipboard::ClipboardSink;
use crate::extract::extract_page_metadata;
use crate::settings::ResolvedSettings;
use crate::{Result, SessionError};

/// How a conversion was requested over the trigger boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// Convert the element the user clicks after arming selection mode
    Selection,
    /// Convert the resolved content root immediately
    FullPage,
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing in flight
    #[default]
    Idle,
    /// Selection mode armed, waiting for the user to pick an element
    Selecting,
    /// A conversion is running
    Converting,
}

/// Result of a completed conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    /// The final output: preamble (when enabled) plus converted body
    pub markdown: String,
    /// Whether the clipboard write succeeded; on `false` the host is
    /// expected to offer a manual-copy affordance
    pub copied: bool,
}

/// An owned conversion session.
///
/// At most one conversion is active per session, enforced by the state
/// machine rather than by global flags. Every path — success, conversion
/// failure, clipboard failure, cancel — returns the session to `Idle`, so
/// no partial state ever survives an invocation.
pub struct ConversionSession {
    service: ConvertService,
    settings: ResolvedSettings,
    state: SessionState,
}

impl ConversionSession {
    /// Create an idle session around an engine and resolved settings
    pub fn new(service: ConvertService, settings: ResolvedSettings) -> Self {
        Self {
            service,
            settings,
            state: SessionState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The settings this session was resolved with
    pub fn settings(&self) -> &ResolvedSettings {
        &self.settings
    }

    /// Arm selection mode: the host highlights elements and reports the
    /// user's pick via [`complete_selection`](Self::complete_selection)
    pub fn begin_selection(&mut self) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(SessionError::Busy { state: self.state });
        }
        self.state = SessionState::Selecting;
        log::debug!("selection mode armed");
        Ok(())
    }

    /// Abandon whatever is in flight and return to idle
    pub fn cancel(&mut self) {
        if self.state != SessionState::Idle {
            log::debug!("session cancelled from {:?}", self.state);
        }
        self.state = SessionState::Idle;
    }

    /// Convert the element the user picked while selection mode was armed.
    ///
    /// The target widens to an enclosing `<pre>` when it sits inside a code
    /// block. `url` and `extracted_at` feed the provenance preamble.
    pub fn complete_selection(
        &mut self,
        document: &Node,
        target: &Node,
        url: &str,
        extracted_at: &str,
        sink: &mut dyn ClipboardSink,
    ) -> Result<CopyOutcome> {
        if self.state != SessionState::Selecting {
            return Err(SessionError::NotSelecting);
        }
        self.state = SessionState::Converting;
        let result = self.run(document, Some(target), url, extracted_at, sink);
        self.state = SessionState::Idle;
        result
    }

    /// Convert the document's content root immediately
    pub fn convert_full_page(
        &mut self,
        document: &Node,
        url: &str,
        extracted_at: &str,
        sink: &mut dyn ClipboardSink,
    ) -> Result<CopyOutcome> {
        if self.state != SessionState::Idle {
            return Err(SessionError::Busy { state: self.state });
        }
        self.state = SessionState::Converting;
        let result = self.run(document, None, url, extracted_at, sink);
        self.state = SessionState::Idle;
        result
    }

    /// Handle a trigger-boundary request.
    ///
    /// `Selection` arms selection mode and returns `None` — the outcome
    /// arrives later through [`complete_selection`](Self::complete_selection)
    /// once the user clicks. `FullPage` converts immediately.
    pub fn handle_request(
        &mut self,
        mode: ConversionMode,
        document: &Node,
        url: &str,
        extracted_at: &str,
        sink: &mut dyn ClipboardSink,
    ) -> Result<Option<CopyOutcome>> {
        match mode {
            ConversionMode::Selection => {
                self.begin_selection()?;
                Ok(None)
            }
            ConversionMode::FullPage => self
                .convert_full_page(document, url, extracted_at, sink)
                .map(Some),
        }
    }

    fn run(
        &self,
        document: &Node,
        target: Option<&Node>,
        url: &str,
        extracted_at: &str,
        sink: &mut dyn ClipboardSink,
    ) -> Result<CopyOutcome> {
        let body = match target {
            Some(target) => self.service.convert_selection(document, target)?,
            None => self.service.convert_full_page(document)?,
        };

        let markdown = if self.settings.include_metadata {
            let meta = extract_page_metadata(document, url, extracted_at, target);
            let preamble = generate(&meta, self.settings.preamble_language());
            format!("{}{}", preamble, body)
        } else {
            body
        };

        let copied = sink.write(&markdown);
        if !copied {
            log::warn!("clipboard write failed, host fallback required");
        }
        Ok(CopyOutcome { markdown, copied })
    }
}
