//! Session state — the message log, panel visibility, draft and pending flag.
//!
//! DESIGN
//! ======
//! Every transition here is synchronous and total. The controller in
//! `session/mod.rs` wraps these in its owned state cell and adds the async
//! transport step; keeping them pure lets the invariants be tested without
//! a runtime.
//!
//! The log is append-only. Nothing in this module removes, edits or
//! reorders an entry once pushed.

// =============================================================================
// MESSAGE
// =============================================================================

/// Who authored a message. Decides which side of the panel it renders on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    User,
    Assistant,
}

/// A single chat log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub origin: Origin,
    pub text: String,
}

impl Message {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { origin: Origin::User, text: text.into() }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { origin: Origin::Assistant, text: text.into() }
    }

    /// `true` when the entry came from (or stands in for) the remote service.
    #[must_use]
    pub fn is_from_assistant(&self) -> bool {
        self.origin == Origin::Assistant
    }
}

// =============================================================================
// REJECTION
// =============================================================================

/// Why a submission was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Draft was empty or whitespace only.
    EmptyDraft,
    /// Another submission is still in flight.
    Pending,
}

// =============================================================================
// SESSION STATE
// =============================================================================

/// State of one mounted widget.
///
/// Fields are private: a presentation layer holding a snapshot can read
/// everything but has no way to write back into the controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    panel_open: bool,
    log: Vec<Message>,
    draft: String,
    pending: bool,
}

impl SessionState {
    /// Fresh state: panel closed, empty log, empty draft, nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    #[must_use]
    pub fn log(&self) -> &[Message] {
        &self.log
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Flip panel visibility. Opening onto an empty log seeds it with the
    /// greeting. Returns `true` if the greeting was appended.
    pub fn toggle_panel(&mut self, greeting: &str) -> bool {
        self.panel_open = !self.panel_open;
        if self.panel_open && self.log.is_empty() {
            self.log.push(Message::assistant(greeting));
            return true;
        }
        false
    }

    /// Store the draft verbatim. Trimming happens on submission.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Gate and accept the current draft.
    ///
    /// On success the trimmed text is appended as a user message, the draft
    /// is cleared and `pending` is raised; the trimmed text is returned for
    /// the transport. On rejection nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the [`RejectReason`] when the draft is blank or a request is
    /// already in flight.
    pub fn accept_draft(&mut self) -> Result<String, RejectReason> {
        if self.pending {
            return Err(RejectReason::Pending);
        }
        let text = self.draft.trim();
        if text.is_empty() {
            return Err(RejectReason::EmptyDraft);
        }

        let text = text.to_string();
        self.log.push(Message::user(text.clone()));
        self.draft.clear();
        self.pending = true;
        Ok(text)
    }

    /// Integrate the outcome of the in-flight submission: append exactly one
    /// assistant message and drop `pending`.
    ///
    /// Returns `false` (and changes nothing) if no submission was pending, so
    /// a stray second resolution can never add a duplicate reply.
    pub fn resolve(&mut self, text: impl Into<String>) -> bool {
        if !self.pending {
            return false;
        }
        self.log.push(Message::assistant(text));
        self.pending = false;
        true
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
