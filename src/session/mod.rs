//! Session controller — owns one widget's conversation and drives sends.
//!
//! DESIGN
//! ======
//! State lives in a `watch` channel sender owned by the controller. Every
//! operation mutates it through `send_modify`, so renderers holding a
//! receiver are woken on each change and can only ever read.
//!
//! `submit` is the only operation that suspends. Acceptance (user message
//! appended, draft cleared, `pending` raised) happens synchronously in
//! `start_submit`, before the transport is awaited. From that point a
//! `PendingGuard` owns the obligation to append exactly one resolution
//! message and drop `pending`: on a reply, on a transport error, on a panic
//! inside the transport, and when the delivery future is dropped.

pub mod state;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub use state::{Message, Origin, RejectReason, SessionState};

use crate::config::WidgetCopy;
use crate::transport::{Transport, TransportError};

// =============================================================================
// TYPES
// =============================================================================

/// What a call to [`SessionController::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing happened; state is untouched.
    Rejected(RejectReason),
    /// The assistant's reply was appended.
    Replied,
    /// The send failed and an apology was appended in its place.
    Failed,
}

/// One mounted widget. Clones share the same session.
#[derive(Clone)]
pub struct SessionController {
    state: Arc<watch::Sender<SessionState>>,
    transport: Arc<dyn Transport>,
    copy: Arc<WidgetCopy>,
}

impl SessionController {
    /// Mount a new widget session: panel closed, empty log, nothing pending.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, copy: WidgetCopy) -> Self {
        let (tx, _rx) = watch::channel(SessionState::new());
        Self { state: Arc::new(tx), transport, copy: Arc::new(copy) }
    }

    #[must_use]
    pub fn copy(&self) -> &WidgetCopy {
        &self.copy
    }

    // =========================================================================
    // READ SURFACE
    // =========================================================================

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        self.state.borrow().panel_open()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending()
    }

    #[must_use]
    pub fn draft(&self) -> String {
        self.state.borrow().draft().to_string()
    }

    #[must_use]
    pub fn log_len(&self) -> usize {
        self.state.borrow().log().len()
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Show or hide the panel. The first open onto an empty log seeds the greeting.
    pub fn toggle_panel(&self) {
        let greeting = self.copy.greeting.as_str();
        self.state.send_modify(|s| {
            if s.toggle_panel(greeting) {
                debug!("session: greeting seeded");
            }
        });
    }

    /// Replace the draft with `text` as typed.
    pub fn update_draft(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_if_modified(|s| {
            if s.draft() == text {
                return false;
            }
            s.set_draft(text);
            true
        });
    }

    /// Send the current draft.
    ///
    /// Blank drafts and submits while another is in flight are ignored and
    /// leave state untouched. Otherwise the user message is appended before
    /// the transport is awaited, and exactly one assistant message (reply or
    /// apology) follows it.
    pub async fn submit(&self) -> SubmitOutcome {
        match self.start_submit() {
            Ok(delivery) => delivery.await,
            Err(reason) => SubmitOutcome::Rejected(reason),
        }
    }

    /// Accept the current draft now and hand back the delivery as a future.
    ///
    /// The user message is in the log and `pending` is raised before this
    /// returns, so a caller that spawns the delivery cannot race a second
    /// submission past the guard. Dropping the returned future, polled or
    /// not, resolves the submission with the connection apology.
    ///
    /// # Errors
    ///
    /// Returns the [`RejectReason`] when the draft is blank or a request is
    /// already in flight; state is untouched in that case.
    pub fn start_submit(&self) -> Result<impl Future<Output = SubmitOutcome> + Send + 'static, RejectReason> {
        let mut accepted = Err(RejectReason::EmptyDraft);
        self.state.send_if_modified(|s| {
            accepted = s.accept_draft();
            accepted.is_ok()
        });
        let text = accepted.inspect_err(|reason| debug!(?reason, "session: submit ignored"))?;
        info!(text_len = text.len(), "session: submission accepted");

        let guard = PendingGuard::new(Arc::clone(&self.state), Arc::clone(&self.copy));
        let session = self.clone();
        Ok(async move { session.deliver(&text, guard).await })
    }

    async fn deliver(&self, text: &str, guard: PendingGuard) -> SubmitOutcome {
        let result = AssertUnwindSafe(self.transport.send(text))
            .catch_unwind()
            .await;

        let (reply, outcome) = match result {
            Ok(Ok(reply)) => {
                info!(reply_len = reply.len(), "session: reply received");
                (reply, SubmitOutcome::Replied)
            }
            Ok(Err(e)) => {
                warn!(error = %e, error_code = e.error_code(), "session: send failed");
                (self.failure_text(&e), SubmitOutcome::Failed)
            }
            Err(_) => {
                error!("session: transport panicked");
                (self.copy.connection_error.clone(), SubmitOutcome::Failed)
            }
        };
        guard.resolve(reply);
        outcome
    }

    fn failure_text(&self, err: &TransportError) -> String {
        err.service_message()
            .map_or_else(|| self.copy.connection_error.clone(), str::to_string)
    }
}

// =============================================================================
// PENDING GUARD
// =============================================================================

/// Clears `pending` on every exit from the resolution step.
///
/// `resolve` appends the real outcome. If the guard is dropped without
/// resolving (the delivery future was dropped, or something unwound past
/// it), it appends the connection apology instead.
struct PendingGuard {
    state: Arc<watch::Sender<SessionState>>,
    copy: Arc<WidgetCopy>,
    resolved: bool,
}

impl PendingGuard {
    fn new(state: Arc<watch::Sender<SessionState>>, copy: Arc<WidgetCopy>) -> Self {
        Self { state, copy, resolved: false }
    }

    fn resolve(mut self, text: String) {
        self.state.send_modify(|s| {
            s.resolve(text);
        });
        self.resolved = true;
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.resolved {
            return;
        }
        warn!("session: submission abandoned before resolution");
        let fallback = self.copy.connection_error.as_str();
        self.state.send_modify(|s| {
            s.resolve(fallback);
        });
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
