//! Terminal rendering of a session.
//!
//! `Renderer` is incremental: it remembers how much of the log it has
//! already printed and only emits lines for what changed since the last
//! frame.

use crate::config::WidgetCopy;
use crate::session::{Message, Origin, SessionState};

pub const LOADING: &str = "  . . .";

/// Line shown when the panel is opened or closed.
#[must_use]
pub fn panel_line(copy: &WidgetCopy, open: bool) -> String {
    if open {
        format!("== {} ==", copy.title)
    } else {
        "== chat closed (/toggle to reopen) ==".to_string()
    }
}

#[must_use]
pub fn message_line(message: &Message) -> String {
    match message.origin {
        Origin::Assistant => format!("  assistant | {}", message.text),
        Origin::User => format!("        you > {}", message.text),
    }
}

#[must_use]
pub fn prompt_line(copy: &WidgetCopy, state: &SessionState) -> String {
    if state.pending() {
        format!("({}, waiting for reply)", copy.placeholder)
    } else {
        format!("({})", copy.placeholder)
    }
}

#[derive(Debug, Default)]
pub struct Renderer {
    printed: usize,
    panel_open: bool,
    pending: bool,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines to print to bring the terminal up to date with `state`.
    ///
    /// While the panel is closed, new messages are held back and printed
    /// once it reopens.
    pub fn frame(&mut self, copy: &WidgetCopy, state: &SessionState) -> Vec<String> {
        let mut lines = Vec::new();

        if state.panel_open() != self.panel_open {
            self.panel_open = state.panel_open();
            lines.push(panel_line(copy, self.panel_open));
        }
        if !self.panel_open {
            return lines;
        }

        let log = state.log();
        lines.extend(log[self.printed.min(log.len())..].iter().map(message_line));
        self.printed = log.len();

        if state.pending() && !self.pending {
            lines.push(LOADING.to_string());
        }
        self.pending = state.pending();
        lines
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
