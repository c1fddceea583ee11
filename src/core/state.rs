//! Interactive console session state.
//!
//! [`ConsoleState`] owns the in-memory, per-session pieces the dispatcher and
//! an embedding UI share: the input buffer under edit, command history,
//! live suggestions and the echo/enabled switches. Nothing here is persisted;
//! the state resets when the session ends.

use bevy::prelude::*;

use super::history::{HistoryBuffer, HistoryCycle};
use super::suggest::Suggestions;

/// Session state for the interactive console.
#[derive(Resource)]
pub struct ConsoleState {
    input: String,
    caret: usize,
    history: HistoryBuffer,
    suggestions: Suggestions,
    last_command: String,
    enabled: bool,
    /// Whether dispatch echoes submitted input to the output sink.
    pub echo_input: bool,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            input: String::new(),
            caret: 0,
            history: HistoryBuffer::default(),
            suggestions: Suggestions::default(),
            last_command: String::new(),
            enabled: true,
            echo_input: true,
        }
    }
}

impl ConsoleState {
    /// Get the current input buffer contents.
    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Get the edit caret position (byte offset into the input buffer).
    #[inline]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Get the command history.
    #[inline]
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Get the current suggestions.
    #[inline]
    pub fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    /// The resolved name (or first token) of the most recent submission.
    #[inline]
    pub fn last_command(&self) -> &str {
        &self.last_command
    }

    /// Whether the console session is enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the console session.
    ///
    /// Disabling clears the history, suggestions and input buffer.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.reset();
        }
        self.enabled = enabled;
    }

    /// Clear the session: history, suggestions, input buffer and caret.
    pub fn reset(&mut self) {
        self.input.clear();
        self.caret = 0;
        self.history.clear();
        self.suggestions.clear();
    }

    /// Record a submission into history, tracking the resolved command name.
    ///
    /// Called by dispatch for every submission, including unknown commands.
    pub fn record_submission(&mut self, name: &str, raw: &str) {
        self.last_command = name.to_string();
        self.history.record(raw);
    }

    /// Update the input buffer after an edit and recompute suggestions.
    ///
    /// Clearing the buffer also exits history browsing.
    pub fn on_input_changed<'a>(
        &mut self,
        text: impl Into<String>,
        names: impl Iterator<Item = &'a str>,
    ) {
        self.input = text.into();
        self.caret = self.input.len();
        if self.input.is_empty() {
            self.history.reset_cursor();
        }
        self.suggestions
            .refresh(&self.input, names, self.history.is_browsing());
    }

    /// Step through history: `+1` toward older entries, `-1` toward newer.
    ///
    /// Applies the recalled entry to the input buffer (caret at end) and
    /// returns the new buffer contents, or `None` if nothing changed.
    /// Stepping newer than the most recent entry clears the buffer.
    pub fn cycle_history(&mut self, direction: i32) -> Option<&str> {
        match self.history.cycle(direction) {
            HistoryCycle::Ignored => None,
            HistoryCycle::Exited => {
                self.input.clear();
                self.caret = 0;
                self.suggestions.clear();
                Some(&self.input)
            }
            HistoryCycle::Selected(i) => {
                self.input = self.history.get(i).unwrap_or_default().to_string();
                self.caret = self.input.len();
                // Browsing suppresses suggestions.
                self.suggestions.clear();
                Some(&self.input)
            }
        }
    }

    /// Move the suggestion cursor, wrapping around the candidate list.
    pub fn cycle_suggestions(&mut self, direction: i32) {
        self.suggestions.cycle(direction);
        self.caret = self.input.len();
    }

    /// Replace the input buffer with the suggestion under the cursor.
    ///
    /// Returns `false` when there is no candidate to accept.
    pub fn accept_suggestion<'a>(&mut self, names: impl Iterator<Item = &'a str>) -> bool {
        let Some(candidate) = self.suggestions.current() else {
            return false;
        };
        let candidate = candidate.to_string();
        self.on_input_changed(candidate, names);
        true
    }
}
