//! Command history buffer.
//!
//! A bounded sequence of prior raw inputs, newest first, with a browsing
//! cursor driven by up/down style navigation.

use std::collections::VecDeque;

/// Default number of entries kept in the history buffer.
pub const HISTORY_CAPACITY: usize = 10;

/// Outcome of a history cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCycle {
    /// The cursor did not move (boundary or empty history).
    Ignored,
    /// Browsing ended; the input buffer should be cleared.
    Exited,
    /// The cursor now selects the entry at this index.
    Selected(usize),
}

/// Bounded history of submitted inputs, newest first.
#[derive(Debug)]
pub struct HistoryBuffer {
    entries: VecDeque<String>,
    capacity: usize,
    // None = not browsing, Some(0) = most recent entry.
    cursor: Option<usize>,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    /// Create a buffer holding up to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            cursor: None,
        }
    }

    /// Record a submitted input as the newest entry, evicting the oldest once
    /// capacity is exceeded. Resets the browsing cursor.
    pub fn record(&mut self, raw: impl Into<String>) {
        self.entries.push_front(raw.into());
        if self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
        self.cursor = None;
    }

    /// Get the number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the history is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by index (0 = most recent).
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Iterate over the entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Whether the cursor is currently browsing history.
    #[inline]
    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Get the current cursor position, if browsing.
    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Stop browsing without touching the entries.
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Clear all entries and stop browsing.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Step the cursor: `+1` toward older entries, `-1` toward newer.
    ///
    /// Moving older than the oldest entry or newer while not browsing is a
    /// no-op. Moving newer than the most recent entry exits browsing, which
    /// callers surface by clearing the input buffer.
    pub fn cycle(&mut self, direction: i32) -> HistoryCycle {
        if self.entries.is_empty() {
            return HistoryCycle::Ignored;
        }

        match (self.cursor, direction) {
            (Some(i), d) if d > 0 && i + 1 >= self.entries.len() => HistoryCycle::Ignored,
            (None, d) if d < 0 => HistoryCycle::Ignored,
            (Some(0), d) if d < 0 => {
                self.cursor = None;
                HistoryCycle::Exited
            }
            (cursor, d) if d > 0 => {
                let next = cursor.map_or(0, |i| i + 1);
                self.cursor = Some(next);
                HistoryCycle::Selected(next)
            }
            (Some(i), d) if d < 0 => {
                self.cursor = Some(i - 1);
                HistoryCycle::Selected(i - 1)
            }
            _ => HistoryCycle::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> HistoryBuffer {
        let mut history = HistoryBuffer::default();
        for i in 0..n {
            history.record(format!("cmd{}", i));
        }
        history
    }

    #[test]
    fn test_record_newest_first() {
        let history = filled(3);
        assert_eq!(history.get(0), Some("cmd2"));
        assert_eq!(history.get(2), Some("cmd0"));
    }

    #[test]
    fn test_eviction_at_capacity() {
        let history = filled(11);
        assert_eq!(history.len(), 10);
        assert_eq!(history.get(0), Some("cmd10"));
        // The oldest entry was evicted.
        assert_eq!(history.get(9), Some("cmd1"));
        assert!(!history.iter().any(|e| e == "cmd0"));
    }

    #[test]
    fn test_cycle_newest_to_oldest_then_stops() {
        let mut history = filled(11);

        let mut seen = Vec::new();
        for _ in 0..10 {
            match history.cycle(1) {
                HistoryCycle::Selected(i) => seen.push(history.get(i).unwrap().to_string()),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(seen.first().map(String::as_str), Some("cmd10"));
        assert_eq!(seen.last().map(String::as_str), Some("cmd1"));

        // Further steps past the oldest entry are ignored.
        assert_eq!(history.cycle(1), HistoryCycle::Ignored);
        assert_eq!(history.cursor(), Some(9));
    }

    #[test]
    fn test_cycle_newer_than_most_recent_exits() {
        let mut history = filled(3);
        assert_eq!(history.cycle(1), HistoryCycle::Selected(0));
        assert_eq!(history.cycle(-1), HistoryCycle::Exited);
        assert!(!history.is_browsing());
        // Once not browsing, newer steps are ignored.
        assert_eq!(history.cycle(-1), HistoryCycle::Ignored);
    }

    #[test]
    fn test_cycle_empty_is_ignored() {
        let mut history = HistoryBuffer::default();
        assert_eq!(history.cycle(1), HistoryCycle::Ignored);
        assert_eq!(history.cycle(-1), HistoryCycle::Ignored);
    }

    #[test]
    fn test_record_resets_cursor() {
        let mut history = filled(3);
        history.cycle(1);
        assert!(history.is_browsing());
        history.record("fresh");
        assert!(!history.is_browsing());
        assert_eq!(history.get(0), Some("fresh"));
    }

    #[test]
    fn test_clear() {
        let mut history = filled(3);
        history.cycle(1);
        history.clear();
        assert!(history.is_empty());
        assert!(!history.is_browsing());
    }
}
