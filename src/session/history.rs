//! Command history tracking and navigation.
//!
//! This module keeps a bounded buffer of submitted commands and a cursor
//! for Up/Down browsing. The cursor counts from the most recent entry:
//! `None` means the user is not browsing, `Some(0)` is the newest entry and
//! larger offsets walk toward the oldest one.

use std::collections::VecDeque;

/// Default number of commands to keep in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

#[derive(Clone, Debug)]
pub struct History {
    commands: VecDeque<String>,
    capacity: usize,
    cursor: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a history holding at most `capacity` commands (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            commands: VecDeque::with_capacity(capacity),
            capacity,
            cursor: None,
        }
    }

    /// Record a submitted command.
    /// Skips duplicates of the last command and always leaves browsing mode.
    pub fn record(&mut self, cmd: &str) {
        self.cursor = None;

        if self.commands.back().map(String::as_str) == Some(cmd) {
            return;
        }

        self.commands.push_back(cmd.to_string());

        while self.commands.len() > self.capacity {
            self.commands.pop_front();
        }
    }

    /// Step one entry toward the oldest command.
    ///
    /// Returns `None` at the oldest boundary (or with an empty buffer), in
    /// which case the caller keeps its current input.
    pub fn older(&mut self) -> Option<&str> {
        let next = match self.cursor {
            None => 0,
            Some(offset) => offset + 1,
        };
        if next >= self.commands.len() {
            return None;
        }
        self.cursor = Some(next);
        self.entry_at(next)
    }

    /// Step one entry toward the newest command.
    ///
    /// Stepping past the newest entry leaves browsing mode and yields the
    /// empty string. Returns `None` when not browsing.
    pub fn newer(&mut self) -> Option<&str> {
        match self.cursor {
            None => None,
            Some(0) => {
                self.cursor = None;
                Some("")
            }
            Some(offset) => {
                self.cursor = Some(offset - 1);
                self.entry_at(offset - 1)
            }
        }
    }

    /// Current browsing offset from the newest entry.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Whether Up/Down browsing is active.
    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    fn entry_at(&self, offset: usize) -> Option<&str> {
        let idx = self.commands.len().checked_sub(offset + 1)?;
        self.commands.get(idx).map(String::as_str)
    }


    /// Iterate over all commands, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get total number of commands in history.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if history is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(cmds: &[&str]) -> History {
        let mut history = History::new();
        for cmd in cmds {
            history.record(cmd);
        }
        history
    }

    #[test]
    fn test_capacity_is_never_exceeded() {
        let mut history = History::with_capacity(5);
        for i in 0..23 {
            history.record(&format!("cmd{}", i));
            assert!(history.len() <= 5);
        }
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["cmd18", "cmd19", "cmd20", "cmd21", "cmd22"]);
    }

    #[test]
    fn test_default_capacity_evicts_oldest() {
        let mut history = History::new();
        for i in 0..150 {
            history.record(&format!("cmd{}", i));
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(history.iter().next(), Some("cmd50"));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut history = History::with_capacity(0);
        history.record("a");
        history.record("b");
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_adjacent_duplicate_is_suppressed() {
        let mut history = filled(&["ls", "ls"]);
        assert_eq!(history.len(), 1);

        // Only adjacent duplicates are dropped
        history.record("pwd");
        history.record("ls");
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["ls", "pwd", "ls"]);
    }

    #[test]
    fn test_older_walks_newest_to_oldest() {
        let mut history = filled(&["one", "two", "three"]);

        assert_eq!(history.older(), Some("three"));
        assert_eq!(history.older(), Some("two"));
        assert_eq!(history.older(), Some("one"));
        assert_eq!(history.cursor(), Some(2));

        // Oldest boundary is a no-op
        assert_eq!(history.older(), None);
        assert_eq!(history.cursor(), Some(2));
    }

    #[test]
    fn test_older_fewer_calls_than_entries() {
        let mut history = filled(&["a", "b", "c", "d"]);
        let seen: Vec<String> = (0..2).filter_map(|_| history.older().map(str::to_string)).collect();
        assert_eq!(seen, vec!["d", "c"]);
    }

    #[test]
    fn test_newer_returns_to_input() {
        let mut history = filled(&["one", "two", "three"]);
        history.older();
        history.older();

        assert_eq!(history.newer(), Some("three"));
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.newer(), Some(""));
        assert_eq!(history.cursor(), None);

        // Not browsing anymore
        assert_eq!(history.newer(), None);
    }

    #[test]
    fn test_newer_when_not_browsing_is_noop() {
        let mut history = filled(&["one"]);
        assert_eq!(history.newer(), None);
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn test_empty_history_navigation_is_noop() {
        let mut history = History::new();
        assert_eq!(history.older(), None);
        assert_eq!(history.newer(), None);
        assert!(!history.is_browsing());
    }

    #[test]
    fn test_record_resets_cursor() {
        let mut history = filled(&["one", "two"]);
        history.older();
        history.older();
        assert!(history.is_browsing());

        history.record("two");
        assert_eq!(history.cursor(), None);
        assert_eq!(history.older(), Some("two"));
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut history = filled(&["a", "b", "c"]);
        for step in 0..20 {
            if step % 3 == 0 {
                history.newer();
            } else {
                history.older();
            }
            if let Some(offset) = history.cursor() {
                assert!(offset < history.len());
            }
        }
    }
}
