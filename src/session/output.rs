//! Append-only output log of the console session.

use super::classify::Outcome;

/// What a rendered line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Echo of user input
    Command,
    Success,
    Error,
    /// Informational line, e.g. the startup banner
    System,
}

/// One rendered record. Lines are never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLine {
    kind: LineKind,
    text: String,
}

impl SessionLine {
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered log of session lines.
#[derive(Debug, Default)]
pub struct OutputLog {
    lines: Vec<SessionLine>,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, kind: LineKind, text: impl Into<String>) {
        self.lines.push(SessionLine {
            kind,
            text: text.into(),
        });
    }

    pub fn append_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success(text) => self.append(LineKind::Success, text),
            Outcome::Error(text) => self.append(LineKind::Error, text),
        }
    }

    pub fn lines(&self) -> &[SessionLine] {
        &self.lines
    }

    pub fn last(&self) -> Option<&SessionLine> {
        self.lines.last()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines of the given kind.
    pub fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|line| line.kind == kind).count()
    }
}
