use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w*)(?:\(([^()\r\n]*)\))?(!)?: (.*)$").expect("header pattern is valid")
});

static BREAKING_FOOTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^BREAKING[ -]CHANGE:\s*(.*)$").expect("footer pattern is valid")
});

/// Structured conventional commit.
///
/// Records are immutable once built; an empty `commit_type` marks an untyped
/// commit that never contributes a release level or a changelog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    #[serde(rename = "type")]
    pub commit_type: String,
    pub scope: Option<String>,
    pub subject: String,
    pub is_breaking: bool,
    #[serde(default)]
    pub breaking_notes: Vec<String>,
}

/// Reason a message could not be read as a conventional commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    EmptyMessage,
    InvalidHeader,
    EmptySubject,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::EmptyMessage => write!(f, "commit message is empty"),
            ParseFailure::InvalidHeader => {
                write!(f, "header does not match 'type(scope): subject'")
            }
            ParseFailure::EmptySubject => write!(f, "header has no subject"),
        }
    }
}

impl CommitRecord {
    /// Create a non-breaking record without scope
    pub fn new(commit_type: impl Into<String>, subject: impl Into<String>) -> Self {
        CommitRecord {
            commit_type: commit_type.into(),
            scope: None,
            subject: subject.into(),
            is_breaking: false,
            breaking_notes: Vec::new(),
        }
    }

    /// Record for a message that is not a conventional commit
    pub fn untyped(subject: impl Into<String>) -> Self {
        CommitRecord::new("", subject)
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Mark the record as breaking, with an optional footer note
    pub fn breaking(mut self, note: Option<&str>) -> Self {
        self.is_breaking = true;
        if let Some(note) = note {
            self.breaking_notes.push(note.to_string());
        }
        self
    }

    pub fn is_untyped(&self) -> bool {
        self.commit_type.trim().is_empty()
    }

    /// Parse a raw commit message.
    ///
    /// Supports:
    /// - `type(scope)!: subject`
    /// - `type(scope): subject`
    /// - `type!: subject`
    /// - `type: subject`
    ///
    /// followed by an optional body. A body line starting with
    /// `BREAKING CHANGE:` or `BREAKING-CHANGE:` marks the commit as breaking;
    /// its text, up to the next blank line, becomes a breaking note.
    pub fn parse(message: &str) -> std::result::Result<Self, ParseFailure> {
        let message = message.trim_start();
        let mut lines = message.lines();
        let header = lines.next().unwrap_or_default();
        if header.trim().is_empty() {
            return Err(ParseFailure::EmptyMessage);
        }

        let captures = HEADER
            .captures(header)
            .ok_or(ParseFailure::InvalidHeader)?;

        let subject = captures
            .get(4)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        if subject.is_empty() {
            return Err(ParseFailure::EmptySubject);
        }

        let commit_type = captures
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let scope = captures
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty());
        let has_exclamation = captures.get(3).is_some();

        let mut breaking_notes = collect_breaking_notes(lines);
        let is_breaking = has_exclamation || !breaking_notes.is_empty();
        if has_exclamation && breaking_notes.is_empty() {
            breaking_notes.push(subject.clone());
        }

        Ok(CommitRecord {
            commit_type,
            scope,
            subject,
            is_breaking,
            breaking_notes,
        })
    }

    /// Parse a message, falling back to an untyped record on failure
    pub fn parse_lossy(message: &str) -> Self {
        CommitRecord::parse(message).unwrap_or_else(|_| {
            let header = message.trim_start().lines().next().unwrap_or_default();
            CommitRecord::untyped(header.trim())
        })
    }
}

fn collect_breaking_notes<'a>(body: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut notes = Vec::new();
    let mut current: Option<String> = None;

    for line in body {
        if let Some(captures) = BREAKING_FOOTER.captures(line.trim_end()) {
            if let Some(note) = current.take() {
                notes.push(note);
            }
            let text = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            current = Some(text.to_string());
        } else if let Some(note) = current.as_mut() {
            if line.trim().is_empty() {
                notes.push(std::mem::take(note));
                current = None;
            } else {
                if !note.is_empty() {
                    note.push(' ');
                }
                note.push_str(line.trim());
            }
        }
    }

    if let Some(note) = current {
        notes.push(note);
    }
    notes
}
