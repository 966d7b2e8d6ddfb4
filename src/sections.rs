//! Commit type → changelog section titles, in curated display order.

use crate::error::{ReleaseError, Result};
use std::collections::HashSet;

/// One configured changelog section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub commit_type: String,
    pub title: String,
    /// Known type that is left out of release notes
    pub hidden: bool,
}

impl SectionEntry {
    pub fn new(commit_type: impl Into<String>, title: impl Into<String>) -> Self {
        SectionEntry {
            commit_type: commit_type.into(),
            title: title.into(),
            hidden: false,
        }
    }
}

/// Ordered mapping from commit type to section title.
///
/// Declaration order is the order sections appear in the changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMap {
    entries: Vec<SectionEntry>,
}

impl SectionMap {
    pub fn new(entries: Vec<SectionEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.commit_type.trim().is_empty() {
                return Err(ReleaseError::config(format!(
                    "Section '{}' has an empty commit type",
                    entry.title
                )));
            }
            if entry.title.trim().is_empty() {
                return Err(ReleaseError::config(format!(
                    "Section for type '{}' has an empty title",
                    entry.commit_type
                )));
            }
            if !seen.insert(entry.commit_type.as_str()) {
                return Err(ReleaseError::config(format!(
                    "Duplicate section for commit type '{}'",
                    entry.commit_type
                )));
            }
        }
        Ok(SectionMap { entries })
    }

    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    /// Entries that produce changelog sections, in declaration order
    pub fn visible(&self) -> impl Iterator<Item = &SectionEntry> {
        self.entries.iter().filter(|e| !e.hidden)
    }

    /// Title for a commit type, `None` if unmapped or hidden
    pub fn title_for(&self, commit_type: &str) -> Option<&str> {
        self.visible()
            .find(|e| e.commit_type == commit_type)
            .map(|e| e.title.as_str())
    }
}

impl Default for SectionMap {
    fn default() -> Self {
        let entries = [
            ("feat", "Features"),
            ("fix", "Bug Fixes"),
            ("perf", "Performance Improvements"),
            ("chore", "Chores"),
            ("refactor", "Code Refactoring"),
            ("revert", "Reverts"),
            ("style", "Style"),
            ("test", "Tests"),
            ("docs", "Documentation"),
            ("ci", "CI/CD"),
            ("build", "Build"),
        ]
        .into_iter()
        .map(|(commit_type, title)| SectionEntry::new(commit_type, title))
        .collect();

        SectionMap { entries }
    }
}
