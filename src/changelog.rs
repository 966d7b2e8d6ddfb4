//! Grouped changelog and its Markdown release-notes rendering.

use crate::domain::{CommitRecord, ReleaseLevel};
use chrono::NaiveDate;
use std::fmt;

/// Commits sharing one section title, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogSection {
    pub title: String,
    pub commits: Vec<CommitRecord>,
}

impl ChangelogSection {
    pub fn subjects(&self) -> Vec<&str> {
        self.commits.iter().map(|c| c.subject.as_str()).collect()
    }
}

/// Changelog sections in section-map declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    sections: Vec<ChangelogSection>,
}

impl Changelog {
    pub(crate) fn from_sections(sections: Vec<ChangelogSection>) -> Self {
        Changelog { sections }
    }

    pub fn sections(&self) -> &[ChangelogSection] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// `(section title, subjects)` pairs
    pub fn to_pairs(&self) -> Vec<(&str, Vec<&str>)> {
        self.sections
            .iter()
            .map(|s| (s.title.as_str(), s.subjects()))
            .collect()
    }

    /// Every included commit, section by section
    pub fn commits(&self) -> impl Iterator<Item = &CommitRecord> {
        self.sections.iter().flat_map(|s| s.commits.iter())
    }

    /// Render release notes in the conventional-changelog layout.
    ///
    /// Patch releases get a level-3 heading, minor and major a level-2 one.
    /// Breaking notes are taken from every breaking commit in `commits`, so a
    /// breaking commit whose type is hidden or unmapped is still listed.
    pub fn render_markdown(
        &self,
        commits: &[CommitRecord],
        version: &semver::Version,
        level: ReleaseLevel,
        date: NaiveDate,
    ) -> String {
        let breaking = commits
            .iter()
            .filter(|c| c.is_breaking)
            .flat_map(|c| {
                c.breaking_notes
                    .iter()
                    .filter(|n| !n.is_empty())
                    .map(move |n| (c.scope.as_deref(), n.as_str()))
            })
            .collect();

        ReleaseNotes {
            changelog: self,
            breaking,
            version,
            level,
            date,
        }
        .to_string()
    }
}

struct ReleaseNotes<'a> {
    changelog: &'a Changelog,
    breaking: Vec<(Option<&'a str>, &'a str)>,
    version: &'a semver::Version,
    level: ReleaseLevel,
    date: NaiveDate,
}

impl fmt::Display for ReleaseNotes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = if self.level == ReleaseLevel::Patch {
            "###"
        } else {
            "##"
        };
        writeln!(
            f,
            "{} {} ({})",
            heading,
            self.version,
            self.date.format("%Y-%m-%d")
        )?;

        if !self.breaking.is_empty() {
            write!(f, "\n### ⚠ BREAKING CHANGES\n\n")?;
            for (scope, note) in &self.breaking {
                write_bullet(f, *scope, note)?;
            }
        }

        for section in &self.changelog.sections {
            write!(f, "\n### {}\n\n", section.title)?;
            for commit in &section.commits {
                write_bullet(f, commit.scope.as_deref(), &commit.subject)?;
            }
        }
        Ok(())
    }
}

fn write_bullet(f: &mut fmt::Formatter<'_>, scope: Option<&str>, text: &str) -> fmt::Result {
    match scope {
        Some(scope) => writeln!(f, "* **{}:** {}", scope, text),
        None => writeln!(f, "* {}", text),
    }
}
