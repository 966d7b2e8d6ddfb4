//! Release rules: which level each commit contributes.

use crate::domain::{CommitRecord, ReleaseLevel};
use crate::error::{ReleaseError, Result};

/// A single predicate → level mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseRule {
    /// Matches any commit flagged as breaking
    Breaking { release: ReleaseLevel },
    /// Matches on commit type, optionally narrowed to one scope
    Type {
        commit_type: String,
        scope: Option<String>,
        release: ReleaseLevel,
    },
}

impl ReleaseRule {
    pub fn breaking(release: ReleaseLevel) -> Self {
        ReleaseRule::Breaking { release }
    }

    pub fn for_type(commit_type: impl Into<String>, release: ReleaseLevel) -> Self {
        ReleaseRule::Type {
            commit_type: commit_type.into(),
            scope: None,
            release,
        }
    }

    pub fn release(&self) -> ReleaseLevel {
        match self {
            ReleaseRule::Breaking { release } | ReleaseRule::Type { release, .. } => *release,
        }
    }

    fn matches_type(&self, commit: &CommitRecord) -> bool {
        match self {
            ReleaseRule::Breaking { .. } => false,
            ReleaseRule::Type {
                commit_type, scope, ..
            } => {
                *commit_type == commit.commit_type
                    && scope
                        .as_ref()
                        .is_none_or(|s| commit.scope.as_deref() == Some(s.as_str()))
            }
        }
    }
}

/// Ordered, validated rule table.
///
/// For a breaking commit the first breaking rule decides. Otherwise the first
/// matching type rule decides, and anything unmatched contributes `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<ReleaseRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<ReleaseRule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(ReleaseError::config(
                "Release rule table is empty: no commit can ever match",
            ));
        }
        if !rules.iter().any(|r| matches!(r, ReleaseRule::Type { .. })) {
            return Err(ReleaseError::config(
                "Release rule table has no type rule: no commit type can ever match",
            ));
        }

        for (index, rule) in rules.iter().enumerate() {
            if let ReleaseRule::Type {
                commit_type, scope, ..
            } = rule
            {
                if commit_type.trim().is_empty() {
                    return Err(ReleaseError::config(format!(
                        "Release rule #{} has an empty type and can never match",
                        index + 1
                    )));
                }
                if scope.as_ref().is_some_and(|s| s.trim().is_empty()) {
                    return Err(ReleaseError::config(format!(
                        "Release rule #{} has an empty scope",
                        index + 1
                    )));
                }
            }
        }

        Ok(RuleTable { rules })
    }

    pub fn rules(&self) -> &[ReleaseRule] {
        &self.rules
    }

    /// Level a single commit contributes
    pub fn evaluate(&self, commit: &CommitRecord) -> ReleaseLevel {
        if commit.is_breaking {
            if let Some(rule) = self
                .rules
                .iter()
                .find(|r| matches!(r, ReleaseRule::Breaking { .. }))
            {
                return rule.release();
            }
        }

        if commit.is_untyped() {
            return ReleaseLevel::None;
        }

        self.rules
            .iter()
            .find(|r| r.matches_type(commit))
            .map(ReleaseRule::release)
            .unwrap_or(ReleaseLevel::None)
    }
}

impl Default for RuleTable {
    /// breaking → major; feat → minor; perf, fix, chore, refactor, revert → patch
    fn default() -> Self {
        RuleTable {
            rules: vec![
                ReleaseRule::breaking(ReleaseLevel::Major),
                ReleaseRule::for_type("perf", ReleaseLevel::Patch),
                ReleaseRule::for_type("fix", ReleaseLevel::Patch),
                ReleaseRule::for_type("chore", ReleaseLevel::Patch),
                ReleaseRule::for_type("feat", ReleaseLevel::Minor),
                ReleaseRule::for_type("refactor", ReleaseLevel::Patch),
                ReleaseRule::for_type("revert", ReleaseLevel::Patch),
            ],
        }
    }
}
