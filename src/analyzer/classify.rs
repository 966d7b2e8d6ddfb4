use crate::domain::{CommitRecord, ReleaseLevel};
use crate::rules::RuleTable;

/// Overall release level plus the commits that reached it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseDecision {
    pub level: ReleaseLevel,
    /// Every commit whose own level equals `level`, in input order
    pub contributing_commits: Vec<CommitRecord>,
}

impl ReleaseDecision {
    pub fn is_release(&self) -> bool {
        self.level.is_release()
    }
}

/// Determine the release level warranted by a set of commits.
///
/// The result is the maximum per-commit level. Ties are not broken: all
/// commits at the maximum are reported, so the level itself does not depend
/// on input order.
pub fn classify(commits: &[CommitRecord], rules: &RuleTable) -> ReleaseDecision {
    let levels: Vec<ReleaseLevel> = commits.iter().map(|c| rules.evaluate(c)).collect();
    let level = levels.iter().copied().max().unwrap_or_default();

    let contributing_commits = commits
        .iter()
        .zip(&levels)
        .filter(|(_, l)| **l == level)
        .map(|(c, _)| c.clone())
        .collect();

    ReleaseDecision {
        level,
        contributing_commits,
    }
}
