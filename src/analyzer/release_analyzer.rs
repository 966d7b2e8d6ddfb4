use crate::analyzer::{build_changelog, classify, ReleaseDecision};
use crate::changelog::Changelog;
use crate::config::ReleaseConfig;
use crate::domain::CommitRecord;
use crate::warning::ReleaseWarning;
use tracing::{debug, warn};

/// Everything the engine derives from one batch of commits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub commits: Vec<CommitRecord>,
    pub decision: ReleaseDecision,
    pub changelog: Changelog,
    pub warnings: Vec<ReleaseWarning>,
}

/// Analyzes commits against a validated release configuration
pub struct ReleaseAnalyzer {
    config: ReleaseConfig,
}

impl ReleaseAnalyzer {
    /// Create a new release analyzer
    pub fn new(config: ReleaseConfig) -> Self {
        ReleaseAnalyzer { config }
    }

    pub fn config(&self) -> &ReleaseConfig {
        &self.config
    }

    /// Parse raw commit messages and analyze them.
    ///
    /// Messages that are not conventional commits become untyped records and
    /// are reported as [`ReleaseWarning::MalformedCommit`].
    pub fn analyze_messages<S: AsRef<str>>(&self, messages: &[S]) -> Analysis {
        let mut warnings = Vec::new();
        let commits: Vec<CommitRecord> = messages
            .iter()
            .enumerate()
            .map(|(index, message)| {
                let message = message.as_ref();
                CommitRecord::parse(message).unwrap_or_else(|reason| {
                    let record = CommitRecord::parse_lossy(message);
                    let warning = ReleaseWarning::MalformedCommit {
                        index,
                        header: record.subject.clone(),
                        reason: reason.to_string(),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                    record
                })
            })
            .collect();

        let mut analysis = self.analyze_commits(commits);
        warnings.append(&mut analysis.warnings);
        analysis.warnings = warnings;
        analysis
    }

    /// Analyze already structured commits
    pub fn analyze_commits(&self, commits: Vec<CommitRecord>) -> Analysis {
        let decision = classify(&commits, &self.config.rules);
        debug!(
            level = %decision.level,
            commits = commits.len(),
            contributing = decision.contributing_commits.len(),
            "classified commits"
        );

        let changelog = build_changelog(&commits, &self.config.sections);
        debug!(sections = changelog.sections().len(), "built changelog");

        let mut warnings = Vec::new();
        if !commits.is_empty() && !decision.is_release() {
            let warning = ReleaseWarning::NoReleasableCommits {
                commit_count: commits.len(),
            };
            warn!("{}", warning);
            warnings.push(warning);
        }

        Analysis {
            commits,
            decision,
            changelog,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReleaseLevel;

    fn analyzer() -> ReleaseAnalyzer {
        ReleaseAnalyzer::new(ReleaseConfig::default())
    }

    #[test]
    fn test_analyze_major() {
        let messages = ["feat: new feature", "fix(api)!: breaking change"];
        let analysis = analyzer().analyze_messages(&messages);
        assert_eq!(analysis.decision.level, ReleaseLevel::Major);
        assert!(analysis.warnings.is_empty());
    }

    #[test]
    fn test_analyze_minor() {
        let messages = vec!["feat: new feature".to_string(), "fix: bug fix".to_string()];
        assert_eq!(
            analyzer().analyze_messages(&messages).decision.level,
            ReleaseLevel::Minor
        );
    }

    #[test]
    fn test_analyze_patch() {
        let messages = ["fix: bug fix", "refactor: code cleanup"];
        assert_eq!(
            analyzer().analyze_messages(&messages).decision.level,
            ReleaseLevel::Patch
        );
    }

    #[test]
    fn test_analyze_chore_is_patch() {
        let messages = ["chore: update deps", "docs: update readme"];
        assert_eq!(
            analyzer().analyze_messages(&messages).decision.level,
            ReleaseLevel::Patch
        );
    }

    #[test]
    fn test_analyze_breaking_change_via_footer() {
        let messages = ["fix: rename API field\n\nBREAKING CHANGE: field changed from X to Y"];
        let analysis = analyzer().analyze_messages(&messages);
        assert_eq!(analysis.decision.level, ReleaseLevel::Major);
    }

    #[test]
    fn test_analyze_docs_only_warns_no_release() {
        let analysis = analyzer().analyze_messages(&["docs: update readme"]);
        assert_eq!(analysis.decision.level, ReleaseLevel::None);
        assert_eq!(
            analysis.changelog.to_pairs(),
            vec![("Documentation", vec!["update readme"])]
        );
        assert_eq!(
            analysis.warnings,
            vec![ReleaseWarning::NoReleasableCommits { commit_count: 1 }]
        );
    }

    #[test]
    fn test_analyze_non_conventional_commits() {
        let messages = ["Updated stuff", "fix: real fix", ""];
        let analysis = analyzer().analyze_messages(&messages);
        assert_eq!(analysis.decision.level, ReleaseLevel::Patch);
        assert_eq!(analysis.commits.len(), 3);
        assert!(analysis.commits[0].is_untyped());
        assert_eq!(analysis.warnings.len(), 2);
        assert!(matches!(
            &analysis.warnings[0],
            ReleaseWarning::MalformedCommit { index: 0, header, .. } if header == "Updated stuff"
        ));
        assert!(matches!(
            &analysis.warnings[1],
            ReleaseWarning::MalformedCommit { index: 2, .. }
        ));
        assert_eq!(analysis.changelog.to_pairs(), vec![("Bug Fixes", vec!["real fix"])]);
    }

    #[test]
    fn test_analyze_empty() {
        let messages: Vec<String> = Vec::new();
        let analysis = analyzer().analyze_messages(&messages);
        assert_eq!(analysis.decision.level, ReleaseLevel::None);
        assert!(analysis.changelog.is_empty());
        assert!(analysis.warnings.is_empty());
    }

    #[test]
    fn test_analyze_real_release_cycle() {
        let messages = [
            "feat(api): add user list endpoint",
            "feat(auth): add role-based access",
            "fix(ui): modal alignment",
            "docs: update api docs",
        ];
        let analysis = analyzer().analyze_messages(&messages);
        assert_eq!(analysis.decision.level, ReleaseLevel::Minor);
        assert_eq!(analysis.decision.contributing_commits.len(), 2);
        assert_eq!(
            analysis.changelog.to_pairs(),
            vec![
                ("Features", vec!["add user list endpoint", "add role-based access"]),
                ("Bug Fixes", vec!["modal alignment"]),
                ("Documentation", vec!["update api docs"]),
            ]
        );
    }
}
