use std::fmt;

/// Non-fatal conditions found while analyzing commits.
/// These are reported to the caller and never abort a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseWarning {
    /// Message is not a conventional commit; it was treated as untyped
    MalformedCommit {
        index: usize,
        header: String,
        reason: String,
    },
    /// Commits exist but none of them warrants a release
    NoReleasableCommits { commit_count: usize },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::MalformedCommit {
                index,
                header,
                reason,
            } => {
                let short_header = if header.chars().count() > 60 {
                    let cut: String = header.chars().take(60).collect();
                    format!("{}...", cut)
                } else {
                    header.clone()
                };
                write!(
                    f,
                    "Commit #{} '{}' is not a conventional commit: {}",
                    index + 1,
                    short_header,
                    reason
                )
            }
            ReleaseWarning::NoReleasableCommits { commit_count } => {
                write!(
                    f,
                    "None of the {} analyzed commits triggers a release",
                    commit_count
                )
            }
        }
    }
}
