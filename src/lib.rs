pub mod analyzer;
pub mod changelog;
pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod rules;
pub mod sections;
pub mod sink;
pub mod warning;

pub use analyzer::{build_changelog, classify, Analysis, ReleaseAnalyzer, ReleaseDecision};
pub use changelog::{Changelog, ChangelogSection};
pub use config::{Config, ReleaseConfig};
pub use domain::{CommitRecord, ReleaseLevel};
pub use error::{ReleaseError, Result};
pub use pipeline::{ReleaseOutcome, ReleasePipeline, ReleasePlan};
pub use rules::{ReleaseRule, RuleTable};
pub use sections::{SectionEntry, SectionMap};
pub use warning::ReleaseWarning;
