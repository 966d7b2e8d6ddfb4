//! Analysis engine: release level and changelog from commits

pub mod classify;
pub mod grouping;
pub mod release_analyzer;

pub use classify::{classify, ReleaseDecision};
pub use grouping::build_changelog;
pub use release_analyzer::{Analysis, ReleaseAnalyzer};
