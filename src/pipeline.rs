//! Release workflow orchestration
//!
//! Runs the fixed stage order: parse → classify → version → changelog →
//! tags → sinks. Every stage consumes the previous stage's typed output;
//! nothing is loaded dynamically. Sinks see the analysis of every run and
//! the plan only when there is a release.

use crate::analyzer::{Analysis, ReleaseAnalyzer};
use crate::config::ReleaseConfig;
use crate::domain::ReleaseLevel;
use crate::error::{ReleaseError, Result};
use crate::sink::ReleaseSink;
use chrono::NaiveDate;
use tracing::{debug, info};

/// Everything needed to publish one release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    pub last_version: Option<semver::Version>,
    pub next_version: semver::Version,
    pub level: ReleaseLevel,
    /// Full version tag first, then any component tags
    pub tags: Vec<String>,
    /// Markdown release notes
    pub notes: String,
    pub analysis: Analysis,
}

/// Result of running the pipeline over a batch of commits
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// No commit warrants a release; sinks only received the analysis
    NoRelease(Analysis),
    Release(ReleasePlan),
}

impl ReleaseOutcome {
    pub fn analysis(&self) -> &Analysis {
        match self {
            ReleaseOutcome::NoRelease(analysis) => analysis,
            ReleaseOutcome::Release(plan) => &plan.analysis,
        }
    }

    pub fn plan(&self) -> Option<&ReleasePlan> {
        match self {
            ReleaseOutcome::NoRelease(_) => None,
            ReleaseOutcome::Release(plan) => Some(plan),
        }
    }
}

/// Ordered release pipeline over a validated configuration
pub struct ReleasePipeline {
    analyzer: ReleaseAnalyzer,
    sinks: Vec<Box<dyn ReleaseSink>>,
}

impl ReleasePipeline {
    pub fn new(config: ReleaseConfig) -> Self {
        ReleasePipeline {
            analyzer: ReleaseAnalyzer::new(config),
            sinks: Vec::new(),
        }
    }

    /// Append a sink; sinks run in the order they were added
    pub fn with_sink(mut self, sink: impl ReleaseSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn config(&self) -> &ReleaseConfig {
        self.analyzer.config()
    }

    /// Compute the release for `messages` without invoking any sink.
    ///
    /// `last_version` accepts a bare version (`1.2.3`) or a tag in the
    /// configured format (`v1.2.3`).
    pub fn plan<S: AsRef<str>>(
        &self,
        messages: &[S],
        last_version: Option<&str>,
        date: NaiveDate,
    ) -> Result<ReleaseOutcome> {
        let last_version = self.resolve_last_version(last_version)?;
        Ok(self.plan_from(messages, last_version, date))
    }

    fn plan_from<S: AsRef<str>>(
        &self,
        messages: &[S],
        last_version: Option<semver::Version>,
        date: NaiveDate,
    ) -> ReleaseOutcome {
        let analysis = self.analyzer.analyze_messages(messages);
        let level = analysis.decision.level;
        if !level.is_release() {
            info!(commits = analysis.commits.len(), "no release");
            return ReleaseOutcome::NoRelease(analysis);
        }

        let next_version = match &last_version {
            Some(last) => level.apply(last),
            None => self.config().first_release.clone(),
        };
        debug!(
            last = ?last_version.as_ref().map(|v| v.to_string()),
            next = %next_version,
            "computed next version"
        );

        let tags = self.config().tags.tags_for(&next_version);
        let notes = analysis
            .changelog
            .render_markdown(&analysis.commits, &next_version, level, date);

        info!(level = %level, version = %next_version, tags = ?tags, "release planned");

        ReleaseOutcome::Release(ReleasePlan {
            last_version,
            next_version,
            level,
            tags,
            notes,
            analysis,
        })
    }

    /// Plan the release and hand the result to every sink in order.
    ///
    /// Every sink receives the analysis first; the plan follows only for a
    /// release. The first failing sink aborts the run.
    pub fn run<S: AsRef<str>>(
        &mut self,
        messages: &[S],
        last_version: Option<&str>,
        date: NaiveDate,
    ) -> Result<ReleaseOutcome> {
        let last_version = self.resolve_last_version(last_version)?;
        let outcome = self.plan_from(messages, last_version.clone(), date);

        for sink in self.sinks.iter_mut() {
            debug!(sink = sink.name(), "emitting analysis");
            sink.emit_analysis(outcome.analysis(), last_version.as_ref())
                .map_err(|e| sink_failed(sink.name(), e))?;
        }

        if let ReleaseOutcome::Release(plan) = &outcome {
            for sink in self.sinks.iter_mut() {
                debug!(sink = sink.name(), "emitting release plan");
                sink.emit(plan).map_err(|e| sink_failed(sink.name(), e))?;
            }
        }

        Ok(outcome)
    }

    fn resolve_last_version(&self, raw: Option<&str>) -> Result<Option<semver::Version>> {
        raw.map(|raw| self.parse_last_version(raw)).transpose()
    }

    fn parse_last_version(&self, raw: &str) -> Result<semver::Version> {
        let raw = raw.trim();
        semver::Version::parse(raw)
            .or_else(|_| self.config().tags.pattern.parse(raw))
            .map_err(|_| {
                ReleaseError::version(format!(
                    "Cannot read last version '{}': expected X.Y.Z or a tag like '{}'",
                    raw,
                    self.config().tags.pattern.as_str()
                ))
            })
    }
}

fn sink_failed(name: &str, err: ReleaseError) -> ReleaseError {
    ReleaseError::sink(format!("{} sink failed: {}", name, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_plan_minor_from_tag() {
        let pipeline = ReleasePipeline::new(ReleaseConfig::default());
        let outcome = pipeline
            .plan(&["feat: add X", "fix: correct Y"], Some("v1.4.2"), date())
            .unwrap();
        let plan = outcome.plan().unwrap();
        assert_eq!(plan.next_version, semver::Version::new(1, 5, 0));
        assert_eq!(plan.tags, vec!["v1.5.0".to_string()]);
        assert!(plan.notes.starts_with("## 1.5.0 (2024-05-01)"));
    }

    #[test]
    fn test_first_release() {
        let pipeline = ReleasePipeline::new(ReleaseConfig::default());
        let outcome = pipeline.plan(&["fix: first"], None, date()).unwrap();
        assert_eq!(
            outcome.plan().unwrap().next_version,
            semver::Version::new(1, 0, 0)
        );
    }

    #[test]
    fn test_no_release_emits_analysis_only() {
        let recorder = RecordingSink::new();
        let mut pipeline =
            ReleasePipeline::new(ReleaseConfig::default()).with_sink(recorder.clone());
        let outcome = pipeline
            .run(&["docs: update readme"], Some("1.0.0"), date())
            .unwrap();
        assert!(matches!(outcome, ReleaseOutcome::NoRelease(_)));
        assert_eq!(recorder.analyses(), vec![outcome.analysis().clone()]);
        assert!(recorder.plans().is_empty());
    }

    #[test]
    fn test_release_emits_analysis_and_plan() {
        let recorder = RecordingSink::new();
        let mut pipeline =
            ReleasePipeline::new(ReleaseConfig::default()).with_sink(recorder.clone());
        pipeline.run(&["fix: x"], Some("1.0.0"), date()).unwrap();
        assert_eq!(recorder.analyses().len(), 1);
        assert_eq!(recorder.plans().len(), 1);
    }

    #[test]
    fn test_breaking_note_of_unmapped_type_reaches_notes() {
        let pipeline = ReleasePipeline::new(ReleaseConfig::default());
        let outcome = pipeline
            .plan(
                &["wip: drop node 14\n\nBREAKING CHANGE: node 14 unsupported"],
                Some("1.2.3"),
                date(),
            )
            .unwrap();
        let plan = outcome.plan().unwrap();
        assert_eq!(plan.next_version, semver::Version::new(2, 0, 0));
        assert_eq!(
            plan.notes,
            "## 2.0.0 (2024-05-01)\n\n### ⚠ BREAKING CHANGES\n\n* node 14 unsupported\n"
        );
    }

    #[test]
    fn test_invalid_last_version() {
        let pipeline = ReleasePipeline::new(ReleaseConfig::default());
        let err = pipeline
            .plan(&["fix: x"], Some("release-one"), date())
            .unwrap_err();
        assert!(err.to_string().contains("Cannot read last version"));
    }
}
