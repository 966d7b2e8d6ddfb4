//! Output sinks that receive the analysis of every run and the plan of every
//! release.
//!
//! Publishing tags and hosting-provider releases is left to external tools;
//! the sinks here cover version files and in-memory recording.

use crate::analyzer::Analysis;
use crate::error::{ReleaseError, Result};
use crate::pipeline::ReleasePlan;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

pub const LAST_VERSION_FILE: &str = "LAST_VERSION.txt";
pub const VERSION_FILE: &str = "VERSION.txt";

/// Receives the pipeline's output
pub trait ReleaseSink: Send {
    /// Short name used in logs and errors
    fn name(&self) -> &str;

    /// Called on every run, release or not, before any plan is emitted
    fn emit_analysis(
        &mut self,
        _analysis: &Analysis,
        _last_version: Option<&semver::Version>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called only when the run produces a release
    fn emit(&mut self, plan: &ReleasePlan) -> Result<()>;
}

/// Writes `LAST_VERSION.txt` on every run and `VERSION.txt` on releases.
///
/// Each file holds one version followed by a newline; `LAST_VERSION.txt` is
/// just a newline when there is no previous release.
#[derive(Debug, Clone)]
pub struct VersionFileSink {
    dir: PathBuf,
}

impl VersionFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        VersionFileSink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(ReleaseError::sink(format!(
                "Output directory does not exist: {}",
                self.dir.display()
            )));
        }
        Ok(())
    }
}

impl ReleaseSink for VersionFileSink {
    fn name(&self) -> &str {
        "version-files"
    }

    fn emit_analysis(
        &mut self,
        _analysis: &Analysis,
        last_version: Option<&semver::Version>,
    ) -> Result<()> {
        self.ensure_dir()?;
        let last = last_version.map(|v| v.to_string()).unwrap_or_default();
        fs::write(self.dir.join(LAST_VERSION_FILE), format!("{}\n", last))?;
        info!(dir = %self.dir.display(), last = %last, "wrote last version file");
        Ok(())
    }

    fn emit(&mut self, plan: &ReleasePlan) -> Result<()> {
        self.ensure_dir()?;
        fs::write(
            self.dir.join(VERSION_FILE),
            format!("{}\n", plan.next_version),
        )?;
        info!(
            dir = %self.dir.display(),
            version = %plan.next_version,
            "wrote version file"
        );
        Ok(())
    }
}

/// Keeps every emitted analysis and plan in memory; clones share the same
/// record
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    analyses: Arc<Mutex<Vec<Analysis>>>,
    plans: Arc<Mutex<Vec<ReleasePlan>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyses(&self) -> Vec<Analysis> {
        self.analyses
            .lock()
            .map(|analyses| analyses.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn plans(&self) -> Vec<ReleasePlan> {
        self.plans
            .lock()
            .map(|plans| plans.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl ReleaseSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn emit_analysis(
        &mut self,
        analysis: &Analysis,
        _last_version: Option<&semver::Version>,
    ) -> Result<()> {
        self.analyses
            .lock()
            .map_err(|_| ReleaseError::sink("recording sink lock poisoned"))?
            .push(analysis.clone());
        Ok(())
    }

    fn emit(&mut self, plan: &ReleasePlan) -> Result<()> {
        self.plans
            .lock()
            .map_err(|_| ReleaseError::sink("recording sink lock poisoned"))?
            .push(plan.clone());
        Ok(())
    }
}
