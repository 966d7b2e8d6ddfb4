use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic version component a set of changes warrants bumping.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `None < Patch < Minor < Major`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseLevel {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl ReleaseLevel {
    /// Name used in configuration files and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseLevel::None => "none",
            ReleaseLevel::Patch => "patch",
            ReleaseLevel::Minor => "minor",
            ReleaseLevel::Major => "major",
        }
    }

    /// Whether this level produces a new release at all
    pub fn is_release(&self) -> bool {
        *self != ReleaseLevel::None
    }

    /// Apply the bump to a version.
    ///
    /// Pre-release and build metadata are dropped for any real bump;
    /// `None` returns the version unchanged.
    pub fn apply(&self, version: &semver::Version) -> semver::Version {
        match self {
            ReleaseLevel::Major => semver::Version::new(version.major + 1, 0, 0),
            ReleaseLevel::Minor => semver::Version::new(version.major, version.minor + 1, 0),
            ReleaseLevel::Patch => {
                semver::Version::new(version.major, version.minor, version.patch + 1)
            }
            ReleaseLevel::None => version.clone(),
        }
    }
}

impl fmt::Display for ReleaseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseLevel {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(ReleaseLevel::None),
            "patch" => Ok(ReleaseLevel::Patch),
            "minor" => Ok(ReleaseLevel::Minor),
            "major" => Ok(ReleaseLevel::Major),
            other => Err(ReleaseError::config(format!(
                "Unknown release level '{}': expected none, patch, minor or major",
                other
            ))),
        }
    }
}
