use crate::domain::tag::default_component_tags;
use crate::domain::{ReleaseLevel, TagPattern, TagPolicy};
use crate::error::{ReleaseError, Result};
use crate::rules::{ReleaseRule, RuleTable};
use crate::sections::{SectionEntry, SectionMap};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "releaserc.toml";
/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".releaserc.toml";

/// Represents the release configuration file as written by users.
///
/// Every table is optional; missing ones fall back to the built-in release
/// rules and changelog sections. Call [`Config::validate`] to obtain the
/// immutable [`ReleaseConfig`] the engine runs on.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_tag_format")]
    pub tag_format: String,

    /// Also publish shorthand tags such as `v1` and `v1.2`
    #[serde(default)]
    pub tag_components: bool,

    #[serde(default = "default_component_tags")]
    pub component_tags: Vec<String>,

    #[serde(default = "default_first_release")]
    pub first_release: String,

    #[serde(default = "default_release_rules")]
    pub release_rules: Vec<ReleaseRuleConfig>,

    #[serde(default = "default_sections")]
    pub sections: Vec<SectionConfig>,
}

/// One `[[release_rules]]` entry.
///
/// Either `breaking = true` or a `type` (with optional `scope`) must be set.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseRuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaking: Option<bool>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub commit_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    pub release: ReleaseLevel,
}

/// One `[[sections]]` entry
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SectionConfig {
    #[serde(rename = "type")]
    pub commit_type: String,

    pub section: String,

    #[serde(default)]
    pub hidden: bool,
}

fn default_tag_format() -> String {
    "v{version}".to_string()
}

fn default_first_release() -> String {
    "1.0.0".to_string()
}

fn default_release_rules() -> Vec<ReleaseRuleConfig> {
    RuleTable::default()
        .rules()
        .iter()
        .map(|rule| match rule {
            ReleaseRule::Breaking { release } => ReleaseRuleConfig {
                breaking: Some(true),
                commit_type: None,
                scope: None,
                release: *release,
            },
            ReleaseRule::Type {
                commit_type,
                scope,
                release,
            } => ReleaseRuleConfig {
                breaking: None,
                commit_type: Some(commit_type.clone()),
                scope: scope.clone(),
                release: *release,
            },
        })
        .collect()
}

fn default_sections() -> Vec<SectionConfig> {
    SectionMap::default()
        .entries()
        .iter()
        .map(|entry| SectionConfig {
            commit_type: entry.commit_type.clone(),
            section: entry.title.clone(),
            hidden: entry.hidden,
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_format: default_tag_format(),
            tag_components: false,
            component_tags: default_component_tags(),
            first_release: default_first_release(),
            release_rules: default_release_rules(),
            sections: default_sections(),
        }
    }
}

impl ReleaseRuleConfig {
    fn to_rule(&self, position: usize) -> Result<ReleaseRule> {
        match (self.breaking, &self.commit_type) {
            (Some(true), None) => {
                if self.scope.is_some() {
                    return Err(ReleaseError::config(format!(
                        "Release rule #{}: a breaking rule cannot have a scope",
                        position
                    )));
                }
                Ok(ReleaseRule::breaking(self.release))
            }
            (None | Some(false), Some(commit_type)) => Ok(ReleaseRule::Type {
                commit_type: commit_type.clone(),
                scope: self.scope.clone(),
                release: self.release,
            }),
            (Some(true), Some(_)) => Err(ReleaseError::config(format!(
                "Release rule #{}: set either `breaking` or `type`, not both",
                position
            ))),
            (_, None) => Err(ReleaseError::config(format!(
                "Release rule #{}: needs `breaking = true` or a `type`",
                position
            ))),
        }
    }
}

impl Config {
    /// Validate the file contents into an immutable release configuration
    pub fn validate(&self) -> Result<ReleaseConfig> {
        let rules = self
            .release_rules
            .iter()
            .enumerate()
            .map(|(i, rule)| rule.to_rule(i + 1))
            .collect::<Result<Vec<_>>>()?;
        let rules = RuleTable::new(rules)?;

        let sections = SectionMap::new(
            self.sections
                .iter()
                .map(|s| SectionEntry {
                    commit_type: s.commit_type.clone(),
                    title: s.section.clone(),
                    hidden: s.hidden,
                })
                .collect(),
        )?;

        let tags = TagPolicy {
            pattern: TagPattern::new(self.tag_format.clone())?,
            tag_components: self.tag_components,
            component_tags: self.component_tags.clone(),
        };

        let first_release = semver::Version::parse(self.first_release.trim()).map_err(|e| {
            ReleaseError::config(format!(
                "Invalid first_release '{}': {}",
                self.first_release, e
            ))
        })?;

        Ok(ReleaseConfig {
            rules,
            sections,
            tags,
            first_release,
        })
    }
}

/// Validated configuration shared by every pipeline stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    pub rules: RuleTable,
    pub sections: SectionMap,
    pub tags: TagPolicy,
    /// Version used when there is no previous release
    pub first_release: semver::Version,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            rules: RuleTable::default(),
            sections: SectionMap::default(),
            tags: TagPolicy::default(),
            first_release: semver::Version::new(1, 0, 0),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releaserc.toml` in current directory
/// 3. `.releaserc.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        debug!(path = %path.display(), "loading release config");
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        debug!(path = LOCAL_CONFIG_FILE, "loading release config");
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE);
        if user_path.exists() {
            debug!(path = %user_path.display(), "loading release config");
            fs::read_to_string(user_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration from TOML text
pub fn parse_config(toml_str: &str) -> Result<Config> {
    Ok(toml::from_str(toml_str)?)
}

/// Load and validate in one step
pub fn load_release_config(config_path: Option<&Path>) -> Result<ReleaseConfig> {
    load_config(config_path)?.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates_to_defaults() {
        let validated = Config::default().validate().unwrap();
        assert_eq!(validated, ReleaseConfig::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_rule_with_breaking_and_type_rejected() {
        let config = parse_config(
            r#"
[[release_rules]]
breaking = true
type = "feat"
release = "major"
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn test_rule_without_predicate_rejected() {
        let config = parse_config(
            r#"
[[release_rules]]
release = "patch"
"#,
        )
        .unwrap();
        assert!(config.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_unknown_release_level_fails_parse() {
        let err = parse_config(
            r#"
[[release_rules]]
type = "feat"
release = "gigantic"
"#,
        )
        .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_bad_tag_format_rejected() {
        let config = Config {
            tag_format: "latest".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_first_release_rejected() {
        let config = Config {
            first_release: "one".to_string(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("first_release"));
    }
}
