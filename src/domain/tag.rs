use crate::error::{ReleaseError, Result};

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pattern: String,
}

impl TagPattern {
    /// Create a tag pattern, requiring exactly one `{version}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.matches("{version}").count() != 1 {
            return Err(ReleaseError::config(format!(
                "Tag format '{}' must contain exactly one {{version}} placeholder",
                pattern
            )));
        }
        Ok(TagPattern { pattern })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &semver::Version) -> String {
        self.pattern.replace("{version}", &version.to_string())
    }

    /// Extract the version from a tag produced by this pattern
    pub fn parse(&self, tag: &str) -> Result<semver::Version> {
        let (prefix, suffix) = self
            .pattern
            .split_once("{version}")
            .ok_or_else(|| ReleaseError::tag("Pattern must contain {version} placeholder"))?;

        let version_part = tag
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            .ok_or_else(|| {
                ReleaseError::tag(format!(
                    "Tag '{}' does not match pattern '{}'",
                    tag, self.pattern
                ))
            })?;

        semver::Version::parse(version_part).map_err(|e| {
            ReleaseError::version(format!("Invalid version in tag '{}': {}", tag, e))
        })
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            pattern: "v{version}".to_string(),
        }
    }
}

/// Which tags a release publishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPolicy {
    pub pattern: TagPattern,
    /// Publish the component tags as well as the full version tag
    pub tag_components: bool,
    /// Templates using `{major}` and `{minor}`
    pub component_tags: Vec<String>,
}

impl Default for TagPolicy {
    fn default() -> Self {
        TagPolicy {
            pattern: TagPattern::default(),
            tag_components: false,
            component_tags: default_component_tags(),
        }
    }
}

pub fn default_component_tags() -> Vec<String> {
    vec!["v{major}".to_string(), "v{major}.{minor}".to_string()]
}

impl TagPolicy {
    /// All tags for a released version, full version tag first
    pub fn tags_for(&self, version: &semver::Version) -> Vec<String> {
        let mut tags = vec![self.pattern.format(version)];
        if self.tag_components {
            for template in &self.component_tags {
                let tag = template
                    .replace("{major}", &version.major.to_string())
                    .replace("{minor}", &version.minor.to_string());
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
        tags
    }
}
