// tests/config_test.rs
use release_engine::config::{load_config, load_release_config, Config};
use release_engine::{CommitRecord, ReleaseLevel};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.tag_format, "v{version}");
    assert!(!config.tag_components);
    assert_eq!(config.release_rules.len(), 7);
    assert_eq!(config.sections.len(), 11);
    assert_eq!(config.sections[0].section, "Features");
    assert_eq!(config.sections[10].section, "Build");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
tag_format = "release-{version}"

[[release_rules]]
breaking = true
release = "major"

[[release_rules]]
type = "docs"
release = "patch"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.tag_format, "release-{version}");
    assert_eq!(config.release_rules.len(), 2);
    // sections table omitted: defaults apply
    assert_eq!(config.sections.len(), 11);

    let validated = config.validate().unwrap();
    assert_eq!(
        validated.rules.evaluate(&CommitRecord::new("docs", "readme")),
        ReleaseLevel::Patch
    );
    assert_eq!(
        validated.rules.evaluate(&CommitRecord::new("feat", "x")),
        ReleaseLevel::None
    );
}

#[test]
fn test_fixture_with_scoped_rule_and_hidden_section() {
    let config = load_release_config(Some(Path::new("tests/fixtures/releaserc.toml")))
        .expect("Failed to load test config");

    assert!(config.tags.tag_components);
    assert_eq!(
        config
            .rules
            .evaluate(&CommitRecord::new("chore", "bump serde").with_scope("deps")),
        ReleaseLevel::Patch
    );
    assert_eq!(
        config.rules.evaluate(&CommitRecord::new("chore", "tidy")),
        ReleaseLevel::None
    );
    assert_eq!(config.sections.title_for("chore"), None);
    assert_eq!(config.sections.title_for("fix"), Some("Bug Fixes"));
}

#[test]
fn test_duplicate_sections_fixture_is_config_error() {
    let err = load_release_config(Some(Path::new("tests/fixtures/duplicate_sections.toml")))
        .unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("Duplicate section for commit type 'feat'"));
}

#[test]
fn test_empty_rule_table_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"release_rules = []\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_release_config(Some(temp_file.path())).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_config(Some(Path::new("tests/fixtures/does_not_exist.toml"))).unwrap_err();
    assert!(err.to_string().contains("I/O error"));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"tag_components = maybe\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path())).unwrap_err();
    assert!(err.is_config());
}
