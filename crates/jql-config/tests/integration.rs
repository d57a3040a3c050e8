//! End-to-end configuration loading: discovery, parsing, merging and the query collaborators.

#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use jql_config::{Config, ConfigError, ConfigWarning, is_global_config};
use jql_query::{FieldResolver, FunctionResolver, Translator, ValidationIssue, keys};

/// A scratch directory tree.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

/// Loads without the global config of whoever runs the tests.
fn load_local(cwd: &Path) -> Config {
    let files: Vec<PathBuf> = jql_config::discover_config_files(cwd)
        .into_iter()
        .filter(|p| !is_global_config(p))
        .collect();
    Config::load_from_files(&files).unwrap()
}

#[test]
fn root_config_without_settings_gives_defaults() {
    let env = TestEnv::new();
    env.create_file(".jql.toml", "root = true\n");

    let config = Config::load(env.path()).unwrap();
    assert_eq!(config.parser.max_depth, 128);
    assert!(config.fields.system);
    assert_eq!(config.messages.locale, "en");
    assert_eq!(config.config_root.as_deref(), Some(env.path()));
}

#[test]
fn layered_project_configuration() {
    let env = TestEnv::new();
    env.create_file(
        ".jql.toml",
        r#"
[parser]
max_depth = 32

[fields]
known = ["team"]

[functions]
legacy = true
currentUser = true
"#,
    );
    env.create_file(
        "service/.jql.toml",
        r#"
[fields]
known = "Story Points"

[functions]
currentUser = false
"#,
    );
    let cwd = env.create_dir("service/src");

    let config = load_local(&cwd);
    assert_eq!(config.parser.max_depth, 32);
    assert_eq!(config.fields.known, vec!["Story Points", "team"]);
    assert_eq!(config.config_root, Some(env.path().join("service")));
    assert_eq!(config.sources.len(), 2);

    let fields = config.field_resolver();
    assert!(fields.exists("TEAM"));
    assert!(fields.exists("story points"));
    assert!(fields.exists("assignee"));

    let functions = config.function_resolver();
    assert!(!functions.is_enabled("currentUser"));
    assert!(functions.is_enabled("legacy"));
}

#[test]
fn validator_reports_configured_names() {
    let env = TestEnv::new();
    env.create_file(
        ".jql.toml",
        r#"
root = true

[fields]
system = false
known = ["project", "team"]

[functions]
currentUser = false
"#,
    );

    let config = Config::load(env.path()).unwrap();
    let query = config
        .parser()
        .parse_query("project = X AND status = Open AND team = currentUser() ORDER BY rank")
        .unwrap();
    let issues = config.validator().validate(&query);
    assert_eq!(
        issues,
        vec![
            ValidationIssue::UnknownField("status".into()),
            ValidationIssue::UnknownField("rank".into()),
            ValidationIssue::DisabledFunction("currentUser".into()),
        ]
    );
}

#[test]
fn localized_messages() {
    let env = TestEnv::new();
    env.create_file(
        ".jql.toml",
        r#"
root = true

[messages]
locale = "de"

[messages.catalog.de]
"jql.parse.expected.clause" = "Nach {2} fehlt eine Bedingung (Zeile {0}, Spalte {1})."
"#,
    );

    let config = Config::load(env.path()).unwrap();
    assert!(config.validate().is_empty());

    let error = config.parser().parse_query("a = b AND").unwrap_err();
    let catalog = config.catalog();
    assert_eq!(
        error.message().render(&catalog, &config.messages.locale),
        "Nach AND fehlt eine Bedingung (Zeile 1, Spalte 10)."
    );
    assert_eq!(
        catalog.translate(keys::BLANK_INPUT, &[], "de"),
        "The query must not be blank."
    );
}

#[test]
fn parser_depth_from_config() {
    let env = TestEnv::new();
    env.create_file(".jql.toml", "root = true\n[parser]\nmax_depth = 2\n");

    let config = Config::load(env.path()).unwrap();
    assert!(config.parser().parse_query("((a = b))").is_ok());
    let error = config.parser().parse_query("(((a = b)))").unwrap_err();
    assert_eq!(error.message().key(), keys::TOO_COMPLEX);
}

#[test]
fn warnings_surface_from_loaded_files() {
    let env = TestEnv::new();
    env.create_file(
        ".jql.toml",
        r#"
root = true

[fields]
system = false

[messages.catalog.en]
"jql.parse.blank.input" = "Blank {0}"
"#,
    );

    let warnings = Config::load(env.path()).unwrap().validate();
    assert_eq!(
        warnings,
        vec![
            ConfigWarning::NoFieldsKnown,
            ConfigWarning::MissingArgument {
                locale: "en".into(),
                key: keys::BLANK_INPUT.into(),
                index: 0,
            },
        ]
    );
}

#[test]
fn parse_error_names_the_file() {
    let env = TestEnv::new();
    let path = env.create_file(".jql.toml", "root = true\n[parser\n");

    match Config::load(env.path()).unwrap_err() {
        ConfigError::ParseToml { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_setting_names_the_file() {
    let env = TestEnv::new();
    let path = env.create_file(".jql.toml", "root = true\n[parser]\nmax_depth = 0\n");

    let err = Config::load(env.path()).unwrap_err();
    assert!(err.to_string().contains("parser.max_depth"));
    assert!(matches!(err, ConfigError::InvalidSetting { path: p, .. } if p == path));
}

#[test]
fn missing_file_is_a_read_error() {
    let env = TestEnv::new();
    let err = Config::load_from_files(&[env.path().join(".jql.toml")]).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}
