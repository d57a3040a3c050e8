//! Locating `.jql.toml` files.
//!
//! Discovery walks from the working directory towards the filesystem root and then adds the
//! global `~/.jql.toml`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::debug;

use crate::{ConfigError, parse::is_root_config};

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".jql.toml";

/// Finds every configuration file that applies to `cwd`.
///
/// Paths come back highest precedence first: the file nearest `cwd` leads and the global file,
/// when present, comes last. A file with `root = true` ends the walk and suppresses the global
/// file.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let root = is_root_config(&candidate);
        debug!(path = %candidate.display(), root, "found config file");
        configs.push(candidate);
        if root {
            return configs;
        }
    }

    if let Some(global) = global_config_path()
        && global.is_file()
        && !configs.contains(&global)
    {
        debug!(path = %global.display(), "found global config file");
        configs.push(global);
    }

    configs
}

/// Returns the path to `~/.jql.toml`, or `None` without a home directory.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Like [`global_config_path`], but an error when no home directory is known.
pub fn require_global_config_path() -> Result<PathBuf, ConfigError> {
    global_config_path().ok_or(ConfigError::NoHomeDirectory)
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::TestDir;

    /// Discovered files minus the real global config of whoever runs the tests.
    fn local(configs: &[PathBuf]) -> Vec<&PathBuf> {
        configs.iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn nothing_found() {
        let dir = TestDir::new();
        let start = dir.create_dir("a/b/c");
        assert!(local(&discover_config_files(&start)).is_empty());
    }

    #[test]
    fn nearest_first() {
        let dir = TestDir::new();
        let top = dir.create_config_at_root();
        let middle = dir.create_config("a/b");
        let bottom = dir.create_config("a/b/c/d");
        let start = dir.create_dir("a/b/c/d/e");

        let configs = discover_config_files(&start);
        assert_eq!(local(&configs), vec![&bottom, &middle, &top]);
    }

    #[test]
    fn config_in_start_directory() {
        let dir = TestDir::new();
        let config = dir.create_config_at_root();
        assert_eq!(local(&discover_config_files(dir.path())), vec![&config]);
    }

    #[test]
    fn directory_named_like_config_is_skipped() {
        let dir = TestDir::new();
        fs::create_dir_all(dir.path().join(CONFIG_FILENAME)).unwrap();
        let start = dir.create_dir("sub");
        assert!(local(&discover_config_files(&start)).is_empty());
    }

    #[test]
    fn root_config_stops_the_walk() {
        let dir = TestDir::new();
        dir.create_config_at_root();
        let root = dir.create_root_config("project");
        let child = dir.create_config("project/sub");
        let start = dir.create_dir("project/sub/deep");

        // No global file either.
        assert_eq!(discover_config_files(&start), vec![child, root]);
    }

    #[test]
    fn root_false_keeps_walking() {
        let dir = TestDir::new();
        let top = dir.create_config_at_root();
        let project = dir.create_config_with_content("project", "root = false\n");
        let start = dir.create_dir("project/src");

        let configs = discover_config_files(&start);
        assert_eq!(local(&configs), vec![&project, &top]);
    }

    #[test]
    fn global_path_uses_config_filename() {
        let path = require_global_config_path().unwrap();
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/elsewhere/.jql.toml")));
    }
}
