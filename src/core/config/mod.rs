//! core::config
//!
//! Configuration schema, loading, and resolution.
//!
//! # Overview
//!
//! A run is described by one immutable [`ChangelogConfig`], built once at
//! startup and passed by reference to every component. Nothing downstream
//! reads flags, environment variables, or files on its own.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Config file
//! 3. CLI flags
//!
//! # Config File Locations
//!
//! Searched in order:
//! 1. An explicit `--config` path (must exist)
//! 2. `$CHANGELOG_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/changelog/config.toml`
//! 4. `~/.changelog/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use gh_changelog::core::config::{load, ChangelogConfig, ConfigOverrides};
//!
//! let (file, _path) = load(None).unwrap();
//! let config = ChangelogConfig::resolve(
//!     &file,
//!     ConfigOverrides {
//!         repo: Some("hello-world".into()),
//!         previous_release: Some("v1.0.0".into()),
//!         ..Default::default()
//!     },
//! );
//! println!("Base branch: {}", config.base);
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default repository owner.
pub const DEFAULT_OWNER: &str = "knabben";

/// Default output file.
pub const DEFAULT_OUTPUT: &str = "./release-note";

/// Default base branch for the merged-PR search.
pub const DEFAULT_BASE: &str = "master";

/// Default GitHub API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Load the config file.
///
/// With `explicit` set, that file must exist. Otherwise the standard
/// locations are searched and a missing file means defaults.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read, parsed, or
/// validated.
pub fn load(explicit: Option<&Path>) -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover(),
    };

    match path {
        Some(path) => {
            let config = read(&path)?;
            config.validate()?;
            Ok((config, Some(path)))
        }
        None => Ok((FileConfig::default(), None)),
    }
}

/// Find the first existing config file in the standard locations.
fn discover() -> Option<PathBuf> {
    // 1. Check $CHANGELOG_CONFIG
    if let Ok(path) = std::env::var("CHANGELOG_CONFIG") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. Check $XDG_CONFIG_HOME/changelog/config.toml
    if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_home).join("changelog/config.toml");
        if path.exists() {
            return Some(path);
        }
    }

    // 3. Check ~/.changelog/config.toml
    dirs::home_dir()
        .map(|home| home.join(".changelog/config.toml"))
        .filter(|path| path.exists())
}

/// Read and parse a config file.
pub fn read(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub label: Option<String>,
    pub output: Option<PathBuf>,
    pub token_file: Option<PathBuf>,
    pub previous_release: Option<String>,
    pub current_release: Option<String>,
    pub base: Option<String>,
    pub api_base: Option<String>,
    pub save: bool,
}

/// Fully resolved settings for one changelog run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Label filter; empty means unfiltered
    pub label: String,
    /// Output file path
    pub output: PathBuf,
    /// Token file; `None` selects anonymous access
    pub token_file: Option<PathBuf>,
    /// Previous release tag (start of the window)
    pub previous_release: String,
    /// Current release tag; `None` means the latest published release
    pub current_release: Option<String>,
    /// Base branch filter
    pub base: String,
    /// API root URL
    pub api_base: String,
    /// Publish the rendered notes to the current release
    pub save: bool,
}

impl ChangelogConfig {
    /// Merge CLI overrides over the config file over built-in defaults.
    ///
    /// Empty strings for the token file and current release are treated as
    /// unset, matching their flag defaults.
    pub fn resolve(file: &FileConfig, cli: ConfigOverrides) -> Self {
        Self {
            owner: cli
                .owner
                .or_else(|| file.owner.clone())
                .unwrap_or_else(|| DEFAULT_OWNER.to_string()),
            repo: cli.repo.unwrap_or_default(),
            label: cli.label.or_else(|| file.label.clone()).unwrap_or_default(),
            output: cli
                .output
                .or_else(|| file.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            token_file: cli
                .token_file
                .or_else(|| file.token_file.clone())
                .filter(|p| !p.as_os_str().is_empty()),
            previous_release: cli.previous_release.unwrap_or_default(),
            current_release: cli.current_release.filter(|c| !c.is_empty()),
            base: cli
                .base
                .or_else(|| file.base.clone())
                .unwrap_or_else(|| DEFAULT_BASE.to_string()),
            api_base: cli
                .api_base
                .or_else(|| file.api_base.clone())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            save: cli.save,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolve_defaults() {
        let config = ChangelogConfig::resolve(&FileConfig::default(), ConfigOverrides::default());

        assert_eq!(config.owner, DEFAULT_OWNER);
        assert_eq!(config.repo, "");
        assert_eq!(config.label, "");
        assert_eq!(config.output, PathBuf::from("./release-note"));
        assert_eq!(config.base, "master");
        assert_eq!(config.api_base, "https://api.github.com");
        assert!(config.token_file.is_none());
        assert!(config.current_release.is_none());
        assert!(!config.save);
    }

    #[test]
    fn file_overrides_defaults() {
        let file = FileConfig {
            owner: Some("myorg".into()),
            base: Some("main".into()),
            ..Default::default()
        };
        let config = ChangelogConfig::resolve(&file, ConfigOverrides::default());

        assert_eq!(config.owner, "myorg");
        assert_eq!(config.base, "main");
    }

    #[test]
    fn cli_overrides_file() {
        let file = FileConfig {
            owner: Some("myorg".into()),
            label: Some("release-note".into()),
            ..Default::default()
        };
        let config = ChangelogConfig::resolve(
            &file,
            ConfigOverrides {
                owner: Some("other".into()),
                save: true,
                ..Default::default()
            },
        );

        assert_eq!(config.owner, "other");
        assert_eq!(config.label, "release-note");
        assert!(config.save);
    }

    #[test]
    fn empty_current_release_means_latest() {
        let config = ChangelogConfig::resolve(
            &FileConfig::default(),
            ConfigOverrides {
                current_release: Some(String::new()),
                token_file: Some(PathBuf::new()),
                ..Default::default()
            },
        );

        assert!(config.current_release.is_none());
        assert!(config.token_file.is_none());
    }

    #[test]
    fn load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
            owner = "acme"
            base = "develop"
            "#,
        )
        .unwrap();

        let (file, path) = load(Some(&config_path)).unwrap();
        assert_eq!(file.owner.as_deref(), Some("acme"));
        assert_eq!(path, Some(config_path));
    }

    #[test]
    fn load_explicit_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let result = load(Some(&temp.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn load_invalid_value_fails() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "base = \"\"\n").unwrap();

        let result = load(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn parse_error_names_path() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "owner = [").unwrap();

        let err = read(&config_path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
