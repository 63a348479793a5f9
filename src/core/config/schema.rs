//! core::config::schema
//!
//! Configuration file schema.
//!
//! Located at (in order of precedence):
//! 1. `--config <path>`
//! 2. `$CHANGELOG_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/changelog/config.toml`
//! 4. `~/.changelog/config.toml`
//!
//! # Validation
//!
//! Values are validated after parsing. A key that is present must not be
//! empty; leave it out to get the built-in default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Defaults read from the configuration file.
///
/// Every field is optional; command-line flags override whatever is set here.
///
/// # Example
///
/// ```toml
/// owner = "myorg"
/// label = "release-note"
/// output = "./CHANGELOG-next.md"
/// base = "main"
/// api_base = "https://github.example.com/api/v3"
/// token_file = "/home/me/.config/changelog/token"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Repository owner or organization
    pub owner: Option<String>,

    /// Label filter for the search query
    pub label: Option<String>,

    /// Output file path
    pub output: Option<PathBuf>,

    /// Base branch the PRs must be merged into
    pub base: Option<String>,

    /// API root URL (GitHub Enterprise)
    pub api_base: Option<String>,

    /// Path to a file holding the API token
    pub token_file: Option<PathBuf>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("owner", &self.owner),
            ("label", &self.label),
            ("base", &self.base),
        ] {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(ConfigError::InvalidValue(format!(
                    "'{}' must not be empty",
                    key
                )));
            }
        }

        if let Some(api_base) = &self.api_base {
            if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "api_base '{}' must be an http(s) URL",
                    api_base
                )));
            }
        }

        if matches!(&self.output, Some(p) if p.as_os_str().is_empty()) {
            return Err(ConfigError::InvalidValue("'output' must not be empty".into()));
        }

        Ok(())
    }
}
