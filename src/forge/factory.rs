//! forge::factory
//!
//! Forge creation.
//!
//! # Design
//!
//! Commands use `create_forge()` instead of constructing a specific forge
//! implementation, so the pipeline only ever depends on `dyn Forge`.
//!
//! # Example
//!
//! ```ignore
//! use gh_changelog::forge::create_forge;
//! use gh_changelog::secrets::Credentials;
//!
//! let forge = create_forge(&config, Credentials::Anonymous);
//! ```

use super::github::GitHubForge;
use super::traits::Forge;
use crate::core::config::ChangelogConfig;
use crate::secrets::Credentials;

/// Create the forge for the repository named by `config`.
pub fn create_forge(config: &ChangelogConfig, credentials: Credentials) -> Box<dyn Forge> {
    if !credentials.is_authenticated() {
        log::info!("No token file given, using unauthenticated GitHub access");
    }

    Box::new(GitHubForge::with_api_base(
        credentials,
        &config.owner,
        &config.repo,
        &config.api_base,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ConfigOverrides, FileConfig};

    #[test]
    fn creates_github_forge() {
        let config = ChangelogConfig::resolve(
            &FileConfig::default(),
            ConfigOverrides {
                repo: Some("widget".into()),
                ..Default::default()
            },
        );
        let forge = create_forge(&config, Credentials::Anonymous);
        assert_eq!(forge.name(), "github");
    }
}
