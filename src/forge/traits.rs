//! forge::traits
//!
//! The release and search operations a changelog run needs from the host.
//!
//! # Design
//!
//! Four calls cover the whole pipeline: two release lookups that anchor the
//! merge window, one paged search, and one release edit. They are async and
//! every one of them can fail with a [`ForgeError`].
//!
//! Forge calls are made only after the local output file has been opened,
//! and a failed publish never touches the already-written file.
//!
//! # Example
//!
//! ```ignore
//! use gh_changelog::forge::{Forge, ForgeError};
//!
//! async fn window(forge: &dyn Forge) -> Result<(), ForgeError> {
//!     let latest = forge.latest_release().await?;
//!     let release = forge.get_release_by_tag(&latest.tag_name).await?;
//!     println!("{} created at {}", release.tag_name, release.created_at);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use crate::core::types::Issue;

/// Failure of a forge call, classified from the HTTP outcome.
#[derive(Debug, Clone, Error)]
pub enum ForgeError {
    /// The call needs a token and none is configured.
    #[error("authentication required")]
    AuthRequired,

    /// The token was rejected or lacks permission.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// Any other non-success response.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// The request never got a response.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// A published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Release ID (used for updates)
    pub id: u64,
    /// Tag the release points at
    pub tag_name: String,
    /// Display name, if set
    pub name: Option<String>,
    /// Creation time of the release
    pub created_at: DateTime<Utc>,
    /// Web URL of the release
    pub url: String,
    /// Current release notes
    pub body: Option<String>,
}

/// Result of an issue search.
#[derive(Debug, Clone, Default)]
pub struct SearchIssuesResult {
    /// Matching issues in forge order
    pub issues: Vec<Issue>,
    /// Total matches reported by the forge
    pub total_count: u64,
    /// True if matches exist beyond what was returned
    pub truncated: bool,
}

/// A repository host that can look up releases, search merged PRs and
/// edit release notes.
///
/// Bound to a single repository at construction. `Send + Sync` so the CLI
/// can hold it as `Box<dyn Forge>` across the runtime.
#[async_trait]
pub trait Forge: Send + Sync {
    /// Get the forge name (e.g., "github").
    fn name(&self) -> &'static str;

    /// Get a release by its tag name.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no release exists for the tag
    async fn get_release_by_tag(&self, tag: &str) -> Result<Release, ForgeError>;

    /// Get the latest published release.
    ///
    /// Drafts and pre-releases are not considered.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the repository has no published release
    async fn latest_release(&self) -> Result<Release, ForgeError>;

    /// Run an issue search and collect every page the host will serve.
    ///
    /// `query` is a space-separated list of `key:value` qualifiers.
    async fn search_issues(&self, query: &str) -> Result<SearchIssuesResult, ForgeError>;

    /// Replace the notes of the release tagged `tag` with `body`.
    ///
    /// # Errors
    ///
    /// - `AuthRequired` when running without credentials
    /// - `NotFound` if no release exists for the tag
    /// - `AuthFailed` if lacking permission to edit releases
    async fn update_release_notes(&self, tag: &str, body: &str) -> Result<Release, ForgeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_default_is_empty() {
        let result = SearchIssuesResult::default();
        assert!(result.issues.is_empty());
        assert_eq!(result.total_count, 0);
        assert!(!result.truncated);
    }

    #[test]
    fn forge_error_display() {
        assert_eq!(
            format!("{}", ForgeError::AuthRequired),
            "authentication required"
        );
        assert_eq!(
            format!("{}", ForgeError::AuthFailed("expired token".into())),
            "authentication failed: expired token"
        );
        assert_eq!(
            format!("{}", ForgeError::NotFound("release v1.0.0".into())),
            "not found: release v1.0.0"
        );
        assert_eq!(format!("{}", ForgeError::RateLimited), "rate limited");
        assert_eq!(
            format!(
                "{}",
                ForgeError::ApiError {
                    status: 422,
                    message: "Validation failed".into()
                }
            ),
            "API error: 422 - Validation failed"
        );
        assert_eq!(
            format!("{}", ForgeError::NetworkError("connection refused".into())),
            "network error: connection refused"
        );
    }
}
