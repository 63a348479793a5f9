//! engine::resolve
//!
//! Release time resolution.
//!
//! Turns a release tag into the instant the release was created, truncated to
//! seconds and rendered in UTC. When no current release is configured the
//! latest published release stands in for it.

use thiserror::Error;

use crate::core::types::{ReleaseRef, ReleaseTimestamp};
use crate::forge::{Forge, ForgeError};

/// Errors from release resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The release does not exist on the forge.
    #[error("release not found: {0}")]
    NotFound(String),

    /// The forge call failed for network, auth, or API reasons.
    #[error("failed to reach forge: {0}")]
    Transport(ForgeError),
}

impl From<ForgeError> for ResolveError {
    fn from(err: ForgeError) -> Self {
        match err {
            ForgeError::NotFound(what) => ResolveError::NotFound(what),
            other => ResolveError::Transport(other),
        }
    }
}

/// Resolve `tag` to its release creation time.
///
/// # Errors
///
/// - `NotFound` if the tag is empty or has no release
/// - `Transport` for any other forge failure
pub async fn resolve(forge: &dyn Forge, tag: &str) -> Result<ReleaseRef, ResolveError> {
    if tag.is_empty() {
        return Err(ResolveError::NotFound("empty release tag".into()));
    }

    let release = forge.get_release_by_tag(tag).await.map_err(|e| {
        log::error!("Cannot get the creation time of {}: {}", tag, e);
        ResolveError::from(e)
    })?;

    let created_at = ReleaseTimestamp::from_datetime(release.created_at);
    log::debug!("Release {} created at {}", tag, created_at);

    Ok(ReleaseRef {
        tag: tag.to_string(),
        created_at,
    })
}

/// Return `current` if given, otherwise the latest published release's tag.
///
/// # Errors
///
/// - `NotFound` if no release is published
/// - `Transport` for any other forge failure
pub async fn current_release_tag(
    forge: &dyn Forge,
    current: Option<&str>,
) -> Result<String, ResolveError> {
    match current {
        Some(tag) if !tag.is_empty() => Ok(tag.to_string()),
        _ => {
            let latest = forge.latest_release().await?;
            log::info!("Last release version: {}", latest.tag_name);
            Ok(latest.tag_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::mock::{FailOn, MockForge, MockOperation};

    #[tokio::test]
    async fn resolves_and_formats_utc() {
        let forge = MockForge::new().with_release("v1.0.0", "2023-05-01T10:03:07.250+02:00");
        let release = resolve(&forge, "v1.0.0").await.unwrap();

        assert_eq!(release.tag, "v1.0.0");
        assert_eq!(release.created_at.to_string(), "2023-05-01T08:03:07Z");
    }

    #[tokio::test]
    async fn missing_tag_is_not_found() {
        let forge = MockForge::new();
        let err = resolve(&forge, "v0.0.1").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_tag_skips_forge() {
        let forge = MockForge::new();
        let err = resolve(&forge, "").await.unwrap_err();

        assert!(matches!(err, ResolveError::NotFound(_)));
        assert!(forge.operations().is_empty());
    }

    #[tokio::test]
    async fn network_failure_is_transport() {
        let forge = MockForge::new().fail_on(FailOn::GetReleaseByTag(ForgeError::NetworkError(
            "connection refused".into(),
        )));
        let err = resolve(&forge, "v1.0.0").await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Transport(ForgeError::NetworkError(_))
        ));
    }

    #[tokio::test]
    async fn explicit_current_release_is_kept() {
        let forge = MockForge::new().with_release("v2.0.0", "2023-03-01T00:00:00Z");
        let tag = current_release_tag(&forge, Some("v1.1.0")).await.unwrap();

        assert_eq!(tag, "v1.1.0");
        assert!(forge.operations().is_empty());
    }

    #[tokio::test]
    async fn missing_current_release_uses_latest() {
        let forge = MockForge::new()
            .with_release("v1.0.0", "2023-01-01T00:00:00Z")
            .with_release("v1.1.0", "2023-02-01T00:00:00Z");
        let tag = current_release_tag(&forge, None).await.unwrap();

        assert_eq!(tag, "v1.1.0");
        assert_eq!(forge.operations(), vec![MockOperation::LatestRelease]);
    }

    #[tokio::test]
    async fn no_published_release() {
        let forge = MockForge::new();
        let err = current_release_tag(&forge, Some("")).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(_)));
    }
}
