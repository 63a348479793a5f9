//! forge::mock
//!
//! In-memory forge for pipeline tests.
//!
//! # Design
//!
//! Releases and issues are seeded through builder methods. Every call is
//! recorded as a [`MockOperation`], and one operation at a time can be made
//! to fail through [`FailOn`].
//!
//! Searches ignore the query text and return every stored issue in insertion
//! order; the recorded query is available for assertions.
//!
//! # Example
//!
//! ```
//! use gh_changelog::forge::mock::MockForge;
//! use gh_changelog::forge::Forge;
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::new()
//!     .with_release("v1.0.0", "2023-01-01T00:00:00Z")
//!     .with_release("v1.1.0", "2023-02-01T00:00:00Z");
//!
//! let latest = forge.latest_release().await.unwrap();
//! assert_eq!(latest.tag_name, "v1.1.0");
//!
//! let release = forge.get_release_by_tag("v1.0.0").await.unwrap();
//! assert_eq!(release.id, 1);
//! # });
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use super::traits::{Forge, ForgeError, Issue, Release, SearchIssuesResult};

/// In-memory `Forge`. Clones share state.
#[derive(Debug, Clone)]
pub struct MockForge {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockForgeInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockForgeInner {
    /// Stored releases in insertion order.
    releases: Vec<Release>,
    /// Issues returned by every search.
    issues: Vec<Issue>,
    /// Injected failure, if any.
    fail_on: Option<FailOn>,
    /// Every call, in order.
    operations: Vec<MockOperation>,
}

/// Which forge call returns an injected error.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail get_release_by_tag with the given error.
    GetReleaseByTag(ForgeError),
    /// Fail latest_release with the given error.
    LatestRelease(ForgeError),
    /// Fail search_issues with the given error.
    SearchIssues(ForgeError),
    /// Fail update_release_notes with the given error.
    UpdateReleaseNotes(ForgeError),
}

/// A forge call as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    GetReleaseByTag { tag: String },
    LatestRelease,
    SearchIssues { query: String },
    UpdateReleaseNotes { tag: String, body: String },
}

impl MockForge {
    /// A forge with no releases and no issues.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockForgeInner::default())),
        }
    }

    /// Add a release created at `created_at` (RFC 3339).
    ///
    /// Releases get sequential IDs starting at 1.
    ///
    /// # Panics
    ///
    /// Panics if `created_at` is not valid RFC 3339.
    pub fn with_release(self, tag: &str, created_at: &str) -> Self {
        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(created_at)
            .expect("mock release time must be RFC 3339")
            .with_timezone(&Utc);
        {
            let mut inner = self.inner.lock().unwrap();
            let id = inner.releases.len() as u64 + 1;
            inner.releases.push(Release {
                id,
                tag_name: tag.to_string(),
                name: None,
                created_at,
                url: format!("https://github.com/mock/repo/releases/tag/{}", tag),
                body: None,
            });
        }
        self
    }

    /// Add an issue returned by searches.
    pub fn with_issue(self, title: &str, labels: &[&str]) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            let number = inner.issues.len() as u64 + 1;
            inner.issues.push(Issue {
                number,
                title: title.to_string(),
                url: format!("https://github.com/mock/repo/pull/{}", number),
                labels: labels.iter().map(|l| l.to_string()).collect(),
            });
        }
        self
    }

    /// Make one forge call fail with the given error.
    ///
    /// # Example
    ///
    /// ```
    /// use gh_changelog::forge::mock::{MockForge, FailOn};
    /// use gh_changelog::forge::ForgeError;
    ///
    /// let forge = MockForge::new()
    ///     .fail_on(FailOn::SearchIssues(ForgeError::RateLimited));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Remove any injected failure.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Calls made so far.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Get a release by tag (for test verification).
    pub fn release_sync(&self, tag: &str) -> Option<Release> {
        let inner = self.inner.lock().unwrap();
        inner.releases.iter().find(|r| r.tag_name == tag).cloned()
    }

    /// Record an operation.
    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    /// The injected error for `expected`, if one is configured.
    fn check_fail<T>(&self, expected: &str) -> Option<Result<T, ForgeError>> {
        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::GetReleaseByTag(e)) if expected == "get_release_by_tag" => {
                Some(Err(e.clone()))
            }
            Some(FailOn::LatestRelease(e)) if expected == "latest_release" => Some(Err(e.clone())),
            Some(FailOn::SearchIssues(e)) if expected == "search_issues" => Some(Err(e.clone())),
            Some(FailOn::UpdateReleaseNotes(e)) if expected == "update_release_notes" => {
                Some(Err(e.clone()))
            }
            _ => None,
        }
    }
}

impl Default for MockForge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_release_by_tag(&self, tag: &str) -> Result<Release, ForgeError> {
        self.record(MockOperation::GetReleaseByTag {
            tag: tag.to_string(),
        });

        if let Some(result) = self.check_fail("get_release_by_tag") {
            return result;
        }

        self.release_sync(tag)
            .ok_or_else(|| ForgeError::NotFound(format!("release '{}'", tag)))
    }

    async fn latest_release(&self) -> Result<Release, ForgeError> {
        self.record(MockOperation::LatestRelease);

        if let Some(result) = self.check_fail("latest_release") {
            return result;
        }

        let inner = self.inner.lock().unwrap();
        inner
            .releases
            .iter()
            .max_by_key(|r| r.created_at)
            .cloned()
            .ok_or_else(|| ForgeError::NotFound("latest release of mock/repo".into()))
    }

    async fn search_issues(&self, query: &str) -> Result<SearchIssuesResult, ForgeError> {
        self.record(MockOperation::SearchIssues {
            query: query.to_string(),
        });

        if let Some(result) = self.check_fail("search_issues") {
            return result;
        }

        let inner = self.inner.lock().unwrap();
        Ok(SearchIssuesResult {
            issues: inner.issues.clone(),
            total_count: inner.issues.len() as u64,
            truncated: false,
        })
    }

    async fn update_release_notes(&self, tag: &str, body: &str) -> Result<Release, ForgeError> {
        self.record(MockOperation::UpdateReleaseNotes {
            tag: tag.to_string(),
            body: body.to_string(),
        });

        if let Some(result) = self.check_fail("update_release_notes") {
            return result;
        }

        let mut inner = self.inner.lock().unwrap();
        let release = inner
            .releases
            .iter_mut()
            .find(|r| r.tag_name == tag)
            .ok_or_else(|| ForgeError::NotFound(format!("release '{}'", tag)))?;
        release.body = Some(body.to_string());
        Ok(release.clone())
    }
}
