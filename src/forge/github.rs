//! forge::github
//!
//! GitHub forge implementation using the REST API.
//!
//! # Design
//!
//! This module implements the `Forge` trait for GitHub:
//! - `GET /repos/{owner}/{repo}/releases/tags/{tag}` for release lookup
//! - `GET /repos/{owner}/{repo}/releases/latest` for the latest release
//! - `GET /search/issues` for the merged-PR search (paged)
//! - `PATCH /repos/{owner}/{repo}/releases/{id}` for release notes
//!
//! # Authentication
//!
//! Requests carry a bearer token when [`Credentials::Token`] is configured
//! and go out unauthenticated otherwise. Editing release notes needs a
//! token; in anonymous mode it fails with `ForgeError::AuthRequired` before
//! any request is sent.
//!
//! # Rate Limiting
//!
//! GitHub has rate limits (much lower for anonymous access). This
//! implementation returns `ForgeError::RateLimited` when limits are hit and
//! does not retry.
//!
//! # Example
//!
//! ```ignore
//! use gh_changelog::forge::github::GitHubForge;
//! use gh_changelog::forge::Forge;
//! use gh_changelog::secrets::Credentials;
//!
//! let forge = GitHubForge::new(Credentials::Anonymous, "octocat", "hello-world");
//! let latest = forge.latest_release().await?;
//! println!("latest release: {}", latest.tag_name);
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};

use super::traits::{Forge, ForgeError, Issue, Release, SearchIssuesResult};
use crate::core::config::DEFAULT_API_BASE;
use crate::secrets::Credentials;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "gh-changelog";

/// GitHub's maximum page size for search.
const SEARCH_PER_PAGE: u32 = 100;

/// GitHub only serves the first 1000 results of any search.
const SEARCH_RESULT_CAP: usize = 1000;

/// `Forge` backed by the GitHub REST API, bound to one repository.
pub struct GitHubForge {
    /// Shared HTTP client
    client: Client,
    /// Token or anonymous access
    credentials: Credentials,
    /// Repository owner (user or organization)
    owner: String,
    /// Repository name
    repo: String,
    /// API base URL (configurable for GitHub Enterprise)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubForge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubForge")
            .field("authenticated", &self.credentials.is_authenticated())
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubForge {
    /// Create a new GitHub forge for `owner/repo` on github.com.
    pub fn new(credentials: Credentials, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self::with_api_base(credentials, owner, repo, DEFAULT_API_BASE)
    }

    /// Create a GitHub forge with a custom API base URL.
    ///
    /// Use this for GitHub Enterprise installations
    /// (e.g., `https://github.example.com/api/v3`).
    pub fn with_api_base(
        credentials: Credentials,
        owner: impl Into<String>,
        repo: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        let api_base: String = api_base.into();
        Self {
            client: Client::new(),
            credentials,
            owner: owner.into(),
            repo: repo.into(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Get the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Check if requests are authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.credentials.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ForgeError::AuthFailed("token contains invalid characters".into()))?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// `{api_base}/repos/{owner}/{repo}/{path}`
    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    /// URL of the release tagged `tag`, with the tag percent-encoded as one
    /// path segment so `#`, `?`, `%` and `/` stay part of the tag.
    fn release_tag_url(&self, tag: &str) -> Result<Url, ForgeError> {
        let base = self.repo_url("releases/tags");
        let mut url = Url::parse(&base)
            .map_err(|e| ForgeError::NetworkError(format!("invalid API URL '{}': {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ForgeError::NetworkError(format!("invalid API URL '{}'", base)))?
            .push(tag);
        Ok(url)
    }

    /// GET a repository endpoint and decode the JSON body.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ForgeError> {
        let response = self
            .client
            .get(url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Decode a success body or classify the failure.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, ForgeError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            self.handle_error_response(response, status).await
        }
    }

    /// Map a non-success response to a `ForgeError`.
    async fn handle_error_response<T>(
        &self,
        response: Response,
        status: StatusCode,
    ) -> Result<T, ForgeError> {
        // Read headers before the body consumes the response.
        let rate_limit_exhausted = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "0")
            .unwrap_or(false);

        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => ForgeError::AuthFailed("Invalid or expired token".into()),
            StatusCode::FORBIDDEN if rate_limit_exhausted => ForgeError::RateLimited,
            StatusCode::FORBIDDEN => ForgeError::AuthFailed(format!("Permission denied: {}", message)),
            StatusCode::NOT_FOUND => ForgeError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
            _ if status.is_server_error() => ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("GitHub server error: {}", message),
            },
            _ => ForgeError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }

    /// Fetch one page of search results.
    async fn search_page(&self, query: &str, page: u32) -> Result<GitHubSearchResponse, ForgeError> {
        let url = format!("{}/search/issues", self.api_base);
        let per_page = SEARCH_PER_PAGE.to_string();
        let page = page.to_string();

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .query(&[("q", query), ("per_page", per_page.as_str()), ("page", page.as_str())])
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl Forge for GitHubForge {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn get_release_by_tag(&self, tag: &str) -> Result<Release, ForgeError> {
        let url = self.release_tag_url(tag)?;
        let release: GitHubRelease = self.get_json(url.as_str()).await.map_err(|e| match e {
            ForgeError::NotFound(_) => ForgeError::NotFound(format!("release '{}'", tag)),
            other => other,
        })?;
        Ok(release.into())
    }

    async fn latest_release(&self) -> Result<Release, ForgeError> {
        let url = self.repo_url("releases/latest");
        let release: GitHubRelease = self.get_json(&url).await.map_err(|e| match e {
            ForgeError::NotFound(_) => ForgeError::NotFound(format!(
                "latest release of {}/{}",
                self.owner, self.repo
            )),
            other => other,
        })?;
        Ok(release.into())
    }

    async fn search_issues(&self, query: &str) -> Result<SearchIssuesResult, ForgeError> {
        let mut issues: Vec<Issue> = Vec::new();
        let mut page: u32 = 1;

        let total_count = loop {
            let result = self.search_page(query, page).await?;
            let total_count = result.total_count;
            if result.incomplete_results {
                log::warn!("GitHub reported incomplete search results for: {}", query);
            }

            let page_count = result.items.len();
            issues.extend(result.items.into_iter().map(Into::into));

            // Stop on a short page, when everything is in, or at the search cap
            if page_count < SEARCH_PER_PAGE as usize
                || issues.len() as u64 >= total_count
                || issues.len() >= SEARCH_RESULT_CAP
            {
                break total_count;
            }

            page += 1;
        };

        let truncated = (issues.len() as u64) < total_count;
        if truncated {
            log::warn!(
                "Search matched {} items, only {} could be fetched",
                total_count,
                issues.len()
            );
        }

        Ok(SearchIssuesResult {
            issues,
            total_count,
            truncated,
        })
    }

    async fn update_release_notes(&self, tag: &str, body: &str) -> Result<Release, ForgeError> {
        if !self.credentials.is_authenticated() {
            return Err(ForgeError::AuthRequired);
        }

        let release = self.get_release_by_tag(tag).await?;
        let url = self.repo_url(&format!("releases/{}", release.id));

        let response = self
            .client
            .patch(&url)
            .headers(self.headers()?)
            .json(&UpdateReleaseBody { body })
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        let updated: GitHubRelease = self.handle_response(response).await?;
        Ok(updated.into())
    }
}

// Wire types. Only the fields the changelog reads are declared.

/// Request body for updating a release.
#[derive(Serialize)]
struct UpdateReleaseBody<'a> {
    body: &'a str,
}

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

/// GitHub release response format.
#[derive(Deserialize)]
struct GitHubRelease {
    id: u64,
    tag_name: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
    html_url: String,
    body: Option<String>,
}

/// GitHub issue search response format.
#[derive(Deserialize)]
struct GitHubSearchResponse {
    total_count: u64,
    #[serde(default)]
    incomplete_results: bool,
    items: Vec<GitHubIssue>,
}

/// GitHub issue (subset used by the changelog).
#[derive(Deserialize)]
struct GitHubIssue {
    number: u64,
    title: String,
    html_url: String,
    #[serde(default)]
    labels: Vec<GitHubLabel>,
}

/// GitHub label format.
#[derive(Deserialize)]
struct GitHubLabel {
    name: String,
}

impl From<GitHubRelease> for Release {
    fn from(gh: GitHubRelease) -> Self {
        Release {
            id: gh.id,
            tag_name: gh.tag_name,
            name: gh.name,
            created_at: gh.created_at,
            url: gh.html_url,
            body: gh.body,
        }
    }
}

impl From<GitHubIssue> for Issue {
    fn from(gh: GitHubIssue) -> Self {
        Issue {
            number: gh.number,
            title: gh.title,
            url: gh.html_url,
            labels: gh.labels.into_iter().map(|l| l.name).collect(),
        }
    }
}
