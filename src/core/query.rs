//! core::query
//!
//! Search query construction for merged pull requests.
//!
//! # Clause Rule
//!
//! A clause is a key followed by value fragments that are concatenated
//! without separators (`key:f1f2...`). A clause is kept only when it has at
//! least two parts and none of them is empty. Anything else is dropped, so an
//! unset label filter adds no `label:` qualifier at all.
//!
//! # Example
//!
//! ```
//! use gh_changelog::core::query::SearchQuery;
//!
//! let mut query = SearchQuery::new();
//! query.add(&["repo", "octocat", "/", "hello-world"]);
//! query.add(&["label", ""]);
//! query.add(&["is", "merged"]);
//!
//! assert_eq!(query.to_string(), "repo:octocat/hello-world is:merged");
//! ```

use super::types::TimeWindow;

/// An ordered list of `key:value` search qualifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    clauses: Vec<String>,
}

impl SearchQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause built from `parts`, where `parts[0]` is the key.
    ///
    /// Returns `true` if the clause was kept.
    pub fn add(&mut self, parts: &[&str]) -> bool {
        if parts.len() < 2 {
            log::debug!("Not enough parts to form a query clause: {:?}", parts);
            return false;
        }
        if parts.iter().any(|part| part.is_empty()) {
            log::debug!("Dropping query clause with empty part: {:?}", parts);
            return false;
        }

        self.clauses
            .push(format!("{}:{}", parts[0], parts[1..].concat()));
        true
    }

    /// The clauses kept so far, in insertion order.
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    /// Check if no clause was kept.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.clauses.join(" "))
    }
}

/// Parameters for the merged-PR search.
#[derive(Debug, Clone, Copy)]
pub struct QueryParams<'a> {
    /// Repository owner (user or organization)
    pub owner: &'a str,
    /// Repository name
    pub repo: &'a str,
    /// Label filter; empty means no label filter
    pub label: &'a str,
    /// Merge window between the two releases
    pub window: &'a TimeWindow,
    /// Base branch the PRs were merged into
    pub base: &'a str,
}

/// Build the search for PRs merged into `base` inside the release window.
///
/// Clauses are emitted in a fixed order: repo, label, is, type, merged, base.
pub fn build_query(params: &QueryParams<'_>) -> SearchQuery {
    let start = params.window.start().to_string();
    let end = params.window.end().to_string();

    let mut query = SearchQuery::new();
    query.add(&["repo", params.owner, "/", params.repo]);
    query.add(&["label", params.label]);
    query.add(&["is", "merged"]);
    query.add(&["type", "pr"]);
    query.add(&["merged", &start, "..", &end]);
    query.add(&["base", params.base]);
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ReleaseTimestamp;
    use chrono::{TimeZone, Utc};

    fn window() -> TimeWindow {
        TimeWindow::new(
            ReleaseTimestamp::from_datetime(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
            ReleaseTimestamp::from_datetime(Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap()),
        )
        .unwrap()
    }

    mod add {
        use super::*;

        #[test]
        fn joins_fragments_without_separator() {
            let mut q = SearchQuery::new();
            assert!(q.add(&["merged", "a", "..", "b"]));
            assert_eq!(q.clauses(), &["merged:a..b".to_string()]);
        }

        #[test]
        fn drops_single_part() {
            let mut q = SearchQuery::new();
            assert!(!q.add(&["is"]));
            assert!(q.is_empty());
        }

        #[test]
        fn drops_empty_part_anywhere() {
            let mut q = SearchQuery::new();
            assert!(!q.add(&["", "merged"]));
            assert!(!q.add(&["repo", "owner", "/", ""]));
            assert!(!q.add(&["repo", "", "/", "name"]));
            assert!(q.is_empty());
        }
    }

    mod build_query {
        use super::*;

        #[test]
        fn full_query() {
            let w = window();
            let q = build_query(&QueryParams {
                owner: "org",
                repo: "widget",
                label: "release-note",
                window: &w,
                base: "master",
            });
            assert_eq!(
                q.to_string(),
                "repo:org/widget label:release-note is:merged type:pr \
                 merged:2023-01-01T00:00:00Z..2023-02-01T00:00:00Z base:master"
            );
        }

        #[test]
        fn empty_label_omits_clause() {
            let w = window();
            let q = build_query(&QueryParams {
                owner: "org",
                repo: "widget",
                label: "",
                window: &w,
                base: "master",
            });
            assert!(q.clauses().iter().all(|c| !c.starts_with("label:")));
            assert_eq!(q.clauses().len(), 5);
        }

        #[test]
        fn custom_base_branch() {
            let w = window();
            let q = build_query(&QueryParams {
                owner: "org",
                repo: "widget",
                label: "",
                window: &w,
                base: "main",
            });
            assert_eq!(q.clauses().last().unwrap(), "base:main");
        }

        #[test]
        fn empty_repo_omits_repo_clause() {
            let w = window();
            let q = build_query(&QueryParams {
                owner: "org",
                repo: "",
                label: "bug",
                window: &w,
                base: "master",
            });
            assert_eq!(q.clauses()[0], "label:bug");
        }

        #[test]
        fn fixed_clauses_survive_empty_filters() {
            let w = window();
            let q = build_query(&QueryParams {
                owner: "",
                repo: "",
                label: "",
                window: &w,
                base: "",
            });
            assert!(!q.is_empty());
            assert_eq!(
                q.to_string(),
                "is:merged type:pr merged:2023-01-01T00:00:00Z..2023-02-01T00:00:00Z"
            );
        }
    }
}
