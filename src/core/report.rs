//! core::report
//!
//! Label-grouped changelog rendering.
//!
//! # Layout
//!
//! ```text
//! <repo>: <current> -- <previous>
//!
//! ## <Label>
//! * <Title> - <Link>
//! ```
//!
//! Each issue is classified by its first label. Entries are stably sorted by
//! that label, so entries sharing a label keep the order the forge returned
//! them in. A section header is written once per distinct label, right
//! before the first entry carrying it. Unlabeled entries sort first and get
//! no section header.

use std::collections::HashSet;

use super::types::Issue;

/// A pull request as it appears in the changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrEntry {
    /// PR title
    pub title: String,
    /// Link to the PR
    pub link: String,
    /// Classification label (first label of the issue, or empty)
    pub kind: String,
}

impl From<&Issue> for PrEntry {
    fn from(issue: &Issue) -> Self {
        Self {
            title: issue.title.clone(),
            link: issue.url.clone(),
            kind: classify(&issue.labels).to_string(),
        }
    }
}

/// Pick the classification label: the first label in listed order.
pub fn classify(labels: &[String]) -> &str {
    labels.first().map(String::as_str).unwrap_or("")
}

/// Rendered changelog document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogReport {
    content: String,
}

impl ChangelogReport {
    /// The rendered text.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Consume the report, returning the rendered text.
    pub fn into_string(self) -> String {
        self.content
    }
}

impl std::fmt::Display for ChangelogReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.content)
    }
}

/// Group `issues` by label and render the changelog.
pub fn render(repo: &str, current: &str, previous: &str, issues: &[Issue]) -> ChangelogReport {
    let mut entries: Vec<PrEntry> = issues.iter().map(PrEntry::from).collect();
    // sort_by is stable
    entries.sort_by(|a, b| a.kind.cmp(&b.kind));

    let mut content = format!("{}: {} -- {}\n", repo, current, previous);
    let mut seen: HashSet<&str> = HashSet::new();

    for entry in &entries {
        if !entry.kind.is_empty() && seen.insert(entry.kind.as_str()) {
            content.push_str(&format!("\n## {}\n", title_case(&entry.kind)));
        }
        content.push_str(&format!("* {} - {}\n", entry.title, entry.link));
    }

    ChangelogReport { content }
}

/// Upper-case the first letter of every word.
///
/// Words are split on separators: ASCII characters other than letters,
/// digits and `_`, plus any Unicode whitespace. So `release-note` becomes
/// `Release-Note` and `kind/bug` becomes `Kind/Bug`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_separator = true;

    for c in s.chars() {
        if prev_is_separator {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_separator = is_separator(c);
    }
    out
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(title: &str, labels: &[&str]) -> Issue {
        Issue {
            number: 0,
            title: title.to_string(),
            url: format!("https://github.com/org/widget/pull/{}", title),
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    mod classify {
        use super::*;

        #[test]
        fn first_label_wins() {
            let labels = vec!["feature".to_string(), "bug".to_string()];
            assert_eq!(classify(&labels), "feature");
        }

        #[test]
        fn no_labels_is_empty() {
            assert_eq!(classify(&[]), "");
        }
    }

    mod title_case {
        use super::*;

        #[test]
        fn single_word() {
            assert_eq!(title_case("bug"), "Bug");
        }

        #[test]
        fn splits_on_punctuation_and_space() {
            assert_eq!(title_case("release-note"), "Release-Note");
            assert_eq!(title_case("kind/bug fix"), "Kind/Bug Fix");
        }

        #[test]
        fn underscore_and_digits_do_not_split() {
            assert_eq!(title_case("api_v2change"), "Api_v2change");
            assert_eq!(title_case("2fa"), "2fa");
        }

        #[test]
        fn keeps_existing_capitals() {
            assert_eq!(title_case("CI"), "CI");
        }

        #[test]
        fn non_ascii_letters() {
            assert_eq!(title_case("élan vital"), "Élan Vital");
        }
    }

    mod render {
        use super::*;

        #[test]
        fn header_line_only_when_empty() {
            let report = render("widget", "v1.1.0", "v1.0.0", &[]);
            assert_eq!(report.as_str(), "widget: v1.1.0 -- v1.0.0\n");
        }

        #[test]
        fn groups_by_sorted_label() {
            let issues = vec![
                issue("B", &["feature"]),
                issue("A", &["bug"]),
            ];
            let report = render("widget", "v1.1.0", "v1.0.0", &issues);
            assert_eq!(
                report.as_str(),
                "widget: v1.1.0 -- v1.0.0\n\
                 \n## Bug\n\
                 * A - https://github.com/org/widget/pull/A\n\
                 \n## Feature\n\
                 * B - https://github.com/org/widget/pull/B\n"
            );
        }

        #[test]
        fn same_label_keeps_fetch_order() {
            let issues = vec![
                issue("third", &["fix"]),
                issue("first", &["docs"]),
                issue("second", &["fix"]),
            ];
            let report = render("r", "c", "p", &issues);
            let text = report.as_str();
            let third = text.find("* third").unwrap();
            let second = text.find("* second").unwrap();
            assert!(third < second);
        }

        #[test]
        fn header_written_once_per_label() {
            let issues = vec![
                issue("a", &["fix"]),
                issue("b", &["fix"]),
                issue("c", &["fix"]),
            ];
            let report = render("r", "c", "p", &issues);
            assert_eq!(report.as_str().matches("## Fix").count(), 1);
        }

        #[test]
        fn unlabeled_entries_have_no_header() {
            let issues = vec![issue("x", &["fix"]), issue("y", &[])];
            let report = render("r", "c", "p", &issues);
            assert_eq!(
                report.as_str(),
                "r: c -- p\n\
                 * y - https://github.com/org/widget/pull/y\n\
                 \n## Fix\n\
                 * x - https://github.com/org/widget/pull/x\n"
            );
            assert!(!report.as_str().contains("## \n"));
        }

        #[test]
        fn classifies_by_first_label_only() {
            let issues = vec![issue("multi", &["feature", "bug"])];
            let report = render("r", "c", "p", &issues);
            assert!(report.as_str().contains("## Feature"));
            assert!(!report.as_str().contains("## Bug"));
        }
    }
}
