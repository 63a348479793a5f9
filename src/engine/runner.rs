//! engine::runner
//!
//! Engine runner - the single entry point for a changelog run.
//!
//! # Lifecycle
//!
//! ```text
//! Open output -> Resolve previous -> Resolve current -> Build query
//!             -> Search -> Render -> Write -> [Publish]
//! ```
//!
//! # Invariants
//!
//! - The output file is opened (created and truncated) before any forge call
//! - Content is written only after every upstream step succeeded; a failed
//!   step leaves the file empty
//! - Publishing happens after the file is written and closed, and its failure
//!   does not fail the run
//!
//! # Example
//!
//! ```ignore
//! use gh_changelog::engine::run;
//!
//! let outcome = run(&config, forge.as_ref()).await?;
//! println!("{}", outcome.report);
//! ```

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::publish::publish;
use super::resolve::{current_release_tag, resolve, ResolveError};
use crate::core::config::ChangelogConfig;
use crate::core::query::{build_query, QueryParams, SearchQuery};
use crate::core::report::{render, ChangelogReport};
use crate::core::types::{TimeWindow, TypeError};
use crate::forge::{Forge, ForgeError};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Errors that stop a changelog run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The output file could not be opened or created.
    #[error("failed to open output file '{path}': {source}")]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A release could not be resolved to a creation time.
    #[error("failed to resolve release '{tag}': {source}")]
    TimeResolution { tag: String, source: ResolveError },

    /// The previous release is newer than the current one.
    #[error(transparent)]
    InvalidWindow(#[from] TypeError),

    /// No usable search clause could be built.
    ///
    /// `build_query` always keeps its fixed `is:merged` and `type:pr`
    /// clauses, so this is not returned today.
    #[error("search query for '{0}' is empty")]
    QueryBuild(String),

    /// The search request failed.
    #[error("failed to fetch merged PRs: {0}")]
    SearchFetch(ForgeError),

    /// The report could not be written.
    #[error("failed to write output file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What happened to the optional publish step.
#[derive(Debug)]
pub enum PublishStatus {
    /// `save` was not requested.
    Skipped,
    /// Release notes were updated.
    Published,
    /// The forge rejected the update; the local file is still written.
    Failed(ForgeError),
}

/// Result of a successful run.
#[derive(Debug)]
pub struct RunOutcome {
    /// The rendered report (also written to the output file)
    pub report: ChangelogReport,
    /// The search that was issued
    pub query: SearchQuery,
    /// Tag of the current release (resolved to the latest when not given)
    pub current_release: String,
    /// Number of PRs in the report
    pub pr_count: usize,
    /// Publish step result
    pub publish: PublishStatus,
}

/// Run the changelog pipeline for `config` against `forge`.
///
/// # Errors
///
/// Returns the first failing step as a [`RunError`]. Publish failures are
/// reported through [`RunOutcome::publish`] instead.
pub async fn run(config: &ChangelogConfig, forge: &dyn Forge) -> Result<RunOutcome, RunError> {
    let mut file = open_output(&config.output)?;

    log::info!(
        "Start fetching release note from {}/{}",
        config.owner,
        config.repo
    );

    let previous = resolve(forge, &config.previous_release)
        .await
        .map_err(|source| {
            log::error!(
                "Failed to get created time of previous release -- {}",
                config.previous_release
            );
            RunError::TimeResolution {
                tag: config.previous_release.clone(),
                source,
            }
        })?;

    let current_tag = current_release_tag(forge, config.current_release.as_deref())
        .await
        .map_err(|source| {
            log::error!("Failed to get latest release version when current_release is missing");
            RunError::TimeResolution {
                tag: "latest".to_string(),
                source,
            }
        })?;

    let current = resolve(forge, &current_tag).await.map_err(|source| {
        log::error!(
            "Failed to get created time of current release -- {}",
            current_tag
        );
        RunError::TimeResolution {
            tag: current_tag.clone(),
            source,
        }
    })?;

    let window = TimeWindow::new(previous.created_at, current.created_at)?;

    let query = build_query(&QueryParams {
        owner: &config.owner,
        repo: &config.repo,
        label: &config.label,
        window: &window,
        base: &config.base,
    });
    if query.is_empty() {
        return Err(RunError::QueryBuild(config.repo.clone()));
    }
    log::info!("Query: {}", query);

    let result = forge
        .search_issues(&query.to_string())
        .await
        .map_err(RunError::SearchFetch)?;
    let pr_count = result.issues.len();
    log::debug!("Fetched {} of {} merged PRs", pr_count, result.total_count);

    let report = render(
        &config.repo,
        &current_tag,
        &config.previous_release,
        &result.issues,
    );

    log::info!("Saving data on: {}", config.output.display());
    file.write_all(report.as_str().as_bytes())
        .and_then(|_| file.flush())
        .map_err(|source| RunError::FileWrite {
            path: config.output.clone(),
            source,
        })?;
    drop(file);

    let publish_status = if config.save {
        match publish(forge, &current_tag, report.as_str()).await {
            Ok(()) => PublishStatus::Published,
            Err(e) => {
                log::error!("Error updating release notes: {}", e);
                PublishStatus::Failed(e)
            }
        }
    } else {
        PublishStatus::Skipped
    };

    Ok(RunOutcome {
        report,
        query,
        current_release: current_tag,
        pr_count,
        publish: publish_status,
    })
}

/// Create or truncate the output file for writing (owner-only on Unix).
fn open_output(path: &Path) -> Result<File, RunError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    options.open(path).map_err(|source| {
        log::error!(
            "Failed to open and/or create output file {}",
            path.display()
        );
        RunError::FileOpen {
            path: path.to_path_buf(),
            source,
        }
    })
}
