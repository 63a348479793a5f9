//! gh-changelog - Changelog generator for GitHub releases
//!
//! Builds a Markdown changelog from the pull requests merged between two
//! releases of a GitHub repository, grouped by label, and optionally writes
//! it back as the release notes of the newer release.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, resolves config)
//! - [`engine`] - Runs Resolve → Query → Fetch → Render → Write → Publish
//! - [`core`] - Domain types, query construction, report rendering, config
//! - [`forge`] - Abstraction for the remote forge (GitHub)
//! - [`secrets`] - API token loading
//! - [`ui`] - Logging and verbosity
//!
//! # Pipeline Invariants
//!
//! 1. Every component reads an immutable [`core::config::ChangelogConfig`],
//!    never ambient process state
//! 2. The local file is written before anything is published upstream
//! 3. A failed upstream step never leaves a partial report on disk

pub mod cli;
pub mod core;
pub mod engine;
pub mod forge;
pub mod secrets;
pub mod ui;
