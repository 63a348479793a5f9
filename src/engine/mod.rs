//! engine
//!
//! Orchestrates a changelog run: Resolve -> Query -> Fetch -> Render -> Write -> Publish.
//!
//! # Architecture
//!
//! The engine is the only component that talks to both the forge and the
//! filesystem. It reads settings exclusively from a
//! [`ChangelogConfig`](crate::core::config::ChangelogConfig) and reaches the
//! forge only through `&dyn Forge`, so the whole pipeline runs unchanged
//! against [`MockForge`](crate::forge::mock::MockForge) in tests.
//!
//! # Invariants
//!
//! - Calls are sequential; nothing runs concurrently
//! - The previous release is resolved before the current one, and the
//!   current one (or the latest release standing in for it) before any
//!   query clause is built
//! - A failed step stops the run; only the publish step is allowed to fail
//!   without failing the run
//!
//! # Example
//!
//! ```ignore
//! use gh_changelog::engine::{run, PublishStatus};
//!
//! let outcome = run(&config, forge.as_ref()).await?;
//! if let PublishStatus::Failed(e) = outcome.publish {
//!     eprintln!("release notes not updated: {}", e);
//! }
//! ```

pub mod publish;
pub mod resolve;
pub mod runner;

pub use publish::publish;
pub use resolve::{current_release_tag, resolve, ResolveError};
pub use runner::{run, PublishStatus, RunError, RunOutcome};
