//! core
//!
//! Domain types, query construction, report rendering, and configuration.
//!
//! # Modules
//!
//! - [`types`] - Release timestamps and the merge window
//! - [`query`] - Search clause assembly
//! - [`report`] - Label-grouped changelog rendering
//! - [`config`] - Configuration loading and resolution
//!
//! Nothing in this layer performs network I/O.

pub mod config;
pub mod query;
pub mod report;
pub mod types;
