//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Logging setup and verbosity

pub mod output;
