//! forge
//!
//! Abstraction for remote forges (GitHub).
//!
//! # Architecture
//!
//! The `Forge` trait defines the interface for interacting with the remote
//! hosting service. The pipeline in [`crate::engine`] only sees `&dyn Forge`;
//! the CLI picks the implementation with [`create_forge`].
//!
//! - Forge operations run only after the output file has been opened
//! - Forge failures are logged and stop the run; they never corrupt the file
//!
//! # Modules
//!
//! - `traits`: Core `Forge` trait and request/response types
//! - [`github`]: GitHub implementation using the REST API
//! - [`mock`]: Mock implementation for deterministic testing
//! - `factory`: Forge creation from a resolved configuration

mod factory;
pub mod github;
pub mod mock;
mod traits;

pub use factory::create_forge;
pub use traits::*;
