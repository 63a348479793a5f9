//! secrets
//!
//! API token loading and credential modes.
//!
//! # Modes
//!
//! - [`Credentials::Token`]: a token read from a user-supplied file
//! - [`Credentials::Anonymous`]: no token file configured; requests are
//!   unauthenticated and subject to the forge's anonymous rate limits
//!
//! Anonymous access is an explicit mode selected by leaving the token file
//! unset. A token file that is configured but unusable is an error, never a
//! silent fallback to anonymous access.
//!
//! # Security
//!
//! - Tokens are **never** logged or included in error messages
//! - `Credentials` redacts the token in its `Debug` output
//!
//! # Example
//!
//! ```no_run
//! use gh_changelog::secrets::Credentials;
//! use std::path::Path;
//!
//! let creds = Credentials::load(Some(Path::new("/home/me/.github-token")))?;
//! assert!(creds.is_authenticated());
//! # Ok::<(), gh_changelog::secrets::SecretError>(())
//! ```

mod token_file;

pub use token_file::read_token_file;

use std::path::Path;

use thiserror::Error;

/// Errors from token loading.
///
/// Note: Error messages intentionally do not include secret values.
#[derive(Debug, Error)]
pub enum SecretError {
    /// Failed to read the token file.
    #[error("failed to read token file '{path}': {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// The token file holds no token.
    #[error("token file '{0}' is empty")]
    Empty(String),
}

/// How requests to the forge are authenticated.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Bearer token
    Token(String),
    /// Unauthenticated access
    Anonymous,
}

impl Credentials {
    /// Load credentials from an optional token file.
    ///
    /// `None` selects [`Credentials::Anonymous`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file is set but unreadable or empty.
    pub fn load(token_file: Option<&Path>) -> Result<Self, SecretError> {
        match token_file {
            Some(path) => read_token_file(path).map(Credentials::Token),
            None => Ok(Credentials::Anonymous),
        }
    }

    /// Check if a token is available.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Credentials::Token(_))
    }

    /// The bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Credentials::Token(token) => Some(token),
            Credentials::Anonymous => None,
        }
    }
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Token(_) => write!(f, "Credentials::Token(<redacted>)"),
            Credentials::Anonymous => write!(f, "Credentials::Anonymous"),
        }
    }
}
