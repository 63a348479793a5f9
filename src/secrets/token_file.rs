//! secrets::token_file
//!
//! Read an API token from a file.

use std::fs;
use std::path::Path;

use super::SecretError;

/// Read a token from `path`.
///
/// Surrounding whitespace (including the trailing newline most editors add)
/// is stripped.
///
/// # Errors
///
/// - `ReadError` if the file cannot be read
/// - `Empty` if nothing but whitespace remains
pub fn read_token_file(path: &Path) -> Result<String, SecretError> {
    let contents = fs::read_to_string(path).map_err(|source| SecretError::ReadError {
        path: path.display().to_string(),
        source,
    })?;

    let token = contents.trim();
    if token.is_empty() {
        return Err(SecretError::Empty(path.display().to_string()));
    }

    Ok(token.to_string())
}
