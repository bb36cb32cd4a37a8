//! API credential loading.
//!
//! The credential lives in a `.env`-style key-value file next to the program.
//! The loader scans for the `OPENAI_API_KEY=` line and takes everything after
//! the first `=`, trimmed. The value is held in memory only and is never
//! logged.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// The key scanned for in the credential file.
pub const API_KEY_NAME: &str = "OPENAI_API_KEY";

/// Load the API key from a key-value credential file.
///
/// # Errors
///
/// Returns [`Error::MissingCredential`] if the file does not exist or no
/// non-empty value is found under [`API_KEY_NAME`]. Other read failures
/// surface as [`Error::Io`].
pub fn load_api_key(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::missing_credential(format!("credential file not found: {}", path.display()))
        } else {
            Error::Io(err)
        }
    })?;

    for line in content.lines() {
        let Some(rest) = line.trim_start().strip_prefix(API_KEY_NAME) else {
            continue;
        };
        let Some(value) = rest.strip_prefix('=') else {
            continue;
        };
        let value = value.trim();
        if !value.is_empty() {
            debug!(path = %path.display(), "loaded API key from credential file");
            return Ok(value.to_owned());
        }
    }

    Err(Error::missing_credential(format!(
        "{API_KEY_NAME} not found in {}",
        path.display()
    )))
}
