//! Error types for prompt resolution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving or persisting the system prompt.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The override is enabled but nothing exists at the resolved path.
    #[error("missing system prompt file '{}'", path.display())]
    MissingOverrideFile { path: PathBuf },

    #[error("failed to read system prompt file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write system prompt file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The working directory could not be determined when building config
    /// from the process environment.
    #[error("failed to determine current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

/// Result type alias using [`PromptError`].
pub type Result<T> = std::result::Result<T, PromptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_message_names_path() {
        let err = PromptError::MissingOverrideFile {
            path: PathBuf::from("/work/.cinch/system.md"),
        };
        assert_eq!(
            err.to_string(),
            "missing system prompt file '/work/.cinch/system.md'"
        );
    }

    #[test]
    fn write_error_keeps_source() {
        let err = PromptError::Write {
            path: PathBuf::from("/readonly/system.md"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/readonly/system.md"));
        assert!(msg.contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
