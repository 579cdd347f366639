//! Crate error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the hook system
///
/// Note that hook-code failures are deliberately absent here: an error
/// raised inside an interceptor, callback, or provider is caught at the
/// point of invocation and logged, never propagated (see `pipeline` and
/// `loader`).
#[derive(Error, Debug)]
pub enum HookError {
    /// Hook directory does not exist
    #[error("Hook directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl HookError {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        HookError::Other(msg.into())
    }
}

/// Result type alias for hook system operations
pub type HookResult<T> = Result<T, HookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HookError::DirectoryNotFound(PathBuf::from("/tmp/.hooks"));
        assert_eq!(err.to_string(), "Hook directory not found: /tmp/.hooks");

        let err = HookError::other("boom");
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let hook_err: HookError = io_err.into();
        assert!(matches!(hook_err, HookError::Io(_)));
    }
}
