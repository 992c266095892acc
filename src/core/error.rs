//! Fatal build errors.

use std::path::PathBuf;

use thiserror::Error;

/// Anything that aborts an API build. No partial output is cleaned up.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_path() {
        let err = BuildError::Write {
            path: PathBuf::from("/tmp/api/v1/stats.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();

        assert!(message.contains("/tmp/api/v1/stats.json"));
        assert!(message.contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
