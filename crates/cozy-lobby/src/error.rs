//! Error types for the lobby and its document store boundary.

use std::io;

/// Result type alias for lobby operations.
pub type Result<T> = std::result::Result<T, LobbyError>;

/// Errors surfaced by the document store or lobby setup.
///
/// UI-level conditions (no workspace, no author, empty input) are not
/// errors; they are distinct view states.
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    /// The path does not follow the `/<segments>/~<author>/<file>` convention.
    #[error("Invalid path {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The writer does not own the `~author` segment of the path.
    #[error("{author} may not write to {path}")]
    PermissionDenied { author: String, path: String },

    /// The workspace is not known to the store.
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    /// A seed fixture could not be applied.
    #[error("Seed error: {0}")]
    Seed(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LobbyError::PermissionDenied {
            author: "@suzy.bxxx".to_string(),
            path: "/lobby/~@bob.byyy/1.txt".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("@suzy.bxxx"));
        assert!(msg.contains("/lobby/~@bob.byyy/1.txt"));

        let err = LobbyError::WorkspaceNotFound("+gardening.abc".to_string());
        assert!(err.to_string().contains("+gardening.abc"));
    }
}
