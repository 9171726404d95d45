//! Error types for teamup
//!
//! Domain-specific error enums using thiserror. `CommandError` renders as the
//! reply text a chat user sees; the others are operator-facing and logged.

/// Why a single command was rejected. Never fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Usage: {usage}")]
    InvalidArgument { usage: &'static str },
    #[error("No session found. Use list-hall to see sessions and name one explicitly.")]
    NotFound,
    #[error("Only administrators can {action}.")]
    Unauthorized { action: &'static str },
    #[error("This scope needs a group chat. Use the command inside a group, or add \"cross-group\".")]
    ScopeUnavailable,
    #[error("A session named \"{name}\" already exists. Pick another name.")]
    Conflict { name: String },
    #[error("You are already in a team. Leave it first to be randomly assigned.")]
    AlreadyTeamed,
    #[error("Nickname too long. Keep it within {max} characters.")]
    NicknameTooLong { max: usize },
}

/// Host input that could not be turned into a chat context.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse: {0}")]
    Json(String),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported state version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("admin id must not be blank")]
    BlankAdminId,
    #[error("cannot resolve data directory: set --data-dir or HOME")]
    NoDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display_includes_usage() {
        let error = CommandError::InvalidArgument {
            usage: "set-nickname <name>",
        };
        assert_eq!(error.to_string(), "Usage: set-nickname <name>");
    }

    #[test]
    fn conflict_display_names_session() {
        let error = CommandError::Conflict { name: "A".into() };
        assert!(error.to_string().contains("\"A\" already exists"));
    }

    #[test]
    fn unauthorized_display_names_action() {
        let error = CommandError::Unauthorized {
            action: "reset sessions",
        };
        assert_eq!(error.to_string(), "Only administrators can reset sessions.");
    }

    #[test]
    fn store_io_error_display() {
        let error = StoreError::Io {
            path: "/data/state.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let display = error.to_string();
        assert!(display.contains("/data/state.json"));
        assert!(display.contains("permission denied"));
    }

    #[test]
    fn store_io_error_preserves_io_error_kind() {
        let error = StoreError::Io {
            path: "/test/path".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };

        let source_err = std::error::Error::source(&error).unwrap();
        let io_err = source_err.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io_err.kind(), std::io::ErrorKind::NotFound);
    }
}
