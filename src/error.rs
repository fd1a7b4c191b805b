//! Error types for logger setup and access

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by logger construction and the global facade.
///
/// Emitting records never produces an error; these only cover setup and
/// access to the process-wide handle.
#[derive(Debug, Error)]
pub enum LogError {
    /// The log directory could not be created
    #[error("failed to create log directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The log file could not be opened for appending
    #[error("failed to open log file {}: {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The global logger was used before `init`
    #[error("logger not initialized; call noticelog::init first")]
    NotInitialized,

    /// A level name did not match debug, info, warn or error
    #[error("invalid log level '{0}' (expected debug, info, warn or error)")]
    InvalidLevel(String),
}

/// Result alias for logger setup
pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LogError::CreateDir {
            path: PathBuf::from("/nope/logs"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to create log directory /nope/logs: denied"
        );

        assert!(LogError::NotInitialized.to_string().contains("not initialized"));
        assert!(LogError::InvalidLevel("loud".into())
            .to_string()
            .contains("'loud'"));
    }

    #[test]
    fn test_io_source_is_preserved() {
        use std::error::Error as _;

        let err = LogError::OpenFile {
            path: PathBuf::from("app.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.source().is_some());
    }
}
