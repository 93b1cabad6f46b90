//! Error types shared by the storage, aggregation and session layers.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::username::UsernameError;

/// Errors that can occur reading or writing per-user files.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors surfaced to the user for a single action.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// A required field was missing. Nothing was changed.
    #[error("{0}")]
    Validation(String),

    /// A deletion target no longer exists. Nothing was changed.
    #[error("{0}")]
    OutOfRange(String),

    /// Storage could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Username(#[from] UsernameError),

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),
}

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display_includes_path() {
        let err = StorageError::io(
            "/data/users/alice/diet.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/data/users/alice/diet.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_tracker_error_wraps_storage() {
        let err: TrackerError =
            StorageError::io("x", io::Error::new(io::ErrorKind::Other, "disk full")).into();
        assert!(matches!(err, TrackerError::Storage(_)));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_validation_message_passthrough() {
        let err = TrackerError::Validation("Exercise name is required".into());
        assert_eq!(err.to_string(), "Exercise name is required");
    }
}
