//! Error handling module for the mscope CLI.

use memscope_heap::SnapshotError;
use memscope_view::SelectionError;
use thiserror::Error;

/// Main error type for the mscope CLI application.
#[derive(Error, Debug)]
pub enum MscopeError {
    /// Configuration file missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The capture file could not be read or resolved.
    #[error("Capture error: {0}")]
    Capture(#[from] SnapshotError),

    /// A selection was refused by the inspector.
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// A name given on the command line matches nothing in the capture.
    #[error("No {kind} named '{name}'")]
    NotFound { kind: &'static str, name: String },

    /// The selected field does not reference a heap object.
    #[error("Field '{0}' has no instance or class to go to")]
    NoTarget(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MscopeError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        MscopeError::NotFound {
            kind,
            name: name.into(),
        }
    }
}

/// Result type alias using MscopeError.
pub type Result<T> = std::result::Result<T, MscopeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use memscope_heap::HeapId;

    #[test]
    fn test_config_error_display() {
        let err = MscopeError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_not_found_display() {
        let err = MscopeError::not_found("heap", "zygote");
        assert_eq!(err.to_string(), "No heap named 'zygote'");
    }

    #[test]
    fn test_no_target_display() {
        let err = MscopeError::NoTarget("mCount".to_string());
        assert_eq!(err.to_string(), "Field 'mCount' has no instance or class to go to");
    }

    #[test]
    fn test_snapshot_error_conversion() {
        let err: MscopeError = SnapshotError::UnknownHeap(HeapId(2)).into();
        assert!(matches!(err, MscopeError::Capture(_)));
    }

    #[test]
    fn test_selection_error_conversion() {
        let err: MscopeError = SelectionError::NoCapture.into();
        assert_eq!(err.to_string(), "Selection error: No capture loaded");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MscopeError = io_err.into();
        assert!(matches!(err, MscopeError::Io(_)));
    }
}
