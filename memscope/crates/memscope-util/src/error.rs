//! Core error types for memscope-util crate

use thiserror::Error;

/// Error type for index vector operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexVecError {
    /// Index out of bounds
    #[error("Index out of bounds: index {index}, length {length}")]
    OutOfBounds { index: usize, length: usize },
}

/// Result type alias for index vector operations
pub type IndexVecResult<T> = std::result::Result<T, IndexVecError>;
