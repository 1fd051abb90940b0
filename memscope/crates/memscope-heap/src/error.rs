//! Error Module - snapshot construction and loading errors

use thiserror::Error;

use crate::ids::{ClassId, HeapId, InstanceId};

/// Errors raised while building or loading a [`HeapSnapshot`](crate::HeapSnapshot)
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Heap id not issued by this snapshot
    #[error("Unknown heap: {0}")]
    UnknownHeap(HeapId),

    /// Class id not issued by this snapshot
    #[error("Unknown class: {0}")]
    UnknownClass(ClassId),

    /// Instance id not issued by this snapshot
    #[error("Unknown instance: {0}")]
    UnknownInstance(InstanceId),

    /// Two heaps with the same name
    #[error("Duplicate heap: {name}")]
    DuplicateHeap { name: String },

    /// Two classes with the same name in one heap
    #[error("Duplicate class {name} in heap {heap}")]
    DuplicateClass { heap: String, name: String },

    /// Two capture instances sharing an object id
    #[error("Duplicate instance id: {id}")]
    DuplicateInstanceId { id: String },

    /// A field references an id that was never added
    ///
    /// **When returned:** `SnapshotBuilder::finish` found a field value
    /// pointing past the end of the class or instance arena.
    #[error("Field {field} references missing {target}")]
    DanglingReference { field: String, target: String },

    /// A capture field references an instance id not present in the file
    #[error("Field {field} references unknown instance id {id}")]
    UnresolvedInstance { field: String, id: String },

    /// A capture field references a class not present in the file
    #[error("Field {field} references unknown class {heap}/{name}")]
    UnresolvedClass {
        field: String,
        heap: String,
        name: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for snapshot operations
pub type Result<T> = std::result::Result<T, SnapshotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_class_display() {
        let err = SnapshotError::UnknownClass(ClassId(9));
        assert_eq!(err.to_string(), "Unknown class: ClassId(9)");
    }

    #[test]
    fn test_unresolved_class_display() {
        let err = SnapshotError::UnresolvedClass {
            field: "owner".to_string(),
            heap: "app".to_string(),
            name: "com.Bar".to_string(),
        };
        assert_eq!(err.to_string(), "Field owner references unknown class app/com.Bar");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SnapshotError = json_err.into();
        assert!(matches!(err, SnapshotError::Json(_)));
    }
}
