//! Error Module - selection errors
//!
//! Both variants mean the caller asked for something the current scope
//! cannot hold. The UI path never produces them: tree rows only offer
//! objects of the selected class, and the context menu is disabled when
//! there is nothing to follow.

use thiserror::Error;

use crate::selection::SelectionKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Object does not belong to its required parent scope
    ///
    /// **When returned:** e.g. `select_class` with a class of another heap,
    /// or with no heap selected, under [`InvalidSelectionPolicy::Reject`].
    ///
    /// [`InvalidSelectionPolicy::Reject`]: crate::config::InvalidSelectionPolicy::Reject
    #[error("Invalid {kind} selection: {reason}")]
    InvalidSelection { kind: SelectionKind, reason: String },

    /// A non-empty selection was requested before any capture was loaded
    #[error("No capture loaded")]
    NoCapture,
}

impl SelectionError {
    pub fn invalid(kind: SelectionKind, reason: impl Into<String>) -> Self {
        SelectionError::InvalidSelection {
            kind,
            reason: reason.into(),
        }
    }
}

/// Result type alias for selection operations
pub type Result<T> = std::result::Result<T, SelectionError>;
