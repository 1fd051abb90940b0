//! Configuration Module - inspector tuning

use serde::{Deserialize, Serialize};

/// What to do when a selection falls outside its parent scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidSelectionPolicy {
    /// Return `SelectionError::InvalidSelection` and leave the state untouched
    Reject,
    /// Log a warning and select nothing at the offending level
    Clamp,
}

impl Default for InvalidSelectionPolicy {
    /// `Reject` in debug builds, `Clamp` in release builds
    fn default() -> Self {
        if cfg!(debug_assertions) {
            InvalidSelectionPolicy::Reject
        } else {
            InvalidSelectionPolicy::Clamp
        }
    }
}

/// Settings for one inspection session
///
/// ```rust
/// use memscope_view::{InspectorConfig, InvalidSelectionPolicy};
///
/// let config = InspectorConfig {
///     invalid_selection: InvalidSelectionPolicy::Clamp,
///     ..Default::default()
/// };
/// assert!(config.show_to_string);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorConfig {
    #[serde(default)]
    pub invalid_selection: InvalidSelectionPolicy,

    /// Render an instance's `toString()` text next to its label
    #[serde(default = "default_true")]
    pub show_to_string: bool,
}

fn default_true() -> bool {
    true
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            invalid_selection: InvalidSelectionPolicy::default(),
            show_to_string: true,
        }
    }
}
