//! Error types for the documentation viewer crate.
//!
//! Selecting a document source never fails. These errors come from building
//! a catalog out of configured entries and from the viewer backend.

use thiserror::Error;

/// Errors that can occur while preparing or initializing the viewer.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Two catalog entries share the same display name.
    #[error("Duplicate document name: {name}")]
    DuplicateEntry {
        /// The repeated name.
        name: String,
    },

    /// A catalog entry is missing its name or url.
    #[error("Invalid document entry '{name}': {reason}")]
    InvalidEntry {
        /// The name of the offending entry (may be empty).
        name: String,
        /// Why the entry was rejected.
        reason: String,
    },

    /// Failed to serialize the viewer configuration.
    #[error("Failed to serialize viewer configuration: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The viewer backend could not be initialized.
    #[error("Viewer initialization failed: {reason}")]
    ViewerInit {
        /// The reason reported by the backend.
        reason: String,
    },
}

impl DocsError {
    /// Create an invalid entry error.
    pub fn invalid_entry(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a viewer initialization error.
    pub fn viewer_init(reason: impl Into<String>) -> Self {
        Self::ViewerInit {
            reason: reason.into(),
        }
    }
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;
