use thiserror::Error;

/// Operator-facing failures of the setup panel.
///
/// Store errors are resolved to a single message before they land here, so
/// the values are cheap to clone into UI state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// Local form check failed; the store was not called.
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Error getting configuration entries: {0}")]
    Fetch(String),

    #[error("Submission error: {0}")]
    Submit(String),

    #[error("Error deleting configuration entry: {0}")]
    Delete(String),

    /// Edit or delete target is not a user entry.
    #[error("Configuration entry '{name}' not found")]
    NotFound { name: String },

    /// The entry was saved but marking the add-on configured or reloading
    /// it failed.
    #[error("Configuration entry '{stanza}' was saved, but completing the add-on setup failed: {message}")]
    SetupIncomplete { stanza: String, message: String },

    /// A store call is still in flight.
    #[error("Another request is still in progress")]
    Busy,
}

impl SetupError {
    pub fn is_validation(&self) -> bool {
        matches!(self, SetupError::Validation { .. })
    }
}
