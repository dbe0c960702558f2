use crate::template::TemplateId;
use thiserror::Error;

/// Failures reported by a template store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Template {0} not found")]
    NotFound(TemplateId),

    /// The store could not be reached or returned unreadable data.
    /// Retrying is left to the caller.
    #[error("Template store unavailable: {0}")]
    Transport(String),
}

impl StoreError {
    pub fn transport<E: std::fmt::Display>(e: E) -> Self {
        StoreError::Transport(e.to_string())
    }
}
