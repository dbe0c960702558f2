//! Error types for the editor

use swatch_common::{StoreError, TemplateId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Buffer belongs to template {expected}, got template {actual}")]
    TemplateMismatch {
        expected: TemplateId,
        actual: TemplateId,
    },
}

impl EditorError {
    /// The id that failed to resolve, if this is a not-found error
    pub fn not_found(&self) -> Option<TemplateId> {
        match self {
            EditorError::Store(StoreError::NotFound(id)) => Some(*id),
            _ => None,
        }
    }
}
