use crate::error::StoreError;

/// Result of a Fragment Store Adapter call
pub type StoreResult<T> = Result<T, StoreError>;
