use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced to callers of the catalog client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Recipe storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
