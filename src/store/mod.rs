//! The storage collaborator the record service runs against.

mod memory;

use thiserror::Error;

use crate::domain::{Recipe, RecipeId};

pub use memory::InMemoryRecipeRepository;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("Recipe not found: {0}")]
    NotFound(RecipeId),
    /// Raised by networked backends; the in-memory store never is.
    #[allow(dead_code)]
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Create/read/update/delete by surrogate id.
///
/// Transactional discipline lives behind this trait; callers add no locking or
/// retries of their own.
pub trait RecipeRepository: Send {
    fn find_by_id(&self, id: RecipeId) -> StoreResult<Option<Recipe>>;

    fn find_all(&self) -> StoreResult<Vec<Recipe>>;

    /// Assigns an id when the recipe has none, otherwise overwrites the stored row.
    fn save(&mut self, recipe: Recipe) -> StoreResult<Recipe>;

    fn exists_by_id(&self, id: RecipeId) -> StoreResult<bool>;

    /// Fails when the row cannot be deleted, including when it does not exist.
    fn delete_by_id(&mut self, id: RecipeId) -> StoreResult<()>;
}
