//! Handles for talking to the catalog actor.

#[macro_use]
mod macros;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::catalog_actor::CatalogRequest;
use crate::domain::{Recipe, RecipeEdit, RecipeId, RecipeKind, Tag, TagId};
use crate::error::CatalogError;

/// Cheap to clone; every clone feeds the same mailbox.
#[derive(Clone)]
pub struct RecipeClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl RecipeClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CatalogRequest::Shutdown)
            .await
            .map_err(|e| CatalogError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(RecipeClient => fn create_recipe(edit: RecipeEdit) -> Recipe as CatalogRequest::CreateRecipe);
client_method!(RecipeClient => fn get_recipe(id: RecipeId) -> Option<Recipe> as CatalogRequest::GetRecipe);
client_method!(RecipeClient => fn list_recipes() -> Vec<Recipe> as CatalogRequest::ListRecipes);
client_method!(RecipeClient => fn replace_recipe(id: RecipeId, edit: RecipeEdit) -> Option<Recipe> as CatalogRequest::ReplaceRecipe);
client_method!(RecipeClient => fn patch_recipe(id: RecipeId, edit: RecipeEdit) -> Option<Recipe> as CatalogRequest::PatchRecipe);
client_method!(RecipeClient => fn delete_recipe(id: RecipeId) -> bool as CatalogRequest::DeleteRecipe);
client_method!(RecipeClient => fn add_tag(id: RecipeId, tag: Tag) -> Option<Recipe> as CatalogRequest::AddTag);
client_method!(RecipeClient => fn remove_tag(id: RecipeId, tag: Tag) -> Option<Recipe> as CatalogRequest::RemoveTag);
client_method!(RecipeClient => fn find_by_tag(name: String) -> Vec<Recipe> as CatalogRequest::FindByTag);
client_method!(RecipeClient => fn find_by_tag_id(tag_id: TagId) -> Vec<Recipe> as CatalogRequest::FindByTagId);
client_method!(RecipeClient => fn list_kinds() -> Vec<RecipeKind> as CatalogRequest::ListKinds);

#[cfg(test)]
client_method!(RecipeClient => fn get_recipe_count() -> usize as CatalogRequest::GetRecipeCount);
