//! Record operations over the storage collaborator: create, read, delete,
//! replace, patch and tag membership.
//!
//! Each operation is a single read-merge-write. Missing records come back as
//! `Ok(None)` / `Ok(false)`; storage failures propagate unchanged.

mod merge;

use tracing::{debug, error, info, instrument};

use crate::domain::{Recipe, RecipeId, Tag, TagId};
use crate::store::{RecipeRepository, StoreResult};

pub use merge::RecipeDraft;

pub struct RecordService<R> {
    repo: R,
}

impl<R: RecipeRepository> RecordService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    #[cfg(test)]
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Saves `candidate` as a brand-new record, discarding any id it carried.
    #[instrument(skip(self, candidate), fields(kind = %candidate.kind()))]
    pub fn add_recipe(&mut self, mut candidate: Recipe) -> StoreResult<Recipe> {
        candidate.clear_id();
        let saved = self
            .repo
            .save(candidate)
            .inspect_err(|e| error!(error = %e, "Failed to save new recipe"))?;
        info!(recipe_id = ?saved.id(), "Recipe created");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub fn get_all_recipes(&self) -> StoreResult<Vec<Recipe>> {
        let recipes = self.repo.find_all()?;
        debug!(recipe_count = recipes.len(), "Listed recipes");
        Ok(recipes)
    }

    #[instrument(skip(self), fields(recipe_id = %id))]
    pub fn get_recipe_by_id(&self, id: RecipeId) -> StoreResult<Option<Recipe>> {
        let recipe = self.repo.find_by_id(id)?;
        if recipe.is_none() {
            debug!("Recipe not found");
        }
        Ok(recipe)
    }

    /// Returns `false` without touching storage's delete when the id is unknown.
    #[instrument(skip(self), fields(recipe_id = %id))]
    pub fn delete_recipe(&mut self, id: RecipeId) -> StoreResult<bool> {
        if !self.repo.exists_by_id(id)? {
            debug!("Recipe not found for delete");
            return Ok(false);
        }
        self.repo
            .delete_by_id(id)
            .inspect_err(|e| error!(error = %e, "Failed to delete recipe"))?;
        info!("Recipe deleted");
        Ok(true)
    }

    /// Full replacement of the stored record's fields.
    ///
    /// The stored record is merged into rather than swapped out, so its kind
    /// survives even when `replacement` is of a different kind.
    #[instrument(skip(self, replacement), fields(recipe_id = %id))]
    pub fn update_recipe(
        &mut self,
        id: RecipeId,
        replacement: impl Into<RecipeDraft>,
    ) -> StoreResult<Option<Recipe>> {
        self.read_merge_write(id, |stored| merge::apply_replacement(stored, replacement.into()))
    }

    /// Partial update: absent fields leave stored values untouched.
    #[instrument(skip(self, partial), fields(recipe_id = %id))]
    pub fn patch_recipe(
        &mut self,
        id: RecipeId,
        partial: impl Into<RecipeDraft>,
    ) -> StoreResult<Option<Recipe>> {
        self.read_merge_write(id, |stored| merge::apply_patch(stored, partial.into()))
    }

    #[instrument(skip(self, tag), fields(recipe_id = %id, tag = %tag))]
    pub fn add_tag_to_recipe(&mut self, id: RecipeId, tag: Tag) -> StoreResult<Option<Recipe>> {
        self.read_merge_write(id, |stored| {
            tag.add_recipe(stored);
        })
    }

    #[instrument(skip(self, tag), fields(recipe_id = %id, tag = %tag))]
    pub fn remove_tag_from_recipe(
        &mut self,
        id: RecipeId,
        tag: &Tag,
    ) -> StoreResult<Option<Recipe>> {
        self.read_merge_write(id, |stored| {
            tag.remove_recipe(stored);
        })
    }

    /// Recipes carrying a tag with this name, compared case-insensitively.
    #[instrument(skip(self))]
    pub fn find_recipes_by_tag(&self, name: &str) -> StoreResult<Vec<Recipe>> {
        self.filter_recipes(|recipe| recipe.tags().iter().any(|tag| tag.matches_name(name)))
    }

    #[instrument(skip(self), fields(tag_id = %tag_id))]
    pub fn find_recipes_by_tag_id(&self, tag_id: TagId) -> StoreResult<Vec<Recipe>> {
        self.filter_recipes(|recipe| recipe.tags().iter().any(|tag| tag.id() == Some(tag_id)))
    }

    fn filter_recipes(&self, keep: impl Fn(&Recipe) -> bool) -> StoreResult<Vec<Recipe>> {
        let matches: Vec<Recipe> = self
            .repo
            .find_all()?
            .into_iter()
            .filter(|recipe| keep(recipe))
            .collect();
        debug!(match_count = matches.len(), "Filtered recipes");
        Ok(matches)
    }

    fn read_merge_write(
        &mut self,
        id: RecipeId,
        apply: impl FnOnce(&mut Recipe),
    ) -> StoreResult<Option<Recipe>> {
        let Some(mut stored) = self.repo.find_by_id(id)? else {
            debug!("Recipe not found");
            return Ok(None);
        };
        apply(&mut stored);
        let saved = self
            .repo
            .save(stored)
            .inspect_err(|e| error!(error = %e, "Failed to save merged recipe"))?;
        info!(kind = %saved.kind(), "Recipe updated");
        Ok(Some(saved))
    }
}
