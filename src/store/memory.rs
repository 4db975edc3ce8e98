use std::collections::{BTreeMap, HashMap};

use tracing::{debug, instrument};

use crate::domain::{limits, AppUser, Recipe, RecipeId, Tag, TagId, TagSet};

use super::{RecipeRepository, StoreError, StoreResult};

/// HashMap-backed storage with sequential ids and the same column bounds a
/// relational schema would enforce.
///
/// Tag names and tag ids are kept one-to-one. Saving a recipe that carries an
/// unsaved tag reuses the id already issued for that name, or issues a new
/// one; a tag that arrives with an id must agree with what the store already
/// knows about that id and that name.
#[derive(Debug)]
pub struct InMemoryRecipeRepository {
    rows: BTreeMap<RecipeId, Recipe>,
    tags: TagIndex,
    next_id: u64,
}

#[derive(Debug, Clone)]
struct TagIndex {
    ids: HashMap<String, TagId>,
    names: HashMap<TagId, String>,
    next_id: u64,
}

impl TagIndex {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
            names: HashMap::new(),
            next_id: 1,
        }
    }

    fn record(&mut self, name: &str, id: TagId) {
        self.ids.insert(name.to_string(), id);
        self.names.insert(id, name.to_string());
        self.next_id = self.next_id.max(id.0 + 1);
    }

    /// Accepts a caller-supplied id only if it does not split a name or
    /// collide with another name's id.
    fn claim(&mut self, name: &str, id: TagId) -> StoreResult<()> {
        if let Some(&existing) = self.ids.get(name) {
            if existing != id {
                return Err(StoreError::ConstraintViolation(format!(
                    "tag '{name}' already has id {existing}, not {id}"
                )));
            }
        }
        if let Some(owner) = self.names.get(&id) {
            if owner != name {
                return Err(StoreError::ConstraintViolation(format!(
                    "tag id {id} already belongs to '{owner}', not '{name}'"
                )));
            }
        }
        self.record(name, id);
        Ok(())
    }

    fn resolve(&mut self, name: &str) -> TagId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = TagId(self.next_id);
        self.record(name, id);
        id
    }
}

impl Default for InMemoryRecipeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            tags: TagIndex::new(),
            next_id: 1,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn issue_id(&mut self) -> RecipeId {
        let id = RecipeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Gives every tag on `recipe` its stored id. Works on a copy of the index
    /// and commits only once every tag is accepted, so a rejected save leaves
    /// the index untouched.
    fn persist_tags(&mut self, recipe: &mut Recipe) -> StoreResult<()> {
        let mut index = self.tags.clone();
        let mut persisted = TagSet::new();

        for mut tag in recipe.tags().iter().cloned() {
            let id = match tag.id() {
                Some(id) => {
                    index.claim(tag.name(), id)?;
                    id
                }
                None => index.resolve(tag.name()),
            };
            tag.assign_id(id);
            persisted.insert(tag);
        }

        self.tags = index;
        *recipe.tags_mut() = persisted;
        Ok(())
    }
}

fn check_len(column: &str, value: Option<&str>, max: usize) -> StoreResult<()> {
    match value {
        Some(value) if value.chars().count() > max => Err(StoreError::ConstraintViolation(
            format!("{column} exceeds {max} characters"),
        )),
        _ => Ok(()),
    }
}

fn check_author(author: &AppUser) -> StoreResult<()> {
    check_len("author.username", Some(author.username()), limits::USERNAME_MAX)?;
    check_len("author.password", Some(author.password()), limits::PASSWORD_MAX)?;
    check_len("author.display_name", author.display_name(), limits::DISPLAY_NAME_MAX)
}

fn check_tag(tag: &Tag) -> StoreResult<()> {
    check_len("tag.name", Some(tag.name()), limits::TAG_NAME_MAX)?;
    check_len("tag.description", tag.description(), limits::TAG_DESCRIPTION_MAX)
}

fn check_columns(recipe: &Recipe) -> StoreResult<()> {
    check_len("title", recipe.title.as_deref(), limits::TITLE_MAX)?;
    check_len("description", recipe.description.as_deref(), limits::DESCRIPTION_MAX)?;
    check_len("ingredients", recipe.ingredients.as_deref(), limits::INGREDIENTS_MAX)?;
    check_len("instructions", recipe.instructions.as_deref(), limits::INSTRUCTIONS_MAX)?;
    if recipe.servings == Some(0) {
        return Err(StoreError::ConstraintViolation(
            "servings must be positive".to_string(),
        ));
    }
    if let Some(author) = &recipe.author {
        check_author(author)?;
    }
    recipe.tags().iter().try_for_each(check_tag)
}

impl RecipeRepository for InMemoryRecipeRepository {
    fn find_by_id(&self, id: RecipeId) -> StoreResult<Option<Recipe>> {
        Ok(self.rows.get(&id).cloned())
    }

    fn find_all(&self) -> StoreResult<Vec<Recipe>> {
        Ok(self.rows.values().cloned().collect())
    }

    #[instrument(skip(self, recipe), fields(recipe_id = ?recipe.id(), kind = %recipe.kind()))]
    fn save(&mut self, mut recipe: Recipe) -> StoreResult<Recipe> {
        check_columns(&recipe)?;
        self.persist_tags(&mut recipe)?;

        let id = match recipe.id() {
            Some(id) => {
                self.next_id = self.next_id.max(id.0 + 1);
                id
            }
            None => {
                let id = self.issue_id();
                recipe.assign_id(id);
                id
            }
        };

        debug!(recipe_id = %id, "Row written");
        self.rows.insert(id, recipe.clone());
        Ok(recipe)
    }

    fn exists_by_id(&self, id: RecipeId) -> StoreResult<bool> {
        Ok(self.rows.contains_key(&id))
    }

    fn delete_by_id(&mut self, id: RecipeId) -> StoreResult<()> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
