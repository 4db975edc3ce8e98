use crate::domain::{Recipe, Tag, TagSet};

/// Incoming data for a replace or patch.
///
/// `tags: None` leaves the stored tags alone. Converting a [`Recipe`] carries
/// its tag set along, so a recipe with no tags asks for "no tags".
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub recipe: Recipe,
    pub tags: Option<TagSet>,
}

impl RecipeDraft {
    /// A draft that does not touch the stored tag set.
    pub fn keep_tags(mut recipe: Recipe) -> Self {
        recipe.clear_tags();
        Self { recipe, tags: None }
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }
}

impl From<Recipe> for RecipeDraft {
    fn from(mut recipe: Recipe) -> Self {
        let tags = recipe.take_tags();
        Self {
            recipe,
            tags: Some(tags),
        }
    }
}

/// Clears the stored set tag by tag, then adds each incoming tag.
fn replace_tags(stored: &mut Recipe, tags: TagSet) {
    stored.clear_tags();
    for tag in tags {
        stored.add_tag(tag);
    }
}

/// PUT: every scalar is overwritten, present or not. The stored kind is kept.
pub(crate) fn apply_replacement(stored: &mut Recipe, draft: RecipeDraft) {
    let RecipeDraft { recipe, tags } = draft;

    stored.title = recipe.title;
    stored.description = recipe.description;
    stored.ingredients = recipe.ingredients;
    stored.instructions = recipe.instructions;
    stored.servings = recipe.servings;

    if let Some(author) = recipe.author {
        stored.author = Some(author);
    }
    if let Some(tags) = tags {
        replace_tags(stored, tags);
    }
}

/// PATCH: only fields present on the draft are written.
///
/// An empty tag set counts as "no tag change", unlike [`apply_replacement`]
/// where it clears the stored tags.
pub(crate) fn apply_patch(stored: &mut Recipe, draft: RecipeDraft) {
    let RecipeDraft { recipe, tags } = draft;

    if let Some(title) = recipe.title {
        stored.title = Some(title);
    }
    if let Some(description) = recipe.description {
        stored.description = Some(description);
    }
    if let Some(ingredients) = recipe.ingredients {
        stored.ingredients = Some(ingredients);
    }
    if let Some(instructions) = recipe.instructions {
        stored.instructions = Some(instructions);
    }
    if let Some(servings) = recipe.servings {
        stored.servings = Some(servings);
    }
    if let Some(author) = recipe.author {
        stored.author = Some(author);
    }
    if let Some(tags) = tags.filter(|tags| !tags.is_empty()) {
        replace_tags(stored, tags);
    }
}
