use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use super::tag::{Tag, TagSet};
use super::user::AppUser;

/// Surrogate key assigned by storage on first save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminator distinguishing recipe variants.
///
/// Kinds are always held in normalized form (trimmed, uppercase), so two kinds
/// compare equal exactly when a registry lookup would treat them as the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecipeKind(Cow<'static, str>);

impl RecipeKind {
    pub const BASIC: Self = Self(Cow::Borrowed("BASIC"));
    pub const VEGETARIAN: Self = Self(Cow::Borrowed("VEGETARIAN"));
    pub const DESSERT: Self = Self(Cow::Borrowed("DESSERT"));
    pub const DAIRY: Self = Self(Cow::Borrowed("DAIRY"));

    /// Normalizes a free-form type tag. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(Cow::Owned(trimmed.to_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog record. Every variant shares this layout and differs only by `kind`.
///
/// The kind is fixed when the value is constructed and has no setter. The id is
/// assigned by storage; the tag set is only reachable through [`Recipe::add_tag`],
/// [`Recipe::remove_tag`] and [`Recipe::clear_tags`], which keep it free of
/// record-equal duplicates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    id: Option<RecipeId>,
    #[serde(rename = "recipeType")]
    kind: RecipeKind,
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub servings: Option<u32>,
    pub author: Option<AppUser>,
    tags: TagSet,
}

impl Recipe {
    /// Creates a blank, unsaved recipe of the given kind.
    pub fn new(kind: RecipeKind) -> Self {
        Self {
            id: None,
            kind,
            title: None,
            description: None,
            ingredients: None,
            instructions: None,
            servings: None,
            author: None,
            tags: TagSet::new(),
        }
    }

    /// Reconstitutes a record that already carries a storage id (seeding, fixtures).
    pub fn with_id(mut self, id: RecipeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<RecipeId> {
        self.id
    }

    pub fn kind(&self) -> &RecipeKind {
        &self.kind
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Associates `tag` with this recipe. Returns `false` if a record-equal tag
    /// was already present, in which case nothing changes.
    pub fn add_tag(&mut self, tag: Tag) -> bool {
        self.tags.insert(tag)
    }

    /// Removes `tag` if present; absent tags are ignored.
    pub fn remove_tag(&mut self, tag: &Tag) -> bool {
        self.tags.remove(tag)
    }

    pub fn clear_tags(&mut self) {
        self.tags.clear();
    }

    pub(crate) fn assign_id(&mut self, id: RecipeId) {
        self.id = Some(id);
    }

    pub(crate) fn clear_id(&mut self) {
        self.id = None;
    }

    pub(crate) fn tags_mut(&mut self) -> &mut TagSet {
        &mut self.tags
    }

    pub(crate) fn take_tags(&mut self) -> TagSet {
        std::mem::take(&mut self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cake() -> Recipe {
        let mut recipe = Recipe::new(RecipeKind::DESSERT).with_id(RecipeId(1));
        recipe.title = Some("Cake".to_string());
        recipe.description = Some("Delicious cake".to_string());
        recipe.ingredients = Some("Flour, Sugar, Eggs".to_string());
        recipe.instructions = Some("Mix and bake".to_string());
        recipe.servings = Some(8);
        recipe
    }

    #[test]
    fn test_kind_parse_normalizes() {
        assert_eq!(RecipeKind::parse("  dessert "), Some(RecipeKind::DESSERT));
        assert_eq!(RecipeKind::parse("Dairy"), Some(RecipeKind::DAIRY));
        assert_eq!(RecipeKind::parse("   "), None);
        assert_eq!(RecipeKind::parse("gluten_free").unwrap().as_str(), "GLUTEN_FREE");
    }

    #[test]
    fn test_new_recipe_is_blank() {
        let recipe = Recipe::new(RecipeKind::BASIC);
        assert_eq!(recipe.id(), None);
        assert_eq!(recipe.kind(), &RecipeKind::BASIC);
        assert!(recipe.title.is_none());
        assert!(recipe.servings.is_none());
        assert!(recipe.author.is_none());
        assert!(recipe.tags().is_empty());
    }

    #[test]
    fn test_add_then_remove_restores_both_views() {
        let mut recipe = cake();
        let tag = Tag::new("Dessert");

        assert_eq!(tag.recipes_in([&recipe]).count(), 0);
        assert!(recipe.add_tag(tag.clone()));
        assert!(recipe.has_tag(&tag));
        assert_eq!(tag.recipes_in([&recipe]).count(), 1);

        assert!(recipe.remove_tag(&tag));
        assert!(recipe.tags().is_empty());
        assert_eq!(tag.recipes_in([&recipe]).count(), 0);
    }

    #[test]
    fn test_add_tag_is_idempotent() {
        let mut recipe = cake();
        assert!(recipe.add_tag(Tag::new("quick")));
        assert!(!recipe.add_tag(Tag::new("quick")));
        assert_eq!(recipe.tags().len(), 1);
    }

    #[test]
    fn test_record_equal_tags_are_deduplicated() {
        let mut recipe = cake();
        recipe.add_tag(Tag::new("italian").with_id(crate::domain::TagId(4)));
        // Same id, different spelling: still the same record.
        recipe.add_tag(Tag::new("Italian").with_id(crate::domain::TagId(4)));
        assert_eq!(recipe.tags().len(), 1);
    }

    #[test]
    fn test_remove_absent_tag_is_noop() {
        let mut recipe = cake();
        recipe.add_tag(Tag::new("a"));
        assert!(!recipe.remove_tag(&Tag::new("b")));
        assert_eq!(recipe.tags().len(), 1);
    }

    #[test]
    fn test_clear_tags_detaches_every_tag() {
        let mut recipe = cake();
        let first = Tag::new("first");
        let second = Tag::new("second");
        recipe.add_tag(first.clone());
        recipe.add_tag(second.clone());

        recipe.clear_tags();

        assert!(recipe.tags().is_empty());
        assert_eq!(first.recipes_in([&recipe]).count(), 0);
        assert_eq!(second.recipes_in([&recipe]).count(), 0);
    }

    #[test]
    fn test_one_tag_shared_by_every_kind() {
        let tag = Tag::new("Popular");
        let mut recipes: Vec<Recipe> = [
            RecipeKind::BASIC,
            RecipeKind::VEGETARIAN,
            RecipeKind::DESSERT,
            RecipeKind::DAIRY,
        ]
        .into_iter()
        .map(Recipe::new)
        .collect();

        for recipe in &mut recipes {
            tag.add_recipe(recipe);
        }

        assert_eq!(tag.recipes_in(&recipes).count(), 4);
        assert!(recipes.iter().all(|r| r.has_tag(&tag)));
    }

    #[test]
    fn test_outbound_shape_exposes_kind_and_tag_names() {
        let mut recipe = cake();
        recipe.author = Some(crate::domain::AppUser::new("baker", "hunter2", Some("Baker")));
        recipe.add_tag(Tag::with_description("sweet", "sugary things"));

        let json = serde_json::to_value(&recipe).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["recipeType"], "DESSERT");
        assert_eq!(json["title"], "Cake");
        assert_eq!(json["servings"], 8);
        assert_eq!(json["tags"], serde_json::json!([{ "name": "sweet" }]));
        assert_eq!(json["author"]["displayName"], "Baker");
        assert!(json["author"].get("password").is_none());
        assert!(json["author"].get("username").is_none());
    }
}
