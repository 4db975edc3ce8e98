use std::fmt;

use serde::Serialize;

use super::recipe::Recipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TagId(pub u64);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named label that recipes can be filed under.
///
/// The recipe side owns the association. A tag's set of recipes is derived on
/// demand with [`Tag::recipes_in`], so the two directions cannot disagree.
///
/// Equality is by id when both tags have one, otherwise by name. This lets an
/// unsaved tag match its saved counterpart before storage has assigned ids.
#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    #[serde(skip)]
    id: Option<TagId>,
    name: String,
    #[serde(skip)]
    description: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: Some(description.into()),
        }
    }

    pub fn with_id(mut self, id: TagId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<TagId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Case-insensitive name comparison.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// The recipes among `recipes` that carry this tag.
    pub fn recipes_in<'a, I>(&'a self, recipes: I) -> impl Iterator<Item = &'a Recipe> + 'a
    where
        I: IntoIterator<Item = &'a Recipe>,
        I::IntoIter: 'a,
    {
        recipes.into_iter().filter(move |recipe| recipe.has_tag(self))
    }

    /// Tag-side mirror of [`Recipe::add_tag`].
    pub fn add_recipe(&self, recipe: &mut Recipe) -> bool {
        recipe.add_tag(self.clone())
    }

    /// Tag-side mirror of [`Recipe::remove_tag`].
    pub fn remove_recipe(&self, recipe: &mut Recipe) -> bool {
        recipe.remove_tag(self)
    }

    pub(crate) fn assign_id(&mut self, id: TagId) {
        self.id = Some(id);
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            _ => self.name == other.name,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{} (#{})", self.name, id),
            None => f.write_str(&self.name),
        }
    }
}

/// Unordered tag collection with set semantics under [`Tag`]'s equality.
///
/// Tag equality mixes id and name comparison and is not a total order, so
/// membership is checked linearly instead of through hashing.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TagSet(Vec<Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.0.iter().any(|existing| existing == tag)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.0.iter()
    }

    pub(crate) fn insert(&mut self, tag: Tag) -> bool {
        if self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    /// Removes the first member equal to `tag`.
    ///
    /// An id-less tag equals every member with its name, so when several
    /// saved tags share a name only the earliest one goes.
    pub(crate) fn remove(&mut self, tag: &Tag) -> bool {
        match self.0.iter().position(|existing| existing == tag) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl IntoIterator for TagSet {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
