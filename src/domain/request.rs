use serde::Deserialize;

use super::tag::Tag;
use super::user::AppUser;

/// Inbound recipe payload. Every field is optional; absence means "leave unset".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecipeRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub servings: Option<u32>,
}

impl RecipeRequest {
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A request plus the relations a caller may attach to it.
///
/// `tags: None` means "leave the stored tags alone"; `Some` replaces them.
#[derive(Debug, Clone, Default)]
pub struct RecipeEdit {
    pub request: RecipeRequest,
    pub author: Option<AppUser>,
    pub tags: Option<Vec<Tag>>,
}

impl RecipeEdit {
    pub fn with_author(mut self, author: AppUser) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }
}

impl From<RecipeRequest> for RecipeEdit {
    fn from(request: RecipeRequest) -> Self {
        Self {
            request,
            author: None,
            tags: None,
        }
    }
}
