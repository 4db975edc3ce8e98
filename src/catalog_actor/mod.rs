//! The catalog actor: owns the registry and the record service, and serves
//! [`CatalogRequest`]s one at a time off its mailbox.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

use crate::clients::RecipeClient;
use crate::domain::{Recipe, RecipeEdit, RecipeId, RecipeKind, Tag, TagId};
use crate::error::CatalogError;
use crate::registry::VariantRegistry;
use crate::service::{RecipeDraft, RecordService};
use crate::store::{RecipeRepository, StoreResult};

pub type ServiceResponse<T> = oneshot::Sender<Result<T, CatalogError>>;

#[derive(Debug)]
pub enum CatalogRequest {
    CreateRecipe {
        edit: RecipeEdit,
        respond_to: ServiceResponse<Recipe>,
    },
    GetRecipe {
        id: RecipeId,
        respond_to: ServiceResponse<Option<Recipe>>,
    },
    ListRecipes {
        respond_to: ServiceResponse<Vec<Recipe>>,
    },
    ReplaceRecipe {
        id: RecipeId,
        edit: RecipeEdit,
        respond_to: ServiceResponse<Option<Recipe>>,
    },
    PatchRecipe {
        id: RecipeId,
        edit: RecipeEdit,
        respond_to: ServiceResponse<Option<Recipe>>,
    },
    DeleteRecipe {
        id: RecipeId,
        respond_to: ServiceResponse<bool>,
    },
    AddTag {
        id: RecipeId,
        tag: Tag,
        respond_to: ServiceResponse<Option<Recipe>>,
    },
    RemoveTag {
        id: RecipeId,
        tag: Tag,
        respond_to: ServiceResponse<Option<Recipe>>,
    },
    FindByTag {
        name: String,
        respond_to: ServiceResponse<Vec<Recipe>>,
    },
    FindByTagId {
        tag_id: TagId,
        respond_to: ServiceResponse<Vec<Recipe>>,
    },
    ListKinds {
        respond_to: ServiceResponse<Vec<RecipeKind>>,
    },
    Shutdown,
    #[cfg(test)]
    GetRecipeCount {
        respond_to: ServiceResponse<usize>,
    },
}

fn reply<T>(respond_to: ServiceResponse<T>, result: StoreResult<T>) {
    let _ = respond_to.send(result.map_err(CatalogError::from));
}

pub struct CatalogService<R> {
    receiver: mpsc::Receiver<CatalogRequest>,
    registry: Arc<VariantRegistry>,
    records: RecordService<R>,
}

impl<R: RecipeRepository + 'static> CatalogService<R> {
    pub fn new(buffer_size: usize, registry: Arc<VariantRegistry>, repo: R) -> (Self, RecipeClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            registry,
            records: RecordService::new(repo),
        };
        (service, RecipeClient::new(sender))
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!(kinds = ?self.registry.kinds(), "CatalogService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::CreateRecipe { edit, respond_to } => {
                    self.handle_create(edit, respond_to);
                }
                CatalogRequest::GetRecipe { id, respond_to } => {
                    reply(respond_to, self.records.get_recipe_by_id(id));
                }
                CatalogRequest::ListRecipes { respond_to } => {
                    reply(respond_to, self.records.get_all_recipes());
                }
                CatalogRequest::ReplaceRecipe { id, edit, respond_to } => {
                    self.handle_replace(id, edit, respond_to);
                }
                CatalogRequest::PatchRecipe { id, edit, respond_to } => {
                    self.handle_patch(id, edit, respond_to);
                }
                CatalogRequest::DeleteRecipe { id, respond_to } => {
                    reply(respond_to, self.records.delete_recipe(id));
                }
                CatalogRequest::AddTag { id, tag, respond_to } => {
                    reply(respond_to, self.records.add_tag_to_recipe(id, tag));
                }
                CatalogRequest::RemoveTag { id, tag, respond_to } => {
                    reply(respond_to, self.records.remove_tag_from_recipe(id, &tag));
                }
                CatalogRequest::FindByTag { name, respond_to } => {
                    reply(respond_to, self.records.find_recipes_by_tag(&name));
                }
                CatalogRequest::FindByTagId { tag_id, respond_to } => {
                    reply(respond_to, self.records.find_recipes_by_tag_id(tag_id));
                }
                CatalogRequest::ListKinds { respond_to } => {
                    let kinds = self.registry.kinds().into_iter().cloned().collect();
                    let _ = respond_to.send(Ok(kinds));
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
                #[cfg(test)]
                CatalogRequest::GetRecipeCount { respond_to } => {
                    reply(respond_to, self.records.get_all_recipes().map(|all| all.len()));
                }
            }
        }

        info!("CatalogService stopped");
    }

    /// Builds the variant named by the request's type tag, then attaches the
    /// author and tags before saving.
    #[instrument(fields(kind = ?edit.request.kind), skip(self, edit, respond_to))]
    fn handle_create(&mut self, edit: RecipeEdit, respond_to: ServiceResponse<Recipe>) {
        debug!("Processing create_recipe request");
        let RecipeEdit { request, author, tags } = edit;

        let mut recipe = self.registry.create_from_request(Some(&request));
        recipe.author = author;
        for tag in tags.into_iter().flatten() {
            recipe.add_tag(tag);
        }

        reply(respond_to, self.records.add_recipe(recipe));
    }

    #[instrument(fields(recipe_id = %id), skip(self, edit, respond_to))]
    fn handle_replace(
        &mut self,
        id: RecipeId,
        edit: RecipeEdit,
        respond_to: ServiceResponse<Option<Recipe>>,
    ) {
        debug!("Processing replace_recipe request");
        let draft = self.draft_from(edit);
        reply(respond_to, self.records.update_recipe(id, draft));
    }

    #[instrument(fields(recipe_id = %id), skip(self, edit, respond_to))]
    fn handle_patch(
        &mut self,
        id: RecipeId,
        edit: RecipeEdit,
        respond_to: ServiceResponse<Option<Recipe>>,
    ) {
        debug!("Processing patch_recipe request");
        let draft = self.draft_from(edit);
        reply(respond_to, self.records.patch_recipe(id, draft));
    }

    fn draft_from(&self, edit: RecipeEdit) -> RecipeDraft {
        let RecipeEdit { request, author, tags } = edit;

        let mut recipe = self.registry.create_from_request(Some(&request));
        recipe.author = author;

        let draft = RecipeDraft::keep_tags(recipe);
        match tags {
            Some(tags) => draft.with_tags(tags),
            None => draft,
        }
    }
}
