//! # Mock Framework
//!
//! Utilities for testing the record service and the catalog client in isolation.
//!
//! [`RecordingRepository`] wraps the in-memory store, logs every call into a
//! shared [`CallLog`] and can be told to fail saves or deletes, which is how
//! tests assert that an operation did (or did not) reach storage.
//!
//! [`create_mock_client`] hands back a client and the receiving end of its
//! channel; the `expect_*` helpers pull the next request off that channel so a
//! test can play the actor's part deterministically.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::catalog_actor::{CatalogRequest, ServiceResponse};
use crate::clients::RecipeClient;
use crate::domain::{Recipe, RecipeEdit, RecipeId};
use crate::store::{InMemoryRecipeRepository, RecipeRepository, StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq)]
pub enum RepoCall {
    FindById(RecipeId),
    FindAll,
    Save(Option<RecipeId>),
    ExistsById(RecipeId),
    DeleteById(RecipeId),
}

/// Shared handle onto the calls a [`RecordingRepository`] has seen.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<RepoCall>>>);

impl CallLog {
    fn push(&self, call: RepoCall) {
        self.0.lock().unwrap().push(call);
    }

    /// Drains the log.
    pub fn take(&self) -> Vec<RepoCall> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

#[derive(Debug, Default)]
pub struct RecordingRepository {
    inner: InMemoryRecipeRepository,
    calls: CallLog,
    save_failure: Mutex<Option<StoreError>>,
    delete_failure: Mutex<Option<StoreError>>,
}

impl RecordingRepository {
    /// Pre-populates the store. Seeding is not logged.
    pub fn seeded(recipes: Vec<Recipe>) -> Self {
        let mut repo = Self::default();
        for recipe in recipes {
            repo.inner.save(recipe).unwrap();
        }
        repo
    }

    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }

    /// Every subsequent save fails with `error`.
    pub fn fail_saves_with(&self, error: StoreError) {
        *self.save_failure.lock().unwrap() = Some(error);
    }

    /// Every subsequent delete fails with `error`.
    pub fn fail_deletes_with(&self, error: StoreError) {
        *self.delete_failure.lock().unwrap() = Some(error);
    }
}

impl RecipeRepository for RecordingRepository {
    fn find_by_id(&self, id: RecipeId) -> StoreResult<Option<Recipe>> {
        self.calls.push(RepoCall::FindById(id));
        self.inner.find_by_id(id)
    }

    fn find_all(&self) -> StoreResult<Vec<Recipe>> {
        self.calls.push(RepoCall::FindAll);
        self.inner.find_all()
    }

    fn save(&mut self, recipe: Recipe) -> StoreResult<Recipe> {
        self.calls.push(RepoCall::Save(recipe.id()));
        if let Some(error) = self.save_failure.lock().unwrap().clone() {
            return Err(error);
        }
        self.inner.save(recipe)
    }

    fn exists_by_id(&self, id: RecipeId) -> StoreResult<bool> {
        self.calls.push(RepoCall::ExistsById(id));
        self.inner.exists_by_id(id)
    }

    fn delete_by_id(&mut self, id: RecipeId) -> StoreResult<()> {
        self.calls.push(RepoCall::DeleteById(id));
        if let Some(error) = self.delete_failure.lock().unwrap().clone() {
            return Err(error);
        }
        self.inner.delete_by_id(id)
    }
}

/// Creates a client whose requests land on a receiver the test controls.
pub fn create_mock_client(buffer_size: usize) -> (RecipeClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RecipeClient::new(sender), receiver)
}

/// Helper to verify that the next message is a CreateRecipe request
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(RecipeEdit, ServiceResponse<Recipe>)> {
    match receiver.recv().await {
        Some(CatalogRequest::CreateRecipe { edit, respond_to }) => Some((edit, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a GetRecipe request
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(RecipeId, ServiceResponse<Option<Recipe>>)> {
    match receiver.recv().await {
        Some(CatalogRequest::GetRecipe { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a DeleteRecipe request
pub async fn expect_delete(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(RecipeId, ServiceResponse<bool>)> {
    match receiver.recv().await {
        Some(CatalogRequest::DeleteRecipe { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecipeKind, RecipeRequest};
    use crate::error::CatalogError;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            client
                .create_recipe(RecipeRequest::of_kind("dessert").titled("Pie").into())
                .await
        });

        let (edit, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(edit.request.title.as_deref(), Some("Pie"));
        let created = Recipe::new(RecipeKind::DESSERT).with_id(RecipeId(1));
        responder.send(Ok(created)).unwrap();

        let result = create_task.await.unwrap().unwrap();
        assert_eq!(result.id(), Some(RecipeId(1)));
    }

    #[tokio::test]
    async fn test_dropped_responder_surfaces_as_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let get_task = tokio::spawn(async move { client.get_recipe(RecipeId(4)).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, RecipeId(4));
        drop(responder);

        let result = get_task.await.unwrap();
        assert!(matches!(result, Err(CatalogError::ActorCommunicationError(_))));
    }

    #[test]
    fn test_recording_repository_logs_calls() {
        let mut repo = RecordingRepository::seeded(vec![Recipe::new(RecipeKind::BASIC)]);
        repo.exists_by_id(RecipeId(1)).unwrap();
        repo.delete_by_id(RecipeId(1)).unwrap();

        assert_eq!(
            repo.calls().take(),
            vec![RepoCall::ExistsById(RecipeId(1)), RepoCall::DeleteById(RecipeId(1))]
        );
        assert!(repo.calls().take().is_empty());
    }
}
