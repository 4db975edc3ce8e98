use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::catalog_actor::CatalogService;
use crate::clients::RecipeClient;
use crate::error::CatalogError;
use crate::registry::VariantRegistry;
use crate::store::{InMemoryRecipeRepository, RecipeRepository};

use super::SystemConfig;

/// Starts the catalog actor and hands out its client.
///
/// The registry is frozen before the actor starts and shared read-only from
/// then on.
pub struct CatalogSystem {
    pub recipe_client: RecipeClient,
    registry: Arc<VariantRegistry>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Starts the system over a fresh in-memory store.
    pub fn new(config: &SystemConfig, registry: VariantRegistry) -> Self {
        Self::with_repository(config, registry, InMemoryRecipeRepository::new())
    }

    #[instrument(name = "catalog_system", skip(registry, repo))]
    pub fn with_repository<R>(config: &SystemConfig, registry: VariantRegistry, repo: R) -> Self
    where
        R: RecipeRepository + 'static,
    {
        info!("Starting catalog system");

        let registry = Arc::new(registry);
        let (service, recipe_client) =
            CatalogService::new(config.channel_capacity, Arc::clone(&registry), repo);
        let handles = vec![tokio::spawn(service.run())];

        info!("Catalog system started successfully");

        Self {
            recipe_client,
            registry,
            handles,
        }
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    /// Asks the actor to stop and waits for it to drain.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), CatalogError> {
        info!("Shutting down catalog system");

        let _ = self.recipe_client.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(CatalogError::ActorCommunicationError(e.to_string()));
            }
        }

        info!("Catalog system shutdown complete");
        Ok(())
    }
}
