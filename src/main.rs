mod app_system;
mod catalog_actor;
mod clients;
mod domain;
mod error;
mod registry;
mod service;
mod store;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, CatalogSystem, SystemConfig};
use crate::domain::{AppUser, Recipe, RecipeEdit, RecipeKind, RecipeRequest, Tag};
use crate::registry::VariantRegistry;

fn log_outbound(recipe: &Recipe) {
    match serde_json::to_string(recipe) {
        Ok(json) => info!(
            recipe_id = ?recipe.id(),
            author_id = ?recipe.author.as_ref().and_then(AppUser::id),
            tag_count = recipe.tags().len(),
            %json,
            "Recipe view"
        ),
        Err(e) => error!(error = %e, "Failed to render recipe"),
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = SystemConfig::from_env();
    setup_tracing(&config);

    info!("Starting recipe catalog demo");

    let system = CatalogSystem::new(&config, VariantRegistry::with_builtin_variants());
    let client = system.recipe_client.clone();
    info!(registry = ?system.registry(), "Variant registry ready");
    let kinds = client.list_kinds().await.map_err(|e| e.to_string())?;
    info!(kinds = ?kinds, "Accepted recipe kinds");
    let chef = AppUser::new("chef", "hunter2", Some("Head Chef"));
    info!(author = %chef, "Demo author");

    let span = tracing::info_span!("recipe_creation");
    let (cake, salad) = async {
        let cake_request: RecipeRequest = serde_json::from_str(
            r#"{"type": "dessert", "title": "Chocolate Cake", "servings": 8}"#,
        )
        .map_err(|e| e.to_string())?;
        let cake = client
            .create_recipe(
                RecipeEdit::from(cake_request)
                    .with_author(chef.clone())
                    .with_tags([Tag::new("chocolate"), Tag::new("party")]),
            )
            .await
            .map_err(|e| e.to_string())?;

        let salad = client
            .create_recipe(
                RecipeEdit::from(RecipeRequest::of_kind("vegetarian").titled("Greek Salad"))
                    .with_tags([Tag::new("party"), Tag::new("summer")]),
            )
            .await
            .map_err(|e| e.to_string())?;

        if let Some(fusion) = RecipeKind::parse("fusion") {
            if !system.registry().is_registered(&fusion) {
                info!(kind = %fusion, "Kind not registered, expecting the default variant");
            }
        }
        client
            .create_recipe(RecipeRequest::of_kind("fusion").titled("Mystery Dish").into())
            .await
            .map_err(|e| e.to_string())?;

        Ok::<_, String>((cake, salad))
    }
    .instrument(span)
    .await?;

    log_outbound(&cake);

    let cake_id = cake.id().ok_or("created recipe has no id")?;
    let salad_id = salad.id().ok_or("created recipe has no id")?;

    match client.get_recipe(cake_id).await.map_err(|e| e.to_string())? {
        Some(stored) => info!(recipe_id = %cake_id, kind = %stored.kind(), "Recipe read back"),
        None => error!(recipe_id = %cake_id, "Created recipe is missing"),
    }

    // PUT keeps the stored kind and tags when no tag list is sent.
    let replaced = client
        .replace_recipe(
            cake_id,
            RecipeRequest::of_kind("basic").titled("Dark Chocolate Cake").into(),
        )
        .await
        .map_err(|e| e.to_string())?;
    if let Some(recipe) = &replaced {
        log_outbound(recipe);
    }

    // PATCH touches only what is present.
    let patch = RecipeRequest {
        servings: Some(4),
        ..RecipeRequest::default()
    };
    let patched = client
        .patch_recipe(salad_id, patch.into())
        .await
        .map_err(|e| e.to_string())?;
    if let Some(recipe) = &patched {
        log_outbound(recipe);
    }

    match client.find_by_tag("PARTY".to_string()).await {
        Ok(found) => info!(match_count = found.len(), "Recipes tagged party"),
        Err(e) => error!(error = %e, "Tag query failed"),
    }

    let tagged = client
        .add_tag(cake_id, Tag::with_description("birthday", "Cakes and candles"))
        .await
        .map_err(|e| e.to_string())?;
    let birthday_id = tagged
        .as_ref()
        .and_then(|recipe| recipe.tags().iter().find(|tag| tag.matches_name("birthday")))
        .and_then(Tag::id);
    if let Some(tag_id) = birthday_id {
        let found = client.find_by_tag_id(tag_id).await.map_err(|e| e.to_string())?;
        info!(tag_id = %tag_id, match_count = found.len(), "Recipes by tag id");
    }
    client
        .remove_tag(cake_id, Tag::new("party"))
        .await
        .map_err(|e| e.to_string())?;

    let deleted = client
        .delete_recipe(salad_id)
        .await
        .map_err(|e| e.to_string())?;
    info!(recipe_id = %salad_id, deleted, "Delete finished");

    let remaining = client.list_recipes().await.map_err(|e| e.to_string())?;
    info!(recipe_count = remaining.len(), "Recipes remaining");

    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
