use crate::domain::RecipeKind;

use super::{RegistryBuilder, VariantConstructor};

/// The default variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicRecipe;

#[derive(Debug, Clone, Copy, Default)]
pub struct VegetarianRecipe;

#[derive(Debug, Clone, Copy, Default)]
pub struct DessertRecipe;

#[derive(Debug, Clone, Copy, Default)]
pub struct DairyRecipe;

impl VariantConstructor for BasicRecipe {
    fn kind(&self) -> RecipeKind {
        RecipeKind::BASIC
    }
}

impl VariantConstructor for VegetarianRecipe {
    fn kind(&self) -> RecipeKind {
        RecipeKind::VEGETARIAN
    }
}

impl VariantConstructor for DessertRecipe {
    fn kind(&self) -> RecipeKind {
        RecipeKind::DESSERT
    }
}

impl VariantConstructor for DairyRecipe {
    fn kind(&self) -> RecipeKind {
        RecipeKind::DAIRY
    }
}

/// Registers the four built-in variants under their own kind names.
pub fn register_builtin_variants(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .register(RecipeKind::BASIC.as_str(), BasicRecipe)
        .register(RecipeKind::VEGETARIAN.as_str(), VegetarianRecipe)
        .register(RecipeKind::DESSERT.as_str(), DessertRecipe)
        .register(RecipeKind::DAIRY.as_str(), DairyRecipe)
}
