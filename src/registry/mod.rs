//! Maps free-form type tags to recipe variants.
//!
//! The table is assembled once during startup with [`RegistryBuilder`] and is
//! immutable afterwards. New variants plug in by implementing
//! [`VariantConstructor`] and registering under their kind; neither this module
//! nor [`Recipe`] needs to change.

mod variants;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Recipe, RecipeKind, RecipeRequest};

pub use variants::*;

/// Produces fresh instances of one recipe variant.
pub trait VariantConstructor: Send + Sync {
    /// The kind stamped on every instance this constructor produces.
    fn kind(&self) -> RecipeKind;

    fn blank(&self) -> Recipe {
        Recipe::new(self.kind())
    }

    /// Builds an unsaved instance and copies the shared fields from `req`.
    fn from_request(&self, req: Option<&RecipeRequest>) -> Recipe {
        let mut out = self.blank();
        out.clear_id();
        if let Some(req) = req {
            populate_common_fields(&mut out, req);
        }
        out
    }
}

/// Copies the fields every variant shares. Fields absent from `req` end up unset.
pub fn populate_common_fields(target: &mut Recipe, req: &RecipeRequest) {
    target.title = req.title.clone();
    target.description = req.description.clone();
    target.ingredients = req.ingredients.clone();
    target.instructions = req.instructions.clone();
    target.servings = req.servings;
}

#[derive(Default)]
pub struct RegistryBuilder {
    constructors: HashMap<RecipeKind, Arc<dyn VariantConstructor>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the constructor for `kind`. A blank kind is ignored.
    pub fn register(mut self, kind: &str, constructor: impl VariantConstructor + 'static) -> Self {
        match RecipeKind::parse(kind) {
            Some(kind) => {
                debug!(kind = %kind, "Registering recipe variant");
                self.constructors.insert(kind, Arc::new(constructor));
            }
            None => debug!("Ignoring registration with blank kind"),
        }
        self
    }

    /// Freezes the table. The default kind is filled in if nobody registered it.
    pub fn build(mut self) -> VariantRegistry {
        let fallback = match self.constructors.get(&VariantRegistry::DEFAULT_KIND) {
            Some(constructor) => Arc::clone(constructor),
            None => {
                warn!("No constructor registered for default kind, using BasicRecipe");
                let constructor: Arc<dyn VariantConstructor> = Arc::new(BasicRecipe);
                self.constructors
                    .insert(VariantRegistry::DEFAULT_KIND, Arc::clone(&constructor));
                constructor
            }
        };
        VariantRegistry {
            constructors: self.constructors,
            fallback,
        }
    }
}

pub struct VariantRegistry {
    constructors: HashMap<RecipeKind, Arc<dyn VariantConstructor>>,
    fallback: Arc<dyn VariantConstructor>,
}

impl VariantRegistry {
    pub const DEFAULT_KIND: RecipeKind = RecipeKind::BASIC;

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// BASIC, VEGETARIAN, DESSERT and DAIRY.
    pub fn with_builtin_variants() -> Self {
        register_builtin_variants(Self::builder()).build()
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&RecipeKind> {
        let mut kinds: Vec<_> = self.constructors.keys().collect();
        kinds.sort();
        kinds
    }

    pub fn is_registered(&self, kind: &RecipeKind) -> bool {
        self.constructors.contains_key(kind)
    }

    fn constructor_for(&self, req: Option<&RecipeRequest>) -> &Arc<dyn VariantConstructor> {
        let requested = req
            .and_then(|req| req.kind.as_deref())
            .and_then(RecipeKind::parse);
        match requested {
            Some(kind) => self.constructors.get(&kind).unwrap_or_else(|| {
                debug!(kind = %kind, "Unknown recipe kind, falling back to default");
                &self.fallback
            }),
            None => &self.fallback,
        }
    }

    /// Builds a new, unsaved recipe of the requested kind.
    ///
    /// Unknown, blank or missing type tags resolve to the default kind. This
    /// never fails: malformed input yields an empty default record.
    pub fn create_from_request(&self, req: Option<&RecipeRequest>) -> Recipe {
        self.constructor_for(req).from_request(req)
    }
}

impl fmt::Debug for VariantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
