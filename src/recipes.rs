// Copyright 2023 Remi Bernotavicius

use crate::database::models::{
    Ingredient, IngredientCategory, IngredientId, Recipe, RecipeIngredient, RecipeIngredientId,
    UserId,
};
use crate::database::{self, query};
use crate::error::ValidationError;
use crate::Result;
use diesel::Connection as _;

/// A recipe's ingredient entry together with the ingredient it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredIngredient {
    pub id: RecipeIngredientId,
    pub ingredient: Ingredient,
    pub quantity: f32,
    pub unit: String,
}

impl RequiredIngredient {
    pub fn new(entry: RecipeIngredient, ingredient: Ingredient) -> Self {
        debug_assert_eq!(entry.ingredient_id, ingredient.id);
        Self {
            id: entry.id,
            ingredient,
            quantity: entry.quantity,
            unit: entry.unit,
        }
    }

    pub fn ingredient_id(&self) -> IngredientId {
        self.ingredient.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeWithIngredients {
    pub recipe: Recipe,
    pub ingredients: Vec<RequiredIngredient>,
}

/// Either an ingredient already in the catalogue or the name of one to add.
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientRef {
    Existing(IngredientId),
    New(String),
}

impl IngredientRef {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        match self {
            Self::New(name) if name.trim().is_empty() => {
                Err(ValidationError::MissingField("ingredient"))
            }
            _ => Ok(()),
        }
    }

    /// New ingredients are added to the catalogue under the `other` category.
    pub fn resolve(&self, conn: &mut database::Connection) -> Result<IngredientId> {
        match self {
            Self::Existing(id) => Ok(*id),
            Self::New(name) => {
                query::ensure_ingredient(conn, name.trim(), IngredientCategory::Other)
            }
        }
    }
}

pub fn validate_amount(quantity: f32, unit: &str) -> std::result::Result<(), ValidationError> {
    if !(quantity > 0.0 && quantity.is_finite()) {
        return Err(ValidationError::NonPositiveQuantity);
    }
    if unit.trim().is_empty() {
        return Err(ValidationError::BlankUnit);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftIngredient {
    pub ingredient: IngredientRef,
    pub quantity: f32,
    pub unit: String,
}

impl DraftIngredient {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.ingredient.validate()?;
        validate_amount(self.quantity, &self.unit)
    }
}

/// A recipe as entered in the new recipe form, before anything is written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDraft {
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub ingredients: Vec<DraftIngredient>,
}

impl RecipeDraft {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.instructions.trim().is_empty() {
            return Err(ValidationError::MissingField("instructions"));
        }
        if self.ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }
        for ingredient in &self.ingredients {
            ingredient.validate()?;
        }
        Ok(())
    }
}

/// Validates `draft` and stores it for `owner`. Either the whole recipe is written or nothing is.
pub fn create_recipe(
    conn: &mut database::Connection,
    owner: UserId,
    draft: &RecipeDraft,
) -> Result<Recipe> {
    draft.validate()?;

    let recipe = conn.transaction(|conn| {
        let recipe = query::insert_recipe(
            conn,
            owner,
            draft.name.trim(),
            draft.description.trim(),
            draft.instructions.trim(),
        )?;
        for entry in &draft.ingredients {
            let ingredient_id = entry.ingredient.resolve(conn)?;
            query::insert_recipe_ingredient(
                conn,
                recipe.id,
                ingredient_id,
                entry.quantity,
                entry.unit.trim(),
            )?;
        }
        Result::Ok(recipe)
    })?;

    log::info!(
        "created recipe {:?} with {} ingredients",
        recipe.name,
        draft.ingredients.len()
    );
    Ok(recipe)
}
