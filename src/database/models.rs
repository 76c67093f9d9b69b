// Copyright 2023 Remi Bernotavicius

use derive_more::Display;
use diesel::associations::{Associations, Identifiable};
use diesel::deserialize::Queryable;
use diesel::expression::Selectable;
use diesel_derive_enum::DbEnum;
use diesel_derive_newtype::DieselNewType;
use strum::EnumIter;

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct UserId(i32);

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::database::schema::users)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = crate::database::schema::users)]
pub struct UserCredentials {
    pub id: UserId,
    pub password_hash: String,
}

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct IngredientId(i32);

#[derive(Debug, Display, EnumIter, Hash, Copy, Clone, Default, PartialEq, Eq, DbEnum)]
pub enum IngredientCategory {
    #[display("vegetable")]
    Vegetable,
    #[display("fruit")]
    Fruit,
    #[display("meat")]
    Meat,
    #[display("dairy")]
    Dairy,
    #[display("grain")]
    Grain,
    #[display("spice")]
    Spice,
    #[display("herb")]
    Herb,
    #[display("oil")]
    Oil,
    #[default]
    #[display("other")]
    Other,
}

impl IngredientCategory {
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::ingredients)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub category: IngredientCategory,
}

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct RecipeId(i32);

#[derive(Associations, Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = crate::database::schema::recipes)]
pub struct Recipe {
    pub id: RecipeId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::database::schema::recipes)]
pub struct RecipeHandle {
    pub id: RecipeId,
    pub name: String,
}

#[derive(DieselNewType, Debug, Hash, PartialEq, Eq, Copy, Clone)]
pub struct RecipeIngredientId(i32);

/// One required ingredient of a recipe, as stored.
#[derive(Associations, Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Recipe))]
#[diesel(belongs_to(Ingredient))]
#[diesel(table_name = crate::database::schema::recipe_ingredients)]
pub struct RecipeIngredient {
    pub id: RecipeIngredientId,
    pub recipe_id: RecipeId,
    pub ingredient_id: IngredientId,
    pub quantity: f32,
    pub unit: String,
}

#[derive(DieselNewType, Debug, Display, Hash, PartialEq, Eq, Copy, Clone)]
pub struct InventoryItemId(i32);

/// A user's on-hand stock of one ingredient.
#[derive(Associations, Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Ingredient))]
#[diesel(table_name = crate::database::schema::user_inventory)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub user_id: UserId,
    pub ingredient_id: IngredientId,
    pub quantity: f32,
    pub unit: String,
    pub expiry_date: Option<chrono::NaiveDate>,
}

impl InventoryItem {
    pub fn is_expired(&self, today: chrono::NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d < today)
    }
}

#[cfg(test)]
impl UserId {
    pub fn for_test(id: i32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
impl IngredientId {
    pub fn for_test(id: i32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
impl RecipeId {
    pub fn for_test(id: i32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
impl RecipeIngredientId {
    pub fn for_test(id: i32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn item(expiry_date: Option<chrono::NaiveDate>) -> InventoryItem {
        InventoryItem {
            id: InventoryItemId(1),
            user_id: UserId(1),
            ingredient_id: IngredientId(1),
            quantity: 1.0,
            unit: "pieces".into(),
            expiry_date,
        }
    }

    #[test]
    fn expiry() {
        let today = chrono::NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert!(!item(None).is_expired(today));
        assert!(!item(Some(today)).is_expired(today));
        assert!(item(today.pred_opt()).is_expired(today));
    }

    #[test]
    fn category_display() {
        let names: Vec<_> = IngredientCategory::iter().map(|c| c.to_string()).collect();
        assert_eq!(names.len(), 9);
        assert_eq!(IngredientCategory::default().to_string(), "other");
        assert!(names.contains(&"vegetable".to_string()));
    }
}
