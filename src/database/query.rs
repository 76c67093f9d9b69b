// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{
    Ingredient, IngredientCategory, IngredientId, InventoryItem, InventoryItemId, Recipe,
    RecipeHandle, RecipeId, RecipeIngredient, User, UserCredentials, UserId,
};
use crate::inventory::InventoryEntry;
use crate::recipes::{RecipeWithIngredients, RequiredIngredient};
use crate::{Error, Result};
use diesel::associations::GroupedBy as _;
use diesel::prelude::OptionalExtension as _;
use diesel::BelongingToDsl as _;
use diesel::Connection as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;
use std::collections::HashSet;

pub fn insert_user(
    conn: &mut database::Connection,
    new_email: &str,
    new_password_hash: &str,
) -> Result<User> {
    use database::schema::users::dsl::*;
    use diesel::insert_into;

    Ok(insert_into(users)
        .values((
            email.eq(new_email),
            password_hash.eq(new_password_hash),
            created_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .returning(User::as_returning())
        .get_result(conn)?)
}

pub fn find_credentials(
    conn: &mut database::Connection,
    find_email: &str,
) -> Result<Option<UserCredentials>> {
    use database::schema::users::dsl::*;

    Ok(users
        .select(UserCredentials::as_select())
        .filter(email.eq(find_email))
        .get_result(conn)
        .optional()?)
}

pub fn get_user(conn: &mut database::Connection, user_id: UserId) -> Result<User> {
    use database::schema::users::dsl::*;

    users
        .select(User::as_select())
        .filter(id.eq(user_id))
        .get_result(conn)
        .optional()?
        .ok_or(Error::NotFound("user"))
}

pub fn all_ingredients(conn: &mut database::Connection) -> Result<Vec<Ingredient>> {
    use database::schema::ingredients::dsl::*;

    Ok(ingredients
        .select(Ingredient::as_select())
        .order_by(name.asc())
        .load(conn)?)
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Ingredients whose name contains `query`, ignoring case. `%` and `_` match literally.
pub fn search_ingredients(conn: &mut database::Connection, query: &str) -> Result<Vec<Ingredient>> {
    use database::schema::ingredients::dsl::*;
    use diesel::expression_methods::EscapeExpressionMethods as _;
    use diesel::expression_methods::TextExpressionMethods as _;

    let pattern = format!("%{}%", escape_like(&ingredient_name_key(query)));
    Ok(ingredients
        .select(Ingredient::as_select())
        .filter(name_key.like(pattern).escape('\\'))
        .order_by(name.asc())
        .load(conn)?)
}

/// Key that ingredient names are unique by. Folds case for every script, not just ASCII.
pub fn ingredient_name_key(ingredient_name: &str) -> String {
    ingredient_name.trim().to_lowercase()
}

/// Finds an ingredient by name, ignoring case.
pub fn find_ingredient_by_name(
    conn: &mut database::Connection,
    find_name: &str,
) -> Result<Option<Ingredient>> {
    use database::schema::ingredients::dsl::*;

    Ok(ingredients
        .select(Ingredient::as_select())
        .filter(name_key.eq(ingredient_name_key(find_name)))
        .get_result(conn)
        .optional()?)
}

pub fn insert_ingredient(
    conn: &mut database::Connection,
    new_name: &str,
    new_category: IngredientCategory,
) -> Result<Ingredient> {
    use database::schema::ingredients::dsl::*;
    use diesel::insert_into;

    log::debug!("adding ingredient {new_name:?} ({new_category})");
    Ok(insert_into(ingredients)
        .values((
            name.eq(new_name),
            name_key.eq(ingredient_name_key(new_name)),
            category.eq(new_category),
        ))
        .returning(Ingredient::as_returning())
        .get_result(conn)?)
}

/// Returns the id of the ingredient called `new_name`, adding it first if no ingredient by that
/// name (ignoring case) exists yet.
pub fn ensure_ingredient(
    conn: &mut database::Connection,
    new_name: &str,
    new_category: IngredientCategory,
) -> Result<IngredientId> {
    conn.transaction(|conn| {
        if let Some(existing) = find_ingredient_by_name(conn, new_name)? {
            return Ok(existing.id);
        }
        Ok(insert_ingredient(conn, new_name, new_category)?.id)
    })
}

pub fn insert_recipe(
    conn: &mut database::Connection,
    owner: UserId,
    new_name: &str,
    new_description: &str,
    new_instructions: &str,
) -> Result<Recipe> {
    use database::schema::recipes::dsl::*;
    use diesel::insert_into;

    log::debug!("adding recipe {new_name:?} for user {owner}");
    Ok(insert_into(recipes)
        .values((
            user_id.eq(owner),
            name.eq(new_name),
            description.eq(new_description),
            instructions.eq(new_instructions),
            created_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .returning(Recipe::as_returning())
        .get_result(conn)?)
}

pub fn insert_recipe_ingredient(
    conn: &mut database::Connection,
    new_recipe_id: RecipeId,
    new_ingredient_id: IngredientId,
    new_quantity: f32,
    new_unit: &str,
) -> Result<RecipeIngredient> {
    use database::schema::recipe_ingredients::dsl::*;
    use diesel::insert_into;

    Ok(insert_into(recipe_ingredients)
        .values((
            recipe_id.eq(new_recipe_id),
            ingredient_id.eq(new_ingredient_id),
            quantity.eq(new_quantity),
            unit.eq(new_unit),
        ))
        .returning(RecipeIngredient::as_returning())
        .get_result(conn)?)
}

/// The user's recipes, newest first.
pub fn user_recipes(conn: &mut database::Connection, owner: UserId) -> Result<Vec<RecipeHandle>> {
    use database::schema::recipes::dsl::*;

    Ok(recipes
        .select(RecipeHandle::as_select())
        .filter(user_id.eq(owner))
        .order_by((created_at.desc(), id.desc()))
        .load(conn)?)
}

fn attach_ingredients(
    conn: &mut database::Connection,
    recipe_rows: Vec<Recipe>,
) -> Result<Vec<RecipeWithIngredients>> {
    use database::schema::{ingredients, recipe_ingredients};

    let entries: Vec<(RecipeIngredient, Ingredient)> = RecipeIngredient::belonging_to(&recipe_rows)
        .inner_join(ingredients::table)
        .select((RecipeIngredient::as_select(), Ingredient::as_select()))
        .order_by(recipe_ingredients::id.asc())
        .load(conn)?;

    Ok(entries
        .grouped_by(&recipe_rows)
        .into_iter()
        .zip(recipe_rows)
        .map(|(entries, recipe)| RecipeWithIngredients {
            recipe,
            ingredients: entries
                .into_iter()
                .map(|(entry, ingredient)| RequiredIngredient::new(entry, ingredient))
                .collect(),
        })
        .collect())
}

/// Every recipe the user owns with its required ingredients, newest recipe first. Ingredients
/// keep the order they were added in.
pub fn user_recipes_with_ingredients(
    conn: &mut database::Connection,
    owner: UserId,
) -> Result<Vec<RecipeWithIngredients>> {
    let recipe_rows: Vec<Recipe> = {
        use database::schema::recipes::dsl::*;

        recipes
            .select(Recipe::as_select())
            .filter(user_id.eq(owner))
            .order_by((created_at.desc(), id.desc()))
            .load(conn)?
    };
    attach_ingredients(conn, recipe_rows)
}

pub fn get_recipe(
    conn: &mut database::Connection,
    owner: UserId,
    get_id: RecipeId,
) -> Result<RecipeWithIngredients> {
    let recipe: Recipe = {
        use database::schema::recipes::dsl::*;

        recipes
            .select(Recipe::as_select())
            .filter(id.eq(get_id))
            .filter(user_id.eq(owner))
            .get_result(conn)
            .optional()?
            .ok_or(Error::NotFound("recipe"))?
    };
    attach_ingredients(conn, vec![recipe])?
        .pop()
        .ok_or(Error::NotFound("recipe"))
}

/// Deletes the recipe along with its ingredient list.
pub fn delete_recipe(
    conn: &mut database::Connection,
    owner: UserId,
    delete_id: RecipeId,
) -> Result<()> {
    use database::schema::recipes::dsl::*;
    use diesel::delete;

    let deleted = delete(recipes.filter(id.eq(delete_id)).filter(user_id.eq(owner))).execute(conn)?;
    if deleted == 0 {
        return Err(Error::NotFound("recipe"));
    }
    log::debug!("deleted recipe {delete_id} of user {owner}");
    Ok(())
}

pub fn insert_inventory_item(
    conn: &mut database::Connection,
    owner: UserId,
    new_ingredient_id: IngredientId,
    new_quantity: f32,
    new_unit: &str,
    new_expiry_date: Option<chrono::NaiveDate>,
) -> Result<InventoryItem> {
    use database::schema::user_inventory::dsl::*;
    use diesel::insert_into;

    log::debug!("adding ingredient {new_ingredient_id} to inventory of user {owner}");
    Ok(insert_into(user_inventory)
        .values((
            user_id.eq(owner),
            ingredient_id.eq(new_ingredient_id),
            quantity.eq(new_quantity),
            unit.eq(new_unit),
            expiry_date.eq(new_expiry_date),
        ))
        .returning(InventoryItem::as_returning())
        .get_result(conn)?)
}

/// The user's inventory joined with ingredient details, ordered by ingredient name.
pub fn inventory_entries(
    conn: &mut database::Connection,
    owner: UserId,
) -> Result<Vec<InventoryEntry>> {
    use database::schema::{ingredients, user_inventory};

    let rows: Vec<(InventoryItem, Ingredient)> = user_inventory::table
        .inner_join(ingredients::table)
        .select((InventoryItem::as_select(), Ingredient::as_select()))
        .filter(user_inventory::user_id.eq(owner))
        .order_by((ingredients::name.asc(), user_inventory::id.asc()))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(item, ingredient)| InventoryEntry::new(item, ingredient))
        .collect())
}

/// The distinct ingredients the user has any stock of.
pub fn owned_ingredient_ids(
    conn: &mut database::Connection,
    owner: UserId,
) -> Result<HashSet<IngredientId>> {
    use database::schema::user_inventory::dsl::*;

    let owned: Vec<IngredientId> = user_inventory
        .select(ingredient_id)
        .filter(user_id.eq(owner))
        .distinct()
        .load(conn)?;
    Ok(owned.into_iter().collect())
}

pub fn get_inventory_item(
    conn: &mut database::Connection,
    owner: UserId,
    get_id: InventoryItemId,
) -> Result<InventoryItem> {
    use database::schema::user_inventory::dsl::*;

    user_inventory
        .select(InventoryItem::as_select())
        .filter(id.eq(get_id))
        .filter(user_id.eq(owner))
        .get_result(conn)
        .optional()?
        .ok_or(Error::NotFound("inventory item"))
}

pub fn update_inventory_quantity(
    conn: &mut database::Connection,
    update_id: InventoryItemId,
    new_quantity: f32,
) -> Result<()> {
    use database::schema::user_inventory::dsl::*;
    use diesel::update;

    update(user_inventory)
        .filter(id.eq(update_id))
        .set(quantity.eq(new_quantity))
        .execute(conn)?;
    Ok(())
}

pub fn delete_inventory_item(
    conn: &mut database::Connection,
    delete_id: InventoryItemId,
) -> Result<()> {
    use database::schema::user_inventory::dsl::*;
    use diesel::delete;

    delete(user_inventory.filter(id.eq(delete_id))).execute(conn)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn names(found: Vec<Ingredient>) -> Vec<String> {
        found.into_iter().map(|i| i.name).collect()
    }

    #[test]
    fn ingredient_names_ignore_case_beyond_ascii() {
        let mut conn = database::test_connection();

        let upper = ensure_ingredient(&mut conn, "Épinard", IngredientCategory::Vegetable).unwrap();
        let lower = ensure_ingredient(&mut conn, "épinard", IngredientCategory::Other).unwrap();
        assert_eq!(upper, lower);

        let found = find_ingredient_by_name(&mut conn, "ÉPINARD").unwrap().unwrap();
        assert_eq!(found.name, "Épinard");
        assert_eq!(found.category, IngredientCategory::Vegetable);

        assert!(insert_ingredient(&mut conn, "épinard", IngredientCategory::Other).is_err());
        assert_eq!(all_ingredients(&mut conn).unwrap().len(), 1);
    }

    #[test]
    fn search_ignores_case() {
        let mut conn = database::test_connection();
        insert_ingredient(&mut conn, "Crème fraîche", IngredientCategory::Dairy).unwrap();
        insert_ingredient(&mut conn, "Tomato", IngredientCategory::Vegetable).unwrap();

        assert_eq!(names(search_ingredients(&mut conn, "CRÈME").unwrap()), ["Crème fraîche"]);
        assert_eq!(names(search_ingredients(&mut conn, "mat").unwrap()), ["Tomato"]);
    }

    #[test]
    fn search_matches_wildcards_literally() {
        let mut conn = database::test_connection();
        insert_ingredient(&mut conn, "Flour", IngredientCategory::Grain).unwrap();
        insert_ingredient(&mut conn, "Milk 2%", IngredientCategory::Dairy).unwrap();
        insert_ingredient(&mut conn, "Hot_sauce", IngredientCategory::Other).unwrap();

        assert_eq!(names(search_ingredients(&mut conn, "%").unwrap()), ["Milk 2%"]);
        assert_eq!(names(search_ingredients(&mut conn, "2%").unwrap()), ["Milk 2%"]);
        assert_eq!(names(search_ingredients(&mut conn, "_").unwrap()), ["Hot_sauce"]);
        assert!(search_ingredients(&mut conn, "\\").unwrap().is_empty());
        assert_eq!(search_ingredients(&mut conn, "").unwrap().len(), 3);
    }
}
