// Copyright 2023 Remi Bernotavicius

use crate::database::models::{Ingredient, InventoryItem, InventoryItemId, UserId};
use crate::database::{self, query};
use crate::error::ValidationError;
use crate::recipes::{validate_amount, IngredientRef};
use crate::Result;
use derive_more::Display;

/// An inventory item together with the ingredient it stocks.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryEntry {
    pub item: InventoryItem,
    pub ingredient: Ingredient,
}

impl InventoryEntry {
    pub fn new(item: InventoryItem, ingredient: Ingredient) -> Self {
        debug_assert_eq!(item.ingredient_id, ingredient.id);
        Self { item, ingredient }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDraft {
    pub ingredient: IngredientRef,
    pub quantity: f32,
    pub unit: String,
    pub expiry_date: Option<chrono::NaiveDate>,
}

impl InventoryDraft {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.ingredient.validate()?;
        validate_amount(self.quantity, &self.unit)
    }
}

pub fn add_to_inventory(
    conn: &mut database::Connection,
    owner: UserId,
    draft: &InventoryDraft,
) -> Result<InventoryItem> {
    draft.validate()?;
    let ingredient_id = draft.ingredient.resolve(conn)?;
    query::insert_inventory_item(
        conn,
        owner,
        ingredient_id,
        draft.quantity,
        draft.unit.trim(),
        draft.expiry_date,
    )
}

/// Deletes one of `owner`'s inventory items outright.
pub fn remove_from_inventory(
    conn: &mut database::Connection,
    owner: UserId,
    item_id: InventoryItemId,
) -> Result<()> {
    let item = query::get_inventory_item(conn, owner, item_id)?;
    query::delete_inventory_item(conn, item.id)?;
    log::info!("removed inventory item {item_id} of user {owner}");
    Ok(())
}

/// What to do with an inventory item whose quantity would drop to zero or below.
#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EmptyStockPolicy {
    /// Leave the item untouched.
    #[default]
    #[display("ignore")]
    Ignore,
    /// Delete the item.
    #[display("remove")]
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    Updated(f32),
    Unchanged,
    Removed,
}

/// Changes the quantity of one of `owner`'s inventory items by `delta`.
pub fn adjust_quantity(
    conn: &mut database::Connection,
    owner: UserId,
    item_id: InventoryItemId,
    delta: f32,
    policy: EmptyStockPolicy,
) -> Result<Adjustment> {
    let item = query::get_inventory_item(conn, owner, item_id)?;
    if !delta.is_finite() {
        log::warn!("ignoring quantity change of {delta} for inventory item {item_id}");
        return Ok(Adjustment::Unchanged);
    }

    let new_quantity = item.quantity + delta;
    if new_quantity > 0.0 {
        query::update_inventory_quantity(conn, item_id, new_quantity)?;
        return Ok(Adjustment::Updated(new_quantity));
    }

    match policy {
        EmptyStockPolicy::Ignore => {
            log::info!("inventory item {item_id} would run out, leaving it at {}", item.quantity);
            Ok(Adjustment::Unchanged)
        }
        EmptyStockPolicy::Remove => {
            query::delete_inventory_item(conn, item_id)?;
            log::info!("inventory item {item_id} ran out and was removed");
            Ok(Adjustment::Removed)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::database::models::{IngredientCategory, User};
    use crate::recipes::test::test_user;
    use crate::Error;

    fn stock(conn: &mut database::Connection, user: &User, name: &str, quantity: f32) -> InventoryItem {
        add_to_inventory(
            conn,
            user.id,
            &InventoryDraft {
                ingredient: IngredientRef::New(name.into()),
                quantity,
                unit: "pieces".into(),
                expiry_date: None,
            },
        )
        .unwrap()
    }

    fn quantities(conn: &mut database::Connection, user: &User) -> Vec<f32> {
        query::inventory_entries(conn, user.id)
            .unwrap()
            .into_iter()
            .map(|e| e.item.quantity)
            .collect()
    }

    #[test]
    fn add_and_list() {
        let mut conn = database::test_connection();
        let user = test_user(&mut conn, "cook@example.com");
        let flour = query::insert_ingredient(&mut conn, "Flour", IngredientCategory::Grain).unwrap();

        add_to_inventory(
            &mut conn,
            user.id,
            &InventoryDraft {
                ingredient: IngredientRef::Existing(flour.id),
                quantity: 2.5,
                unit: " cups ".into(),
                expiry_date: chrono::NaiveDate::from_ymd_opt(2030, 1, 1),
            },
        )
        .unwrap();
        stock(&mut conn, &user, "Butter", 1.0);

        let entries = query::inventory_entries(&mut conn, user.id).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.ingredient.name.as_str()).collect();
        assert_eq!(names, ["Butter", "Flour"]);
        assert_eq!(entries[1].item.unit, "cups");
        assert_eq!(entries[1].ingredient.category, IngredientCategory::Grain);
        assert_eq!(entries[0].ingredient.category, IngredientCategory::Other);
    }

    #[test]
    fn add_rejects_bad_input() {
        let mut conn = database::test_connection();
        let user = test_user(&mut conn, "cook@example.com");

        let mut draft = InventoryDraft {
            ingredient: IngredientRef::New("Rice".into()),
            quantity: -1.0,
            unit: "cups".into(),
            expiry_date: None,
        };
        assert!(matches!(
            add_to_inventory(&mut conn, user.id, &draft),
            Err(Error::Validation(ValidationError::NonPositiveQuantity))
        ));

        draft.quantity = 1.0;
        draft.unit = "  ".into();
        assert!(matches!(
            add_to_inventory(&mut conn, user.id, &draft),
            Err(Error::Validation(ValidationError::BlankUnit))
        ));

        assert!(query::all_ingredients(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn increase_persists() {
        let mut conn = database::test_connection();
        let user = test_user(&mut conn, "cook@example.com");
        let item = stock(&mut conn, &user, "Egg", 2.0);

        let result = adjust_quantity(&mut conn, user.id, item.id, 1.0, Default::default()).unwrap();
        assert_eq!(result, Adjustment::Updated(3.0));
        assert_eq!(quantities(&mut conn, &user), [3.0]);

        let result = adjust_quantity(&mut conn, user.id, item.id, -2.0, Default::default()).unwrap();
        assert_eq!(result, Adjustment::Updated(1.0));
        assert_eq!(quantities(&mut conn, &user), [1.0]);
    }

    #[test]
    fn running_out_is_ignored_by_default() {
        let mut conn = database::test_connection();
        let user = test_user(&mut conn, "cook@example.com");
        let item = stock(&mut conn, &user, "Egg", 1.0);

        for delta in [-1.0, -5.0] {
            let result =
                adjust_quantity(&mut conn, user.id, item.id, delta, EmptyStockPolicy::Ignore)
                    .unwrap();
            assert_eq!(result, Adjustment::Unchanged);
            assert_eq!(quantities(&mut conn, &user), [1.0]);
        }
    }

    #[test]
    fn running_out_can_remove() {
        let mut conn = database::test_connection();
        let user = test_user(&mut conn, "cook@example.com");
        let item = stock(&mut conn, &user, "Egg", 1.0);

        let result =
            adjust_quantity(&mut conn, user.id, item.id, -1.0, EmptyStockPolicy::Remove).unwrap();
        assert_eq!(result, Adjustment::Removed);
        assert!(quantities(&mut conn, &user).is_empty());
    }

    #[test]
    fn cannot_adjust_other_users_items() {
        let mut conn = database::test_connection();
        let alice = test_user(&mut conn, "alice@example.com");
        let bob = test_user(&mut conn, "bob@example.com");
        let item = stock(&mut conn, &alice, "Egg", 1.0);

        assert!(matches!(
            adjust_quantity(&mut conn, bob.id, item.id, 1.0, Default::default()),
            Err(Error::NotFound("inventory item"))
        ));
        assert_eq!(quantities(&mut conn, &alice), [1.0]);
    }

    #[test]
    fn remove_deletes_only_own_items() {
        let mut conn = database::test_connection();
        let alice = test_user(&mut conn, "alice@example.com");
        let bob = test_user(&mut conn, "bob@example.com");
        let egg = stock(&mut conn, &alice, "Egg", 1.0);
        stock(&mut conn, &alice, "Milk", 2.0);

        assert!(matches!(
            remove_from_inventory(&mut conn, bob.id, egg.id),
            Err(Error::NotFound("inventory item"))
        ));
        assert_eq!(quantities(&mut conn, &alice), [1.0, 2.0]);

        remove_from_inventory(&mut conn, alice.id, egg.id).unwrap();
        assert_eq!(quantities(&mut conn, &alice), [2.0]);
        assert!(matches!(
            remove_from_inventory(&mut conn, alice.id, egg.id),
            Err(Error::NotFound("inventory item"))
        ));
    }
}
