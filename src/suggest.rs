// Copyright 2023 Remi Bernotavicius

//! Ranks a user's recipes by how much of each they could cook from their inventory.

use crate::database::models::{IngredientId, UserId};
use crate::database::{self, query};
use crate::recipes::{RecipeWithIngredients, RequiredIngredient};
use crate::Result;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecipe {
    pub recipe: RecipeWithIngredients,
    /// Share of required ingredients on hand, 0 to 100.
    pub match_percentage: u8,
    /// Required ingredients not on hand, in recipe order.
    pub missing_ingredients: Vec<RequiredIngredient>,
}

/// `available / total` as a whole percentage, rounded to nearest. Zero when `total` is zero.
pub fn match_percentage(available: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let available = available.min(total);
    (available as f64 / total as f64 * 100.0).round() as u8
}

fn score(owned: &HashSet<IngredientId>, recipe: RecipeWithIngredients) -> ScoredRecipe {
    let total = recipe.ingredients.len();
    let missing_ingredients: Vec<_> = recipe
        .ingredients
        .iter()
        .filter(|i| !owned.contains(&i.ingredient_id()))
        .cloned()
        .collect();
    let available = total - missing_ingredients.len();
    ScoredRecipe {
        match_percentage: match_percentage(available, total),
        missing_ingredients,
        recipe,
    }
}

/// Scores every recipe against the `owned` ingredients, drops the ones with nothing on hand, and
/// orders the rest best match first. Equal scores keep their order from `recipes`.
pub fn rank(
    owned: &HashSet<IngredientId>,
    recipes: impl IntoIterator<Item = RecipeWithIngredients>,
) -> Vec<ScoredRecipe> {
    let mut scored: Vec<_> = recipes
        .into_iter()
        .map(|r| score(owned, r))
        .filter(|s| s.match_percentage > 0)
        .collect();
    scored.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
    scored
}

/// Recipe suggestions for `user`, best match first.
pub fn suggest(conn: &mut database::Connection, user: UserId) -> Result<Vec<ScoredRecipe>> {
    let owned = query::owned_ingredient_ids(conn, user)?;
    let recipes = query::user_recipes_with_ingredients(conn, user)?;
    let num_recipes = recipes.len();
    let suggestions = rank(&owned, recipes);
    log::debug!(
        "{} of {num_recipes} recipes suggested for user {user} with {} ingredients on hand",
        suggestions.len(),
        owned.len()
    );
    Ok(suggestions)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::database::models::{
        Ingredient, IngredientCategory, Recipe, RecipeId, RecipeIngredientId,
    };
    use crate::inventory::{add_to_inventory, InventoryDraft};
    use crate::recipes::test::{draft, test_user};
    use crate::recipes::{create_recipe, IngredientRef};
    use maplit::hashset;

    const TOMATO: i32 = 1;
    const GARLIC: i32 = 2;
    const ONION: i32 = 3;
    const BREAD: i32 = 4;
    const RICE: i32 = 5;

    fn ingredient(id: i32) -> Ingredient {
        let name = match id {
            TOMATO => "Tomato",
            GARLIC => "Garlic",
            ONION => "Onion",
            BREAD => "Bread",
            RICE => "Rice",
            _ => "Other",
        };
        Ingredient {
            id: IngredientId::for_test(id),
            name: name.into(),
            category: IngredientCategory::Other,
        }
    }

    fn recipe(id: i32, name: &str, ingredients: &[i32]) -> RecipeWithIngredients {
        RecipeWithIngredients {
            recipe: Recipe {
                id: RecipeId::for_test(id),
                user_id: UserId::for_test(1),
                name: name.into(),
                description: String::new(),
                instructions: String::new(),
                created_at: chrono::NaiveDateTime::default(),
            },
            ingredients: ingredients
                .iter()
                .enumerate()
                .map(|(n, i)| RequiredIngredient {
                    id: RecipeIngredientId::for_test(id * 100 + n as i32),
                    ingredient: ingredient(*i),
                    quantity: 1.0,
                    unit: "pieces".into(),
                })
                .collect(),
        }
    }

    fn owned(ids: HashSet<i32>) -> HashSet<IngredientId> {
        ids.into_iter().map(IngredientId::for_test).collect()
    }

    fn names(scored: &[ScoredRecipe]) -> Vec<&str> {
        scored.iter().map(|s| s.recipe.recipe.name.as_str()).collect()
    }

    fn missing(scored: &ScoredRecipe) -> Vec<&str> {
        scored
            .missing_ingredients
            .iter()
            .map(|i| i.ingredient.name.as_str())
            .collect()
    }

    #[test]
    fn percentages() {
        assert_eq!(match_percentage(0, 0), 0);
        assert_eq!(match_percentage(0, 3), 0);
        assert_eq!(match_percentage(1, 3), 33);
        assert_eq!(match_percentage(2, 3), 67);
        assert_eq!(match_percentage(1, 2), 50);
        assert_eq!(match_percentage(1, 8), 13);
        assert_eq!(match_percentage(3, 4), 75);
        assert_eq!(match_percentage(1, 1), 100);
        assert_eq!(match_percentage(1, 201), 0);
        assert_eq!(match_percentage(5, 3), 100);
    }

    #[test]
    fn percentages_stay_in_range() {
        for total in 1..=60 {
            let mut last = 0;
            for available in 0..=total {
                let p = match_percentage(available, total);
                assert!(p <= 100);
                assert!(p >= last, "{available}/{total}");
                last = p;
            }
            assert_eq!(last, 100);
        }
    }

    #[test]
    fn partial_match() {
        let scored = rank(
            &owned(hashset! {TOMATO, GARLIC}),
            [recipe(1, "Soup", &[TOMATO, GARLIC, ONION])],
        );
        assert_eq!(names(&scored), ["Soup"]);
        assert_eq!(scored[0].match_percentage, 67);
        assert_eq!(missing(&scored[0]), ["Onion"]);
    }

    #[test]
    fn recipe_without_ingredients_is_dropped() {
        let scored = rank(
            &owned(hashset! {TOMATO, GARLIC, ONION}),
            [recipe(1, "Empty", &[]), recipe(2, "Soup", &[TOMATO])],
        );
        assert_eq!(names(&scored), ["Soup"]);
    }

    #[test]
    fn no_overlap_is_dropped() {
        let scored = rank(
            &owned(hashset! {RICE}),
            [recipe(1, "Soup", &[TOMATO, GARLIC])],
        );
        assert!(scored.is_empty());

        assert!(rank(&HashSet::new(), [recipe(1, "Soup", &[TOMATO])]).is_empty());
        assert!(rank(&owned(hashset! {RICE}), Vec::new()).is_empty());
    }

    #[test]
    fn full_match() {
        let scored = rank(&owned(hashset! {BREAD}), [recipe(1, "Toast", &[BREAD])]);
        assert_eq!(scored[0].match_percentage, 100);
        assert!(scored[0].missing_ingredients.is_empty());
    }

    #[test]
    fn missing_keeps_recipe_order() {
        let scored = rank(
            &owned(hashset! {GARLIC}),
            [recipe(1, "Stew", &[ONION, GARLIC, TOMATO, RICE])],
        );
        assert_eq!(scored[0].match_percentage, 25);
        assert_eq!(missing(&scored[0]), ["Onion", "Tomato", "Rice"]);
    }

    #[test]
    fn best_match_first_and_ties_are_stable() {
        let recipes = [
            recipe(1, "Half", &[TOMATO, RICE]),
            recipe(2, "First 75", &[TOMATO, GARLIC, ONION, RICE]),
            recipe(3, "Toast", &[BREAD]),
            recipe(4, "Second 75", &[GARLIC, ONION, BREAD, RICE]),
        ];
        let scored = rank(&owned(hashset! {TOMATO, GARLIC, ONION, BREAD}), recipes);

        assert_eq!(names(&scored), ["Toast", "First 75", "Second 75", "Half"]);
        let percentages: Vec<_> = scored.iter().map(|s| s.match_percentage).collect();
        assert_eq!(percentages, [100, 75, 75, 50]);
        assert!(percentages.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn duplicate_entries_count_separately() {
        let scored = rank(
            &owned(hashset! {TOMATO}),
            [recipe(1, "Sauce", &[TOMATO, TOMATO, ONION])],
        );
        assert_eq!(scored[0].match_percentage, 67);
    }

    fn stock(conn: &mut database::Connection, user: UserId, name: &str) {
        add_to_inventory(
            conn,
            user,
            &InventoryDraft {
                ingredient: IngredientRef::New(name.into()),
                quantity: 1.0,
                unit: "pieces".into(),
                expiry_date: None,
            },
        )
        .unwrap();
    }

    #[test]
    fn suggest_from_database() {
        let mut conn = database::test_connection();
        let user = test_user(&mut conn, "cook@example.com").id;

        create_recipe(&mut conn, user, &draft("Soup", &["Tomato", "Garlic", "Onion"])).unwrap();
        create_recipe(&mut conn, user, &draft("Toast", &["Bread"])).unwrap();
        create_recipe(&mut conn, user, &draft("Pilaf", &["Rice", "Onion"])).unwrap();

        stock(&mut conn, user, "tomato");
        stock(&mut conn, user, "Garlic");
        stock(&mut conn, user, "Garlic");
        stock(&mut conn, user, "Bread");

        let scored = suggest(&mut conn, user).unwrap();
        assert_eq!(names(&scored), ["Toast", "Soup"]);
        assert_eq!(scored[1].match_percentage, 67);
        assert_eq!(missing(&scored[1]), ["Onion"]);

        let again = suggest(&mut conn, user).unwrap();
        assert_eq!(scored, again);
    }

    #[test]
    fn suggest_ties_are_newest_first() {
        let mut conn = database::test_connection();
        let user = test_user(&mut conn, "cook@example.com").id;

        let a = ["Tomato", "Garlic", "Onion", "Basil"];
        create_recipe(&mut conn, user, &draft("Bruschetta", &a)).unwrap();
        let b = ["Tomato", "Garlic", "Onion", "Rice"];
        create_recipe(&mut conn, user, &draft("Risotto", &b)).unwrap();
        create_recipe(&mut conn, user, &draft("Salsa", &["Tomato", "Pepper"])).unwrap();

        for name in ["Tomato", "Garlic", "Onion"] {
            stock(&mut conn, user, name);
        }

        let retrieved: Vec<_> = query::user_recipes(&mut conn, user)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(retrieved, ["Salsa", "Risotto", "Bruschetta"]);

        let with_ingredients: Vec<_> = query::user_recipes_with_ingredients(&mut conn, user)
            .unwrap()
            .into_iter()
            .map(|r| r.recipe.name)
            .collect();
        assert_eq!(with_ingredients, retrieved);

        let scored = suggest(&mut conn, user).unwrap();
        assert_eq!(names(&scored), ["Risotto", "Bruschetta", "Salsa"]);
        let percentages: Vec<_> = scored.iter().map(|s| s.match_percentage).collect();
        assert_eq!(percentages, [75, 75, 50]);
    }

    #[test]
    fn suggest_uses_only_own_data() {
        let mut conn = database::test_connection();
        let alice = test_user(&mut conn, "alice@example.com").id;
        let bob = test_user(&mut conn, "bob@example.com").id;

        create_recipe(&mut conn, alice, &draft("Soup", &["Tomato"])).unwrap();
        stock(&mut conn, bob, "Tomato");

        assert!(suggest(&mut conn, alice).unwrap().is_empty());
        assert!(suggest(&mut conn, bob).unwrap().is_empty());
    }

    #[test]
    fn suggest_with_no_recipes() {
        let mut conn = database::test_connection();
        let user = test_user(&mut conn, "cook@example.com").id;
        stock(&mut conn, user, "Tomato");
        assert!(suggest(&mut conn, user).unwrap().is_empty());
    }
}
