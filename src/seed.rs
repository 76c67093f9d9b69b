// Copyright 2023 Remi Bernotavicius

use crate::database::models::{IngredientCategory, UserId};
use crate::database::{self, query};
use crate::Result;
use diesel::Connection as _;

const COMMON_INGREDIENTS: &[(&str, IngredientCategory)] = &[
    ("Tomato", IngredientCategory::Vegetable),
    ("Onion", IngredientCategory::Vegetable),
    ("Garlic", IngredientCategory::Vegetable),
    ("Olive Oil", IngredientCategory::Oil),
    ("Salt", IngredientCategory::Spice),
    ("Black Pepper", IngredientCategory::Spice),
    ("Chicken Breast", IngredientCategory::Meat),
    ("Rice", IngredientCategory::Grain),
    ("Pasta", IngredientCategory::Grain),
    ("Egg", IngredientCategory::Dairy),
    ("Milk", IngredientCategory::Dairy),
    ("Cheese", IngredientCategory::Dairy),
    ("Flour", IngredientCategory::Grain),
    ("Butter", IngredientCategory::Dairy),
    ("Lemon", IngredientCategory::Fruit),
    ("Basil", IngredientCategory::Herb),
    ("Oregano", IngredientCategory::Herb),
    ("Chili Powder", IngredientCategory::Spice),
    ("Cumin", IngredientCategory::Spice),
    ("Bell Pepper", IngredientCategory::Vegetable),
];

struct SampleRecipe {
    name: &'static str,
    description: &'static str,
    instructions: &'static str,
    ingredients: &'static [(&'static str, f32, &'static str)],
}

const SAMPLE_RECIPES: &[SampleRecipe] = &[
    SampleRecipe {
        name: "Simple Pasta Carbonara",
        description: "A classic Italian pasta dish with eggs, cheese, and pancetta",
        instructions: "1. Cook pasta according to package instructions\n\
            2. In a pan, cook pancetta until crispy\n\
            3. Beat eggs with grated cheese\n\
            4. Drain pasta and immediately mix with egg mixture\n\
            5. Add pancetta and season with black pepper\n\
            6. Serve immediately while hot",
        ingredients: &[
            ("Pasta", 1.0, "pound"),
            ("Egg", 4.0, "pieces"),
            ("Cheese", 1.0, "cup"),
            ("Black Pepper", 1.0, "teaspoon"),
        ],
    },
    SampleRecipe {
        name: "Chicken Stir Fry",
        description: "Quick and healthy chicken stir fry with vegetables",
        instructions: "1. Cut chicken into bite-sized pieces\n\
            2. Heat oil in a wok or large pan\n\
            3. Cook chicken until golden brown\n\
            4. Add vegetables and stir fry for 3-4 minutes\n\
            5. Add soy sauce and seasonings\n\
            6. Serve hot with rice",
        ingredients: &[
            ("Chicken Breast", 2.0, "pieces"),
            ("Bell Pepper", 2.0, "pieces"),
            ("Onion", 1.0, "piece"),
            ("Garlic", 3.0, "cloves"),
            ("Olive Oil", 2.0, "tablespoons"),
        ],
    },
    SampleRecipe {
        name: "Tomato Basil Soup",
        description: "Creamy tomato soup with fresh basil",
        instructions: "1. Sauté onions and garlic in olive oil\n\
            2. Add tomatoes and cook until soft\n\
            3. Add broth and bring to boil\n\
            4. Simmer for 20 minutes\n\
            5. Blend until smooth\n\
            6. Add cream and basil, season to taste",
        ingredients: &[
            ("Tomato", 6.0, "pieces"),
            ("Onion", 1.0, "piece"),
            ("Garlic", 2.0, "cloves"),
            ("Basil", 1.0, "cup"),
            ("Olive Oil", 2.0, "tablespoons"),
        ],
    },
    SampleRecipe {
        name: "Classic Margherita Pizza",
        description: "Traditional Italian pizza with tomato sauce and mozzarella",
        instructions: "1. Prepare pizza dough and let it rise\n\
            2. Roll out dough and add tomato sauce\n\
            3. Add fresh mozzarella and basil leaves\n\
            4. Bake in hot oven until crust is golden\n\
            5. Drizzle with olive oil and serve",
        ingredients: &[
            ("Flour", 3.0, "cups"),
            ("Tomato", 4.0, "pieces"),
            ("Cheese", 2.0, "cups"),
            ("Basil", 1.0, "cup"),
            ("Olive Oil", 3.0, "tablespoons"),
        ],
    },
    SampleRecipe {
        name: "Lemon Garlic Shrimp",
        description: "Quick and flavorful shrimp with lemon and garlic",
        instructions: "1. Clean and devein shrimp\n\
            2. Heat olive oil in a pan\n\
            3. Add minced garlic and cook until fragrant\n\
            4. Add shrimp and cook for 2-3 minutes per side\n\
            5. Add lemon juice and zest\n\
            6. Season with salt and pepper",
        ingredients: &[
            ("Shrimp", 1.0, "pound"),
            ("Lemon", 2.0, "pieces"),
            ("Garlic", 4.0, "cloves"),
            ("Olive Oil", 3.0, "tablespoons"),
            ("Black Pepper", 1.0, "teaspoon"),
        ],
    },
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub ingredients_added: usize,
    pub recipes_added: usize,
}

/// Adds the common ingredients that are not in the catalogue yet, then gives `owner` a copy of
/// each sample recipe. Sample ingredients missing from the catalogue are left out of the recipe.
pub fn seed_sample_data(conn: &mut database::Connection, owner: UserId) -> Result<SeedReport> {
    conn.transaction(|conn| {
        let mut report = SeedReport::default();

        let before = query::all_ingredients(conn)?.len();
        for (name, category) in COMMON_INGREDIENTS {
            query::ensure_ingredient(conn, name, *category)?;
        }
        report.ingredients_added = query::all_ingredients(conn)?.len() - before;

        for sample in SAMPLE_RECIPES {
            let recipe = query::insert_recipe(
                conn,
                owner,
                sample.name,
                sample.description,
                sample.instructions,
            )?;
            for (name, quantity, unit) in sample.ingredients {
                let Some(ingredient) = query::find_ingredient_by_name(conn, name)? else {
                    log::warn!("sample ingredient {name:?} is not in the catalogue, skipping");
                    continue;
                };
                query::insert_recipe_ingredient(conn, recipe.id, ingredient.id, *quantity, unit)?;
            }
            report.recipes_added += 1;
        }

        log::info!(
            "seeded {} ingredients and {} recipes",
            report.ingredients_added,
            report.recipes_added
        );
        Ok(report)
    })
}
