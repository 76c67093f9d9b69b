use crate::database::models::{RecipeId, UserId};
use crate::database::{self, query};
use crate::recipes::RecipeWithIngredients;
use crate::Result;
use eframe::egui;

pub struct RecipeWindow {
    recipe: RecipeWithIngredients,
}

impl RecipeWindow {
    pub fn new(conn: &mut database::Connection, user: UserId, recipe_id: RecipeId) -> Result<Self> {
        Ok(Self {
            recipe: query::get_recipe(conn, user, recipe_id)?,
        })
    }

    fn update_ingredients(&self, ui: &mut egui::Ui) {
        egui::Grid::new(("ingredient grid", self.recipe.recipe.id))
            .striped(true)
            .show(ui, |ui| {
                ui.strong("Name");
                ui.strong("Category");
                ui.strong("Quantity");
                ui.strong("Unit");
                ui.end_row();

                for required in &self.recipe.ingredients {
                    ui.label(&required.ingredient.name);
                    ui.label(required.ingredient.category.to_string());
                    ui.label(required.quantity.to_string());
                    ui.label(&required.unit);
                    ui.end_row();
                }
            });
    }

    /// Returns true when the window was closed.
    pub fn update(&mut self, ctx: &egui::Context) -> bool {
        let mut open = true;
        let recipe = &self.recipe.recipe;
        egui::Window::new(recipe.name.clone())
            .id(egui::Id::new(("recipe", recipe.id)))
            .open(&mut open)
            .show(ctx, |ui| {
                if !recipe.description.is_empty() {
                    ui.label(&recipe.description);
                    ui.separator();
                }
                self.update_ingredients(ui);
                ui.separator();
                ui.strong("Instructions");
                ui.label(&recipe.instructions);
                ui.separator();
                ui.small(format!("Added {}", recipe.created_at.format("%Y-%m-%d")));
            });

        !open
    }
}
