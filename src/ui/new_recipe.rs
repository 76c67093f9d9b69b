use super::search::{self, SearchWidget};
use super::{new_error_toast, new_success_toast, report};
use crate::database::models::{Ingredient, RecipeId, UserId};
use crate::database;
use crate::error::ValidationError;
use crate::recipes::{self, DraftIngredient, IngredientRef, RecipeDraft};
use crate::seed;
use eframe::egui;

pub enum UpdateEvent {
    Closed,
    Created(RecipeId),
    Seeded,
}

pub struct NewRecipeWindow {
    user: UserId,
    draft: RecipeDraft,
    ingredient_names: Vec<String>,

    new_ingredient_name: String,
    new_ingredient: Option<Ingredient>,
    cached_ingredient_search: Option<search::CachedQuery<Ingredient>>,
    quantity: String,
    unit: String,
}

impl NewRecipeWindow {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            draft: RecipeDraft::default(),
            ingredient_names: vec![],

            new_ingredient_name: String::new(),
            new_ingredient: None,
            cached_ingredient_search: None,
            quantity: "1".into(),
            unit: String::new(),
        }
    }

    fn add_ingredient(&mut self) -> std::result::Result<(), ValidationError> {
        let quantity = self
            .quantity
            .trim()
            .parse()
            .map_err(|_| ValidationError::NonPositiveQuantity)?;
        let (ingredient, name) = match &self.new_ingredient {
            Some(i) => (IngredientRef::Existing(i.id), i.name.clone()),
            None => {
                let name = self.new_ingredient_name.trim().to_owned();
                (IngredientRef::New(name.clone()), name)
            }
        };
        let entry = DraftIngredient {
            ingredient,
            quantity,
            unit: self.unit.trim().into(),
        };
        entry.validate()?;

        self.draft.ingredients.push(entry);
        self.ingredient_names.push(name);
        self.new_ingredient_name.clear();
        self.new_ingredient = None;
        self.quantity = "1".into();
        self.unit.clear();
        Ok(())
    }

    fn remove_ingredient(&mut self, index: usize) {
        self.draft.ingredients.remove(index);
        self.ingredient_names.remove(index);
    }

    fn update_ingredients(
        &mut self,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
        ui: &mut egui::Ui,
    ) {
        let mut to_remove = None;
        egui::Grid::new("new recipe ingredients").show(ui, |ui| {
            for (i, (entry, name)) in self
                .draft
                .ingredients
                .iter()
                .zip(&self.ingredient_names)
                .enumerate()
            {
                ui.label(name);
                ui.label(format!("{} {}", entry.quantity, entry.unit));
                if ui.button("Remove").clicked() {
                    to_remove = Some(i);
                }
                ui.end_row();
            }
        });
        if let Some(i) = to_remove {
            self.remove_ingredient(i);
        }

        let mut add = false;
        ui.horizontal(|ui| {
            ui.add(
                SearchWidget::new(
                    "new recipe ingredient",
                    &mut self.new_ingredient_name,
                    &mut self.new_ingredient,
                    |query| {
                        search::search_ingredients(conn, &mut self.cached_ingredient_search, query)
                    },
                )
                .hint_text("Enter ingredient name")
                .desired_width(150.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.quantity)
                    .hint_text("quantity")
                    .desired_width(50.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.unit)
                    .hint_text("e.g., cups, grams")
                    .desired_width(100.0),
            );
            add = ui.button("Add").clicked();
        });
        if add {
            if let Err(error) = self.add_ingredient() {
                toasts.add(new_error_toast(error.to_string()));
            }
        }
    }

    pub fn update(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
    ) -> Vec<UpdateEvent> {
        let mut events = vec![];
        let mut open = true;
        let mut save = false;
        let mut seed = false;
        egui::Window::new("New Recipe")
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("new recipe fields").show(ui, |ui| {
                    ui.label("Name:");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.draft.name)
                            .hint_text("Enter recipe name"),
                    );
                    ui.end_row();

                    ui.label("Description:");
                    ui.add(
                        egui::TextEdit::multiline(&mut self.draft.description)
                            .desired_rows(2)
                            .hint_text("Brief description of the recipe"),
                    );
                    ui.end_row();

                    ui.label("Instructions:");
                    ui.add(
                        egui::TextEdit::multiline(&mut self.draft.instructions)
                            .hint_text("Step-by-step cooking instructions"),
                    );
                    ui.end_row();
                });
                ui.separator();
                ui.strong("Ingredients");
                self.update_ingredients(conn, toasts, ui);
                ui.separator();
                ui.horizontal(|ui| {
                    save = ui.button("Save Recipe").clicked();
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        seed = ui.button("Add Sample Recipes").clicked();
                    });
                });
            });

        if save {
            let created = recipes::create_recipe(conn, self.user, &self.draft);
            if let Some(recipe) = report(toasts, created) {
                toasts.add(new_success_toast(format!("Saved {}", recipe.name)));
                events.push(UpdateEvent::Created(recipe.id));
            }
        }
        if seed {
            if let Some(r) = report(toasts, seed::seed_sample_data(conn, self.user)) {
                toasts.add(new_success_toast(format!(
                    "Added {} sample recipes and {} ingredients",
                    r.recipes_added, r.ingredients_added
                )));
                events.push(UpdateEvent::Seeded);
            }
        }
        if !open {
            events.push(UpdateEvent::Closed);
        }
        events
    }
}
