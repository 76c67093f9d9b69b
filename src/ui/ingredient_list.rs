use super::{new_error_toast, new_info_toast, report};
use crate::database::models::{Ingredient, IngredientCategory};
use crate::database::{self, query};
use crate::Result;
use eframe::egui;

pub struct IngredientListWindow {
    all_ingredients: Vec<Ingredient>,
    edit_mode: bool,
    new_ingredient_name: String,
    new_ingredient_category: IngredientCategory,
}

impl IngredientListWindow {
    pub fn new(conn: &mut database::Connection) -> Result<Self> {
        Ok(Self {
            all_ingredients: query::all_ingredients(conn)?,
            edit_mode: false,
            new_ingredient_name: String::new(),
            new_ingredient_category: IngredientCategory::default(),
        })
    }

    fn add_ingredient(
        &mut self,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
    ) {
        let name = self.new_ingredient_name.trim();
        if name.is_empty() {
            toasts.add(new_error_toast("Ingredient name is required"));
            return;
        }
        if self
            .all_ingredients
            .iter()
            .any(|i| query::ingredient_name_key(&i.name) == query::ingredient_name_key(name))
        {
            toasts.add(new_info_toast(format!("{name} is already in the catalogue")));
            return;
        }
        let category = self.new_ingredient_category;
        if report(toasts, query::ensure_ingredient(conn, name, category)).is_some() {
            self.new_ingredient_name.clear();
            if let Some(all) = report(toasts, query::all_ingredients(conn)) {
                self.all_ingredients = all;
            }
        }
    }

    /// Returns true when the window was closed.
    pub fn update(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
    ) -> bool {
        let mut open = true;
        let mut add = false;
        egui::Window::new("Ingredients")
            .open(&mut open)
            .show(ctx, |ui| {
                let scroll_height = ui.available_height() - 35.0;
                egui::ScrollArea::vertical()
                    .auto_shrink(false)
                    .max_height(scroll_height)
                    .show(ui, |ui| {
                        egui::Grid::new("all ingredients").striped(true).show(ui, |ui| {
                            ui.strong("Name");
                            ui.strong("Category");
                            ui.end_row();

                            for ingredient in &self.all_ingredients {
                                ui.label(&ingredient.name);
                                ui.label(ingredient.category.to_string());
                                ui.end_row();
                            }
                        });
                    });
                ui.separator();
                ui.horizontal(|ui| {
                    ui.toggle_value(&mut self.edit_mode, "Edit");
                    if self.edit_mode {
                        ui.add(
                            egui::TextEdit::singleline(&mut self.new_ingredient_name)
                                .hint_text("Ingredient name")
                                .desired_width(ui.available_width() - 200.0),
                        );
                        egui::ComboBox::from_id_salt("new ingredient category")
                            .selected_text(self.new_ingredient_category.to_string())
                            .show_ui(ui, |ui| {
                                for category in IngredientCategory::iter() {
                                    ui.selectable_value(
                                        &mut self.new_ingredient_category,
                                        category,
                                        category.to_string(),
                                    );
                                }
                            });
                        add = ui.button("Add").clicked();
                    }
                });
            });

        if add {
            self.add_ingredient(conn, toasts);
        }
        !open
    }
}
