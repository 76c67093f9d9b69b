use super::{recipe::RecipeWindow, report};
use crate::database::models::{RecipeHandle, RecipeId, UserId};
use crate::database::{self, query};
use crate::Result;
use eframe::egui;
use std::collections::HashMap;

pub enum UpdateEvent {
    Closed,
    NewRecipe,
    OpenRecipe(RecipeId),
    Deleted(RecipeId),
}

pub struct RecipeListWindow {
    user: UserId,
    recipes: Vec<RecipeHandle>,
    edit_mode: bool,
}

impl RecipeListWindow {
    pub fn new(conn: &mut database::Connection, user: UserId) -> Result<Self> {
        Ok(Self {
            user,
            recipes: query::user_recipes(conn, user)?,
            edit_mode: false,
        })
    }

    pub fn refresh(&mut self, conn: &mut database::Connection) -> Result<()> {
        self.recipes = query::user_recipes(conn, self.user)?;
        Ok(())
    }

    pub fn update(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
        recipe_windows: &mut HashMap<RecipeId, RecipeWindow>,
    ) -> Vec<UpdateEvent> {
        let mut events = vec![];
        let mut open = true;
        egui::Window::new("My Recipes")
            .open(&mut open)
            .show(ctx, |ui| {
                let scroll_height = ui.available_height() - 35.0;
                egui::ScrollArea::vertical()
                    .auto_shrink(false)
                    .max_height(scroll_height)
                    .show(ui, |ui| {
                        egui::Grid::new("recipe list grid").show(ui, |ui| {
                            for RecipeHandle { name, id } in &self.recipes {
                                let mut shown = recipe_windows.contains_key(id);
                                ui.toggle_value(&mut shown, name.clone());

                                if self.edit_mode && ui.button("Delete").clicked() {
                                    let deleted = query::delete_recipe(conn, self.user, *id);
                                    if report(toasts, deleted).is_some() {
                                        events.push(UpdateEvent::Deleted(*id));
                                    }
                                    shown = false;
                                }
                                ui.end_row();

                                if shown && !recipe_windows.contains_key(id) {
                                    events.push(UpdateEvent::OpenRecipe(*id));
                                } else if !shown {
                                    recipe_windows.remove(id);
                                }
                            }
                            if self.recipes.is_empty() {
                                ui.label("No recipes yet");
                                ui.end_row();
                            }
                        });
                    });
                ui.separator();
                ui.horizontal(|ui| {
                    ui.toggle_value(&mut self.edit_mode, "Edit");
                    if ui.button("New Recipe").clicked() {
                        events.push(UpdateEvent::NewRecipe);
                    }
                });
            });

        if events.iter().any(|e| matches!(e, UpdateEvent::Deleted(_))) {
            report(toasts, self.refresh(conn));
        }
        if !open {
            events.push(UpdateEvent::Closed);
        }
        events
    }
}
