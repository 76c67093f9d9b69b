// Copyright 2023 Remi Bernotavicius

use crate::auth::Session;
use crate::database;
use crate::database::models::{RecipeId, UserId};
use crate::Config;
use eframe::egui;
use std::collections::HashMap;
use std::mem;

mod auth;
mod ingredient_list;
mod inventory;
mod new_recipe;
mod recipe;
mod recipe_list;
mod search;
mod suggestions;

use auth::AuthWindow;
use ingredient_list::IngredientListWindow;
use inventory::InventoryWindow;
use new_recipe::NewRecipeWindow;
use recipe::RecipeWindow;
use recipe_list::RecipeListWindow;
use suggestions::SuggestionsWindow;

fn new_toast(text: impl Into<egui::WidgetText>, kind: egui_toast::ToastKind) -> egui_toast::Toast {
    egui_toast::Toast {
        text: text.into(),
        kind,
        options: egui_toast::ToastOptions::default()
            .duration_in_seconds(3.0)
            .show_progress(false)
            .show_icon(true),
        ..Default::default()
    }
}

pub fn new_error_toast(text: impl Into<egui::WidgetText>) -> egui_toast::Toast {
    new_toast(text, egui_toast::ToastKind::Error)
}

pub fn new_info_toast(text: impl Into<egui::WidgetText>) -> egui_toast::Toast {
    new_toast(text, egui_toast::ToastKind::Info)
}

pub fn new_success_toast(text: impl Into<egui::WidgetText>) -> egui_toast::Toast {
    new_toast(text, egui_toast::ToastKind::Success)
}

/// Shows the error of a failed action to the user. The action's earlier state is kept as is.
pub fn report<T>(toasts: &mut egui_toast::Toasts, result: crate::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(error) => {
            log::warn!("{error}");
            toasts.add(new_error_toast(error.to_string()));
            None
        }
    }
}

/// Windows that only make sense while someone is signed in.
struct UserWindows {
    user: UserId,
    suggestions: Option<SuggestionsWindow>,
    recipe_list: Option<RecipeListWindow>,
    recipes: HashMap<RecipeId, RecipeWindow>,
    new_recipe: Option<NewRecipeWindow>,
    inventory: Option<InventoryWindow>,
    ingredient_list: Option<IngredientListWindow>,
}

impl UserWindows {
    fn new(
        conn: &mut database::Connection,
        user: UserId,
        toasts: &mut egui_toast::Toasts,
    ) -> Self {
        Self {
            user,
            suggestions: report(toasts, SuggestionsWindow::new(conn, user)),
            recipe_list: None,
            recipes: Default::default(),
            new_recipe: None,
            inventory: None,
            ingredient_list: None,
        }
    }

    fn refresh_suggestions(&mut self, conn: &mut database::Connection, toasts: &mut egui_toast::Toasts) {
        if let Some(window) = &mut self.suggestions {
            report(toasts, window.refresh(conn));
        }
    }

    fn refresh_recipe_list(&mut self, conn: &mut database::Connection, toasts: &mut egui_toast::Toasts) {
        if let Some(window) = &mut self.recipe_list {
            report(toasts, window.refresh(conn));
        }
    }

    fn open_recipe(
        &mut self,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
        recipe_id: RecipeId,
    ) {
        if self.recipes.contains_key(&recipe_id) {
            return;
        }
        if let Some(window) = report(toasts, RecipeWindow::new(conn, self.user, recipe_id)) {
            self.recipes.insert(recipe_id, window);
        }
    }

    fn update_suggestions(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
    ) {
        let Some(window) = &mut self.suggestions else {
            return;
        };
        for event in window.update(ctx, conn, toasts) {
            match event {
                suggestions::UpdateEvent::Closed => self.suggestions = None,
                suggestions::UpdateEvent::OpenRecipe(id) => self.open_recipe(conn, toasts, id),
            }
        }
    }

    fn update_recipe_list(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
    ) {
        let Some(window) = &mut self.recipe_list else {
            return;
        };
        for event in window.update(ctx, conn, toasts, &mut self.recipes) {
            match event {
                recipe_list::UpdateEvent::Closed => self.recipe_list = None,
                recipe_list::UpdateEvent::NewRecipe => {
                    if self.new_recipe.is_none() {
                        self.new_recipe = Some(NewRecipeWindow::new(self.user));
                    }
                }
                recipe_list::UpdateEvent::Deleted(id) => {
                    self.recipes.remove(&id);
                    self.refresh_suggestions(conn, toasts);
                }
                recipe_list::UpdateEvent::OpenRecipe(id) => self.open_recipe(conn, toasts, id),
            }
        }
    }

    fn update_recipes(&mut self, ctx: &egui::Context) {
        for (id, mut recipe) in mem::take(&mut self.recipes) {
            let closed = recipe.update(ctx);
            if !closed {
                self.recipes.insert(id, recipe);
            }
        }
    }

    fn update_new_recipe(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
    ) {
        let Some(window) = &mut self.new_recipe else {
            return;
        };
        for event in window.update(ctx, conn, toasts) {
            match event {
                new_recipe::UpdateEvent::Closed => self.new_recipe = None,
                new_recipe::UpdateEvent::Created(id) => {
                    self.new_recipe = None;
                    self.refresh_recipe_list(conn, toasts);
                    self.refresh_suggestions(conn, toasts);
                    self.open_recipe(conn, toasts, id);
                }
                new_recipe::UpdateEvent::Seeded => {
                    self.refresh_recipe_list(conn, toasts);
                    self.refresh_suggestions(conn, toasts);
                }
            }
        }
    }

    fn update_inventory(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        config: &Config,
        toasts: &mut egui_toast::Toasts,
    ) {
        let Some(window) = &mut self.inventory else {
            return;
        };
        for event in window.update(ctx, conn, config, toasts) {
            match event {
                inventory::UpdateEvent::Closed => self.inventory = None,
                inventory::UpdateEvent::Changed => self.refresh_suggestions(conn, toasts),
            }
        }
    }

    fn update_ingredient_list(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
    ) {
        if let Some(window) = &mut self.ingredient_list {
            if window.update(ctx, conn, toasts) {
                self.ingredient_list = None;
            }
        }
    }

    fn update(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        config: &Config,
        toasts: &mut egui_toast::Toasts,
    ) {
        self.update_suggestions(ctx, conn, toasts);
        self.update_recipe_list(ctx, conn, toasts);
        self.update_recipes(ctx);
        self.update_new_recipe(ctx, conn, toasts);
        self.update_inventory(ctx, conn, config, toasts);
        self.update_ingredient_list(ctx, conn, toasts);
    }
}

pub struct KitchenManager {
    conn: database::Connection,
    config: Config,
    session: Session,
    toasts: egui_toast::Toasts,
    auth_window: AuthWindow,
    windows: Option<UserWindows>,
}

impl KitchenManager {
    pub fn new(conn: database::Connection, config: Config) -> Self {
        Self {
            conn,
            config,
            session: Session::new(),
            toasts: egui_toast::Toasts::new()
                .anchor(egui::Align2::RIGHT_BOTTOM, (-10.0, -10.0))
                .direction(egui::Direction::BottomUp),
            auth_window: AuthWindow::default(),
            windows: None,
        }
    }

    fn update_menu(&mut self, ctx: &egui::Context) {
        let Some(windows) = &mut self.windows else {
            return;
        };
        let conn = &mut self.conn;
        let toasts = &mut self.toasts;
        let mut sign_out = false;
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Kitchen", |ui| {
                    if ui.button("Suggestions").clicked() && windows.suggestions.is_none() {
                        windows.suggestions =
                            report(toasts, SuggestionsWindow::new(conn, windows.user));
                        ui.close_menu();
                    }
                    if ui.button("Recipes").clicked() && windows.recipe_list.is_none() {
                        windows.recipe_list =
                            report(toasts, RecipeListWindow::new(conn, windows.user));
                        ui.close_menu();
                    }
                    if ui.button("New Recipe").clicked() && windows.new_recipe.is_none() {
                        windows.new_recipe = Some(NewRecipeWindow::new(windows.user));
                        ui.close_menu();
                    }
                    if ui.button("Inventory").clicked() && windows.inventory.is_none() {
                        windows.inventory =
                            report(toasts, InventoryWindow::new(conn, windows.user));
                        ui.close_menu();
                    }
                    if ui.button("Ingredients").clicked() && windows.ingredient_list.is_none() {
                        windows.ingredient_list = report(toasts, IngredientListWindow::new(conn));
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Sign Out").clicked() {
                        sign_out = true;
                        ui.close_menu();
                    }
                });
                if let Some(user) = self.session.current_user() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(&user.email);
                    });
                }
            });
        });

        if sign_out {
            self.session.sign_out();
            self.windows = None;
        }
    }
}

impl eframe::App for KitchenManager {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.windows.is_none() {
            let signed_in =
                self.auth_window
                    .update(ctx, &mut self.conn, &mut self.session, &mut self.toasts);
            if let (true, Some(user)) = (signed_in, self.session.current_user()) {
                self.windows = Some(UserWindows::new(&mut self.conn, user.id, &mut self.toasts));
            }
        }

        self.update_menu(ctx);
        if let Some(windows) = &mut self.windows {
            windows.update(ctx, &mut self.conn, &self.config, &mut self.toasts);
        }
        self.toasts.show(ctx);
    }
}
