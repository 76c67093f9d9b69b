use super::search::{self, SearchWidget};
use super::{new_error_toast, new_info_toast, new_success_toast, report};
use crate::database::models::{Ingredient, InventoryItemId, UserId};
use crate::database::{self, query};
use crate::inventory::{self, Adjustment, InventoryDraft, InventoryEntry};
use crate::recipes::IngredientRef;
use crate::{Config, Result};
use eframe::egui;

pub enum UpdateEvent {
    Closed,
    Changed,
}

enum EntryAction {
    Adjust(InventoryItemId, f32),
    Remove(InventoryItemId),
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

struct AddForm {
    ingredient_name: String,
    ingredient: Option<Ingredient>,
    cached_ingredient_search: Option<search::CachedQuery<Ingredient>>,
    quantity: String,
    unit: String,
    has_expiry: bool,
    expiry_date: chrono::NaiveDate,
}

impl AddForm {
    fn new() -> Self {
        Self {
            ingredient_name: String::new(),
            ingredient: None,
            cached_ingredient_search: None,
            quantity: "1".into(),
            unit: String::new(),
            has_expiry: false,
            expiry_date: today(),
        }
    }

    fn draft(&self) -> Result<InventoryDraft> {
        let quantity = self
            .quantity
            .trim()
            .parse()
            .map_err(|_| crate::ValidationError::NonPositiveQuantity)?;
        let ingredient = match &self.ingredient {
            Some(i) => IngredientRef::Existing(i.id),
            None => IngredientRef::New(self.ingredient_name.trim().into()),
        };
        Ok(InventoryDraft {
            ingredient,
            quantity,
            unit: self.unit.clone(),
            expiry_date: self.has_expiry.then_some(self.expiry_date),
        })
    }

    /// Returns true when the add button was pressed.
    fn update(&mut self, conn: &mut database::Connection, ui: &mut egui::Ui) -> bool {
        let mut add = false;
        egui::Grid::new("add to inventory").show(ui, |ui| {
            ui.label("Ingredient:");
            ui.add(
                SearchWidget::new(
                    "inventory ingredient",
                    &mut self.ingredient_name,
                    &mut self.ingredient,
                    |query| search::search_ingredients(conn, &mut self.cached_ingredient_search, query),
                )
                .hint_text("Enter ingredient name"),
            );
            ui.end_row();

            ui.label("Quantity:");
            ui.horizontal(|ui| {
                ui.add(egui::TextEdit::singleline(&mut self.quantity).desired_width(50.0));
                ui.add(
                    egui::TextEdit::singleline(&mut self.unit)
                        .hint_text("e.g., cups, grams")
                        .desired_width(100.0),
                );
            });
            ui.end_row();

            ui.label("Expires:");
            ui.horizontal(|ui| {
                ui.checkbox(&mut self.has_expiry, "");
                if self.has_expiry {
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut self.expiry_date)
                            .id_salt("inventory expiry date"),
                    );
                }
            });
            ui.end_row();
        });
        if ui.button("Add to Inventory").clicked() {
            add = true;
        }
        add
    }
}

pub struct InventoryWindow {
    user: UserId,
    entries: Vec<InventoryEntry>,
    add_form: Option<AddForm>,
}

impl InventoryWindow {
    pub fn new(conn: &mut database::Connection, user: UserId) -> Result<Self> {
        Ok(Self {
            user,
            entries: query::inventory_entries(conn, user)?,
            add_form: None,
        })
    }

    fn refresh(&mut self, conn: &mut database::Connection) -> Result<()> {
        self.entries = query::inventory_entries(conn, self.user)?;
        Ok(())
    }

    fn adjust(
        &mut self,
        conn: &mut database::Connection,
        config: &Config,
        toasts: &mut egui_toast::Toasts,
        item_id: InventoryItemId,
        delta: f32,
    ) -> bool {
        let adjusted =
            inventory::adjust_quantity(conn, self.user, item_id, delta, config.empty_stock_policy);
        match report(toasts, adjusted) {
            Some(Adjustment::Updated(_)) | Some(Adjustment::Removed) => {
                report(toasts, self.refresh(conn));
                true
            }
            Some(Adjustment::Unchanged) => {
                toasts.add(new_info_toast(
                    "Quantity can't go below zero, use Remove to take the item out",
                ));
                false
            }
            None => false,
        }
    }

    fn remove(
        &mut self,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
        item_id: InventoryItemId,
    ) -> bool {
        let removed = inventory::remove_from_inventory(conn, self.user, item_id);
        if report(toasts, removed).is_none() {
            return false;
        }
        report(toasts, self.refresh(conn));
        true
    }

    fn add(&mut self, conn: &mut database::Connection, toasts: &mut egui_toast::Toasts) -> bool {
        let Some(form) = &self.add_form else {
            return false;
        };
        let added = form
            .draft()
            .and_then(|draft| inventory::add_to_inventory(conn, self.user, &draft));
        match added {
            Ok(_) => {
                toasts.add(new_success_toast("Added to inventory"));
                self.add_form = None;
                report(toasts, self.refresh(conn));
                true
            }
            Err(error) => {
                toasts.add(new_error_toast(error.to_string()));
                false
            }
        }
    }

    fn update_entries(ui: &mut egui::Ui, entries: &[InventoryEntry]) -> Option<EntryAction> {
        let today = today();
        let mut action = None;
        egui::Grid::new("inventory grid").striped(true).show(ui, |ui| {
            ui.strong("Ingredient");
            ui.strong("Category");
            ui.strong("Quantity");
            ui.strong("Expires");
            ui.end_row();

            for InventoryEntry { item, ingredient } in entries {
                ui.label(&ingredient.name);
                ui.label(ingredient.category.to_string());
                ui.horizontal(|ui| {
                    if ui.small_button("-").clicked() {
                        action = Some(EntryAction::Adjust(item.id, -1.0));
                    }
                    ui.label(format!("{} {}", item.quantity, item.unit));
                    if ui.small_button("+").clicked() {
                        action = Some(EntryAction::Adjust(item.id, 1.0));
                    }
                });
                match item.expiry_date {
                    Some(date) if item.is_expired(today) => {
                        ui.colored_label(
                            ui.visuals().error_fg_color,
                            format!("{} (expired)", date.format("%Y-%m-%d")),
                        );
                    }
                    Some(date) => {
                        ui.label(date.format("%Y-%m-%d").to_string());
                    }
                    None => {
                        ui.label("");
                    }
                }
                if ui.button("Remove").clicked() {
                    action = Some(EntryAction::Remove(item.id));
                }
                ui.end_row();
            }
        });
        if entries.is_empty() {
            ui.label("Your inventory is empty");
        }
        action
    }

    pub fn update(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        config: &Config,
        toasts: &mut egui_toast::Toasts,
    ) -> Vec<UpdateEvent> {
        let mut events = vec![];
        let mut open = true;
        let mut action = None;
        let mut add = false;
        egui::Window::new("My Inventory")
            .open(&mut open)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(300.0)
                    .show(ui, |ui| {
                        action = Self::update_entries(ui, &self.entries);
                    });
                ui.separator();
                match &mut self.add_form {
                    Some(form) => {
                        add = form.update(conn, ui);
                        if ui.button("Cancel").clicked() {
                            self.add_form = None;
                        }
                    }
                    None => {
                        if ui.button("Add Ingredient").clicked() {
                            self.add_form = Some(AddForm::new());
                        }
                    }
                }
            });

        let changed = match action {
            Some(EntryAction::Adjust(item_id, delta)) => {
                self.adjust(conn, config, toasts, item_id, delta)
            }
            Some(EntryAction::Remove(item_id)) => self.remove(conn, toasts, item_id),
            None => false,
        };
        if changed {
            events.push(UpdateEvent::Changed);
        }
        if add && self.add(conn, toasts) {
            events.push(UpdateEvent::Changed);
        }
        if !open {
            events.push(UpdateEvent::Closed);
        }
        events
    }
}
