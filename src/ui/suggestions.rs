use super::report;
use crate::database::models::{RecipeId, UserId};
use crate::database;
use crate::suggest::{self, ScoredRecipe};
use crate::Result;
use eframe::egui;

pub enum UpdateEvent {
    Closed,
    OpenRecipe(RecipeId),
}

fn badge_color(match_percentage: u8) -> egui::Color32 {
    if match_percentage >= 80 {
        egui::Color32::from_rgb(0x2e, 0x9e, 0x4f)
    } else if match_percentage >= 60 {
        egui::Color32::from_rgb(0xd4, 0xa0, 0x17)
    } else {
        egui::Color32::from_rgb(0xc8, 0x3c, 0x3c)
    }
}

pub struct SuggestionsWindow {
    user: UserId,
    suggestions: Vec<ScoredRecipe>,
}

impl SuggestionsWindow {
    pub fn new(conn: &mut database::Connection, user: UserId) -> Result<Self> {
        Ok(Self {
            user,
            suggestions: suggest::suggest(conn, user)?,
        })
    }

    pub fn refresh(&mut self, conn: &mut database::Connection) -> Result<()> {
        self.suggestions = suggest::suggest(conn, self.user)?;
        Ok(())
    }

    fn update_suggestion(ui: &mut egui::Ui, scored: &ScoredRecipe, events: &mut Vec<UpdateEvent>) {
        let recipe = &scored.recipe.recipe;
        ui.horizontal(|ui| {
            ui.strong(&recipe.name);
            ui.label(
                egui::RichText::new(format!("{}% match", scored.match_percentage))
                    .color(egui::Color32::WHITE)
                    .background_color(badge_color(scored.match_percentage)),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Open").clicked() {
                    events.push(UpdateEvent::OpenRecipe(recipe.id));
                }
            });
        });
        if !recipe.description.is_empty() {
            ui.label(&recipe.description);
        }
        if !scored.missing_ingredients.is_empty() {
            let missing: Vec<_> = scored
                .missing_ingredients
                .iter()
                .map(|i| i.ingredient.name.as_str())
                .collect();
            ui.small(format!("Missing: {}", missing.join(", ")));
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
        let mut refresh = false;
        egui::Window::new("Recipe Suggestions")
            .open(&mut open)
            .show(ctx, |ui| {
                let scroll_height = ui.available_height() - 35.0;
                egui::ScrollArea::vertical()
                    .auto_shrink(false)
                    .max_height(scroll_height)
                    .show(ui, |ui| {
                        for scored in &self.suggestions {
                            Self::update_suggestion(ui, scored, &mut events);
                            ui.separator();
                        }
                        if self.suggestions.is_empty() {
                            ui.label(
                                "No suggestions yet. Add some recipes and stock your \
                                inventory to see what you can cook.",
                            );
                        }
                    });
                ui.separator();
                refresh = ui.button("Refresh").clicked();
            });

        if refresh {
            report(toasts, self.refresh(conn));
        }
        if !open {
            events.push(UpdateEvent::Closed);
        }
        events
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn badge_thresholds() {
        assert_eq!(badge_color(100), badge_color(80));
        assert_eq!(badge_color(79), badge_color(60));
        assert_eq!(badge_color(59), badge_color(1));
        assert_ne!(badge_color(80), badge_color(79));
        assert_ne!(badge_color(60), badge_color(59));
    }
}
