use crate::database::{self, models::Ingredient, query};
use eframe::egui;
use std::hash::Hash;

pub struct CachedQuery<IdT> {
    query: String,
    results: Vec<(IdT, String)>,
}

pub fn search_ingredients(
    conn: &mut database::Connection,
    cached_ingredient_search: &mut Option<CachedQuery<Ingredient>>,
    query: &str,
) -> Vec<(Ingredient, String)> {
    if let Some(cached) = cached_ingredient_search.as_ref() {
        if cached.query == query {
            return cached.results.clone();
        }
    }

    let result: Vec<_> = match query::search_ingredients(conn, query) {
        Ok(found) => found
            .into_iter()
            .map(|i| (i.clone(), i.name))
            .collect(),
        Err(error) => {
            log::warn!("ingredient search for {query:?} failed: {error}");
            vec![]
        }
    };

    *cached_ingredient_search = Some(CachedQuery {
        query: query.into(),
        results: result.clone(),
    });
    result
}

/// Text box with a popup of matches below it. `value` is set when the text names one of the
/// matches exactly, and cleared otherwise.
pub struct SearchWidget<'a, SearchFn, ValueT> {
    buf: &'a mut String,
    value: &'a mut Option<ValueT>,
    search_fn: SearchFn,
    pop_up_id: egui::Id,
    hint_text: Option<egui::WidgetText>,
    desired_width: Option<f32>,
}

impl<'a, SearchFn, ValueT> SearchWidget<'a, SearchFn, ValueT>
where
    SearchFn: FnOnce(&str) -> Vec<(ValueT, String)>,
{
    pub fn new(
        id_source: impl Hash,
        buf: &'a mut String,
        value: &'a mut Option<ValueT>,
        search_fn: SearchFn,
    ) -> Self {
        Self {
            buf,
            value,
            search_fn,
            pop_up_id: egui::Id::new(id_source),
            hint_text: None,
            desired_width: None,
        }
    }

    pub fn hint_text(mut self, hint_text: impl Into<egui::WidgetText>) -> Self {
        self.hint_text = Some(hint_text.into());
        self
    }

    pub fn desired_width(mut self, desired_width: f32) -> Self {
        self.desired_width = Some(desired_width);
        self
    }
}

impl<'a, SearchFn, ValueT> egui::Widget for SearchWidget<'a, SearchFn, ValueT>
where
    SearchFn: FnOnce(&str) -> Vec<(ValueT, String)>,
    ValueT: Clone,
{
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let Self {
            pop_up_id,
            buf,
            value,
            search_fn,
            hint_text,
            desired_width,
        } = self;

        let mut edit = egui::TextEdit::singleline(buf);
        if let Some(hint_text) = hint_text {
            edit = edit.hint_text(hint_text);
        }
        if let Some(desired_width) = desired_width {
            edit = edit.desired_width(desired_width);
        }
        let mut r = edit.show(ui).response;
        if r.gained_focus() {
            ui.memory_mut(|m| m.open_popup(pop_up_id));
        }

        let results = search_fn(buf);
        let key = buf.trim().to_lowercase();
        match results.iter().find(|(_, text)| text.to_lowercase() == key) {
            Some((id, _)) => *value = Some(id.clone()),
            None => *value = None,
        }

        let mut changed = false;
        egui::popup_below_widget(
            ui,
            pop_up_id,
            &r,
            egui::PopupCloseBehavior::CloseOnClick,
            |ui| {
                egui::ScrollArea::vertical()
                    .max_height(200.0)
                    .show(ui, |ui| {
                        for (text_id, text) in results {
                            if ui.selectable_label(false, &text).clicked() {
                                *value = Some(text_id);
                                *buf = text;
                                changed = true;
                                ui.memory_mut(|m| m.close_popup());
                            }
                        }
                    });
            },
        );

        if changed {
            r.mark_changed();
        }

        r
    }
}
