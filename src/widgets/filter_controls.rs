//! Filter sidebar widget

use crate::analysis::FilterColumn;
use crate::state::FilterState;
use crate::widgets::multi_select::{MultiSelect, MultiSelectAction};
use egui::Ui;

/// The five multi-select controls of the final data tab
pub struct FilterControls<'a> {
    state: &'a mut FilterState,
}

impl<'a> FilterControls<'a> {
    /// Create a new filter controls widget
    pub fn new(state: &'a mut FilterState) -> Self {
        Self { state }
    }

    /// Show the filter controls; true when the selection changed
    pub fn show(self, ui: &mut Ui) -> bool {
        let mut changed = false;

        ui.heading("Filters");
        ui.horizontal(|ui| {
            let reset = ui
                .add_enabled(self.state.has_active_filters(), egui::Button::new("↺ Reset filters"))
                .on_hover_text("Select every value again");
            if reset.clicked() {
                self.state.reset();
                changed = true;
            }
        });
        ui.separator();

        for column in FilterColumn::ALL {
            let options = self.state.options.values(column);
            let selection = &self.state.selection;
            let action = MultiSelect::new(column.label(), options, |value| {
                selection.is_selected(column, value)
            })
            .default_open(column == FilterColumn::ProviderType)
            .show(ui);

            if let Some(action) = action {
                apply_action(self.state, column, action);
                changed = true;
            }
        }

        changed
    }
}

fn apply_action(state: &mut FilterState, column: FilterColumn, action: MultiSelectAction) {
    match action {
        MultiSelectAction::Toggle(value) => state.selection.toggle(column, &value),
        MultiSelectAction::SelectAll => state.select_all_in(column),
        MultiSelectAction::SelectNone => state.clear_column(column),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FilterOptions;
    use crate::analysis::filter::tests::sample_final;

    #[test]
    fn test_apply_action() {
        let mut state = FilterState::new(FilterOptions::from_frame(&sample_final()).unwrap());

        apply_action(&mut state, FilterColumn::Status, MultiSelectAction::SelectNone);
        assert!(!state.selection.is_selected(FilterColumn::Status, "Completed"));

        apply_action(
            &mut state,
            FilterColumn::Status,
            MultiSelectAction::Toggle("Completed".to_string()),
        );
        assert!(state.selection.is_selected(FilterColumn::Status, "Completed"));
        assert!(!state.selection.is_selected(FilterColumn::Status, "Pending"));

        apply_action(&mut state, FilterColumn::Status, MultiSelectAction::SelectAll);
        assert!(!state.has_active_filters());
    }
}
