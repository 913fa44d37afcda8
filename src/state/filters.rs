//! Filter control state

use std::collections::BTreeSet;

use crate::analysis::{FilterColumn, FilterOptions, FilterSelection};

/// What the filter sidebar and the food item picker currently hold
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Options offered by each sidebar control, captured at load time
    pub options: FilterOptions,

    /// Selected values per sidebar control
    pub selection: FilterSelection,

    /// Food items unticked in the days-to-expiry panel.
    /// Stored as exclusions so items that appear after a filter change
    /// start out selected.
    pub excluded_food_items: BTreeSet<String>,
}

impl FilterState {
    /// Fresh state for newly loaded data: everything selected
    pub fn new(options: FilterOptions) -> Self {
        let selection = FilterSelection::select_all(&options);
        Self {
            options,
            selection,
            excluded_food_items: BTreeSet::new(),
        }
    }

    /// Back to "select all" on every control
    pub fn reset(&mut self) {
        self.selection = FilterSelection::select_all(&self.options);
        self.excluded_food_items.clear();
    }

    /// Check if any control deviates from its default
    pub fn has_active_filters(&self) -> bool {
        !self.selection.is_everything(&self.options) || !self.excluded_food_items.is_empty()
    }

    /// Select every option of one control
    pub fn select_all_in(&mut self, column: FilterColumn) {
        let all = self.options.values(column).to_vec();
        self.selection.set(column, all);
    }

    /// Deselect every option of one control
    pub fn clear_column(&mut self, column: FilterColumn) {
        self.selection.set(column, Vec::new());
    }

    pub fn is_food_item_selected(&self, item: &str) -> bool {
        !self.excluded_food_items.contains(item)
    }

    pub fn toggle_food_item(&mut self, item: &str) {
        if !self.excluded_food_items.remove(item) {
            self.excluded_food_items.insert(item.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::filter::tests::sample_final;

    fn state() -> FilterState {
        FilterState::new(FilterOptions::from_frame(&sample_final()).unwrap())
    }

    #[test]
    fn test_new_state_selects_everything() {
        let state = state();
        assert!(!state.has_active_filters());
        assert!(state.selection.is_selected(FilterColumn::Status, "Pending"));
    }

    #[test]
    fn test_clear_and_reset() {
        let mut state = state();
        state.clear_column(FilterColumn::MealType);
        assert!(state.has_active_filters());
        assert!(state.selection.selected(FilterColumn::MealType).unwrap().is_empty());

        state.select_all_in(FilterColumn::MealType);
        assert!(!state.has_active_filters());

        state.toggle_food_item("Rice");
        assert!(!state.is_food_item_selected("Rice"));
        assert!(state.has_active_filters());

        state.reset();
        assert!(state.is_food_item_selected("Rice"));
        assert!(!state.has_active_filters());
    }
}
