//! Collapsible multi-select list widget

use egui::Ui;

/// What the user did with a multi-select this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiSelectAction {
    Toggle(String),
    SelectAll,
    SelectNone,
}

/// A collapsible checkbox list with "All" / "None" helpers.
///
/// The widget holds no selection itself: it reads the current state through
/// `is_selected` and reports at most one action per frame.
pub struct MultiSelect<'a, F: Fn(&str) -> bool> {
    title: &'a str,
    options: &'a [String],
    is_selected: F,
    default_open: bool,
}

impl<'a, F: Fn(&str) -> bool> MultiSelect<'a, F> {
    pub fn new(title: &'a str, options: &'a [String], is_selected: F) -> Self {
        Self {
            title,
            options,
            is_selected,
            default_open: false,
        }
    }

    pub fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    /// Show the list and return the action taken, if any
    pub fn show(self, ui: &mut Ui) -> Option<MultiSelectAction> {
        let selected_count = self
            .options
            .iter()
            .filter(|option| (self.is_selected)(option.as_str()))
            .count();
        let header = format!("{} ({}/{})", self.title, selected_count, self.options.len());

        let mut action = None;
        egui::CollapsingHeader::new(header)
            .id_salt(self.title)
            .default_open(self.default_open)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.small_button("All").clicked() {
                        action = Some(MultiSelectAction::SelectAll);
                    }
                    if ui.small_button("None").clicked() {
                        action = Some(MultiSelectAction::SelectNone);
                    }
                });

                if self.options.is_empty() {
                    ui.weak("(no values)");
                }
                for option in self.options {
                    let mut checked = (self.is_selected)(option.as_str());
                    let text = if option.is_empty() { "(empty)" } else { option.as_str() };
                    if ui.checkbox(&mut checked, text).changed() {
                        action = Some(MultiSelectAction::Toggle(option.clone()));
                    }
                }
            });
        action
    }
}
