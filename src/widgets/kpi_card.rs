//! Metric card widget

use egui::{Frame, Response, RichText, Ui};

/// A framed label/value pair, the way a dashboard shows a single metric
pub struct KpiCard<'a> {
    label: &'a str,
    value: String,
}

impl<'a> KpiCard<'a> {
    pub fn new(label: &'a str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        Frame::group(ui.style())
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_min_width(160.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(self.label).small().weak());
                    ui.label(RichText::new(self.value).size(26.0).strong());
                });
            })
            .response
    }
}
