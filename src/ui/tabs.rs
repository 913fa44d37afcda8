//! The four single-table tabs: a preview plus one chart each

use eframe::egui;

use super::charts::{self, AxisOptions, BarMode};
use super::data_table::render_frame_table;
use crate::analysis::aggregate::{food_type_by_meal, type_distribution, value_counts};
use crate::constants::columns::{STATUS, TYPE};
use crate::constants::layout::TABLE_ROW_HEIGHT;
use crate::data::Table;
use crate::error::Result;

fn render_preview(ui: &mut egui::Ui, title: &str, table: &Table, rows: usize) {
    ui.heading(title);
    let head = table.head(rows);
    let height = TABLE_ROW_HEIGHT * (head.height() as f32 + 1.5);
    render_frame_table(ui, title, &head, height);
    ui.add_space(12.0);
}

/// Show a failed chart in place of the chart itself
pub(crate) fn panel_error(ui: &mut egui::Ui, panel: &str, result: Result<()>) {
    if let Err(e) = result {
        tracing::warn!(panel, error = %e, "panel failed");
        ui.group(|ui| {
            ui.strong(panel);
            ui.colored_label(egui::Color32::RED, format!("{}: {}", e.title(), e.user_message()));
        });
    }
}

pub fn render_claims_tab(ui: &mut egui::Ui, table: &Table, preview_rows: usize) {
    render_preview(ui, "Claims Data Preview", table, preview_rows);

    let title = "Claim Status Distribution";
    let result = value_counts(table.dataframe(), table.kind().name(), STATUS)
        .map(|slices| charts::pie_chart(ui, title, &slices));
    panel_error(ui, title, result);
}

pub fn render_foods_tab(ui: &mut egui::Ui, table: &Table, preview_rows: usize) {
    render_preview(ui, "Food Listings Preview", table, preview_rows);

    let title = "Food Type Distribution by Meal";
    let result = food_type_by_meal(table.dataframe()).map(|bars| {
        charts::bar_chart(
            ui,
            "food_type_by_meal",
            title,
            &bars,
            BarMode::Group,
            AxisOptions::new("Food_Type", "count"),
        )
    });
    panel_error(ui, title, result);
}

fn render_type_tab(ui: &mut egui::Ui, table: &Table, preview_rows: usize, preview: &str, title: &str) {
    render_preview(ui, preview, table, preview_rows);

    let result = type_distribution(table.dataframe(), table.kind().name(), TYPE).map(|bars| {
        charts::bar_chart(ui, title, title, &bars, BarMode::Group, AxisOptions::new("Type", "Count"));
        if let Some(series) = bars.series.first() {
            render_count_labels(ui, &bars.x_labels, &series.values);
        }
    });
    panel_error(ui, title, result);
}

/// The count behind each bar, as a single row of labels
pub(crate) fn render_count_labels(ui: &mut egui::Ui, labels: &[String], values: &[f64]) {
    ui.horizontal_wrapped(|ui| {
        for (label, value) in labels.iter().zip(values) {
            ui.label(format!("{}: {}", label, charts::format_value(*value)));
            ui.separator();
        }
    });
}

pub fn render_providers_tab(ui: &mut egui::Ui, table: &Table, preview_rows: usize) {
    render_type_tab(
        ui,
        table,
        preview_rows,
        "Providers Data Preview",
        "Distribution of Provider Type",
    );
}

pub fn render_receivers_tab(ui: &mut egui::Ui, table: &Table, preview_rows: usize) {
    render_type_tab(
        ui,
        table,
        preview_rows,
        "Receivers Data Preview",
        "Distribution of Receiver Type",
    );
}
