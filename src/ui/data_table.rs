use eframe::egui;
use egui_extras::{Column, TableBuilder};
use polars::prelude::{DataFrame, Series};

use crate::constants::layout::{TABLE_HEADER_HEIGHT, TABLE_ROW_HEIGHT};
use crate::data::source::{cell_text, column_names};

/// Render a frame as a striped, virtually scrolled table.
/// Only the rows in view are turned into text.
pub fn render_frame_table(ui: &mut egui::Ui, id: &str, df: &DataFrame, max_height: f32) {
    profiling::scope!("render_frame_table");

    let headers = column_names(df);
    let columns: Vec<&Series> = df
        .get_columns()
        .iter()
        .map(|c| c.as_materialized_series())
        .collect();

    if headers.is_empty() {
        ui.label("No columns.");
        return;
    }

    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(max_height)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(45.0).resizable(false))
            .columns(Column::initial(110.0).resizable(true).clip(true), headers.len())
            .header(TABLE_HEADER_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for name in &headers {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(TABLE_ROW_HEIGHT, df.height(), |mut row| {
                    let row_idx = row.index();
                    row.col(|ui| {
                        ui.label(format!("{}", row_idx));
                    });
                    for series in &columns {
                        row.col(|ui| {
                            ui.label(cell_text(series, row_idx));
                        });
                    }
                });
            });
    });
}

/// Row count line shown under a table
pub fn row_count_label(shown: usize, total: usize) -> String {
    if shown < total {
        format!("Showing {} of {} rows", shown, total)
    } else {
        format!("{} rows", total)
    }
}
