//! Chart widgets
//!
//! Bar and line charts go through egui_plot. Pie charts and heatmaps are
//! painted directly, since egui_plot has no item for either.

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Shape, Stroke, pos2, vec2};
use egui_plot::{
    Bar, BarChart, Corner, Legend, Line, Plot, PlotUi, Points, VLine, uniform_grid_spacer,
};
use std::f32::consts::{FRAC_PI_2, TAU};

use super::palette::{ColorScale, contrasting_text, series_color};
use crate::analysis::{GroupedBars, LineSeries, PivotTable};
use crate::constants::layout::{CHART_HEIGHT, HEATMAP_LABEL_WIDTH, PIE_DIAMETER};

const NO_DATA: &str = "No data for the current filters.";

/// Plain scrolling over a plot moves the page, not the plot
const PLOT_SCROLL: bool = false;

/// How the charts respond to the mouse, for the help window
pub fn chart_navigation_help() -> &'static str {
    if PLOT_SCROLL {
        "Scroll / Drag on a chart - Zoom and pan"
    } else {
        "Drag on a chart - Pan, Ctrl + Scroll - Zoom, Double-click - Reset"
    }
}

/// How the series of a bar chart share an x position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarMode {
    /// Side by side
    Group,
    /// On top of each other
    Stack,
}

/// Axis titles and x-axis behaviour of a plot
#[derive(Debug, Clone, Copy)]
pub struct AxisOptions<'a> {
    pub x_title: &'a str,
    pub y_title: &'a str,
    /// x values are numbers (plotted at their value) instead of categories
    pub numeric_x: bool,
    /// One grid line per unit on x, for hour-of-day axes
    pub unit_x_ticks: bool,
    /// Label of a dashed red vertical line at x = 0
    pub zero_marker: Option<&'a str>,
    pub height: f32,
}

impl<'a> AxisOptions<'a> {
    pub fn new(x_title: &'a str, y_title: &'a str) -> Self {
        Self {
            x_title,
            y_title,
            numeric_x: false,
            unit_x_ticks: false,
            zero_marker: None,
            height: CHART_HEIGHT,
        }
    }

    pub fn numeric_x(mut self) -> Self {
        self.numeric_x = true;
        self
    }

    pub fn unit_x_ticks(mut self) -> Self {
        self.unit_x_ticks = true;
        self
    }

    pub fn zero_marker(mut self, label: &'a str) -> Self {
        self.zero_marker = Some(label);
        self
    }
}

/// Integer-looking values without decimals, others with two
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Label for a grid mark on a categorical axis ("" between categories)
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Smallest gap between neighbouring x positions (1.0 for a single bar)
fn min_spacing(xs: &[f64]) -> f64 {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|gap| *gap > 0.0)
        .fold(f64::INFINITY, f64::min)
        .min(1.0)
        .max(f64::EPSILON)
}

/// Share of each slice in percent
pub fn pie_percentages(slices: &[(String, u64)]) -> Vec<f64> {
    let total: u64 = slices.iter().map(|(_, count)| count).sum();
    slices
        .iter()
        .map(|(_, count)| {
            if total == 0 {
                0.0
            } else {
                *count as f64 * 100.0 / total as f64
            }
        })
        .collect()
}

fn show_plot(
    ui: &mut egui::Ui,
    id: &str,
    axes: &AxisOptions<'_>,
    labels: Vec<String>,
    add_items: impl FnOnce(&mut PlotUi),
) {
    let mut plot = Plot::new(id)
        .height(axes.height)
        .allow_scroll(PLOT_SCROLL)
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label(axes.x_title.to_string())
        .y_axis_label(axes.y_title.to_string());

    if !axes.numeric_x {
        plot = plot
            .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value));
    } else if axes.unit_x_ticks {
        plot = plot.x_grid_spacer(uniform_grid_spacer(|_| [1.0, 6.0, 24.0]));
    }

    plot.show(ui, add_items);
}

fn zero_marker(label: &str) -> VLine {
    VLine::new(label, 0.0)
        .color(Color32::RED)
        .style(egui_plot::LineStyle::Dashed { length: 8.0 })
        .width(1.5)
}

/// Grouped or stacked bar chart
pub fn bar_chart(ui: &mut egui::Ui, id: &str, title: &str, data: &GroupedBars, mode: BarMode, axes: AxisOptions<'_>) {
    profiling::scope!("bar_chart");

    ui.strong(title);
    if data.is_empty() {
        ui.label(NO_DATA);
        return;
    }

    let n_series = data.series.len().max(1);
    let group_width = min_spacing(&data.x_values) * 0.8;
    let bar_width = match mode {
        BarMode::Group => group_width / n_series as f64,
        BarMode::Stack => group_width,
    };

    show_plot(ui, id, &axes, data.x_labels.clone(), |plot_ui| {
        let mut charts: Vec<BarChart> = Vec::with_capacity(data.series.len());
        for (series_idx, series) in data.series.iter().enumerate() {
            let offset = match mode {
                BarMode::Group => (series_idx as f64 - (n_series - 1) as f64 / 2.0) * bar_width,
                BarMode::Stack => 0.0,
            };

            let bars: Vec<Bar> = data
                .x_values
                .iter()
                .zip(&series.values)
                .zip(&data.x_labels)
                .map(|((&x, &value), label)| Bar::new(x + offset, value).width(bar_width).name(label))
                .collect();

            let series_name = series.name.clone();
            let mut chart = BarChart::new(series.name.clone(), bars)
                .color(series_color(series_idx))
                .element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
                    format!("{}\n{}: {}", series_name, bar.name, format_value(bar.value))
                }));

            if mode == BarMode::Stack {
                let below: Vec<&BarChart> = charts.iter().collect();
                chart = chart.stack_on(&below);
            }
            charts.push(chart);
        }

        for chart in charts {
            plot_ui.bar_chart(chart);
        }

        if let Some(label) = axes.zero_marker {
            plot_ui.vline(zero_marker(label));
        }
    });
}

/// Line chart with point markers, one line per series
pub fn line_chart(ui: &mut egui::Ui, id: &str, title: &str, lines: &[LineSeries], axes: AxisOptions<'_>) {
    profiling::scope!("line_chart");

    ui.strong(title);
    if lines.iter().all(|l| l.points.is_empty()) {
        ui.label(NO_DATA);
        return;
    }

    show_plot(ui, id, &axes, Vec::new(), |plot_ui| {
        for (series_idx, line) in lines.iter().enumerate() {
            let color = series_color(series_idx);
            plot_ui.line(
                Line::new(line.name.clone(), line.points.clone())
                    .color(color)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(line.name.clone(), line.points.clone())
                    .color(color)
                    .radius(3.0),
            );
        }

        if let Some(label) = axes.zero_marker {
            plot_ui.vline(zero_marker(label));
        }
    });
}

/// Pie chart with percentage labels and a legend, starting at 12 o'clock
pub fn pie_chart(ui: &mut egui::Ui, title: &str, slices: &[(String, u64)]) {
    profiling::scope!("pie_chart");

    ui.strong(title);
    if slices.iter().all(|(_, count)| *count == 0) {
        ui.label(NO_DATA);
        return;
    }

    let percentages = pie_percentages(slices);
    ui.horizontal(|ui| {
        let (rect, _response) = ui.allocate_exact_size(vec2(PIE_DIAMETER, PIE_DIAMETER), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = rect.width() / 2.0 - 4.0;
        let at = |angle: f32, r: f32| center + vec2(angle.cos(), angle.sin()) * r;

        for (slice_idx, ((start, sweep), pct)) in
            pie_angles(&percentages).into_iter().zip(&percentages).enumerate()
        {
            let color = series_color(slice_idx);

            // Thin wedges stay convex whatever the slice size
            let steps = ((sweep.abs() / 0.05).ceil() as usize).max(1);
            for step in 0..steps {
                let a0 = start + sweep * step as f32 / steps as f32;
                let a1 = start + sweep * (step + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![center, at(a1, radius), at(a0, radius)],
                    color,
                    Stroke::NONE,
                ));
            }

            if *pct > 0.0 {
                painter.text(
                    at(start + sweep / 2.0, radius * 0.65),
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", pct),
                    FontId::proportional(12.0),
                    contrasting_text(color),
                );
            }
        }

        ui.vertical(|ui| {
            for (slice_idx, (label, count)) in slices.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.colored_label(series_color(slice_idx), "■");
                    ui.label(format!("{} ({})", label, count));
                });
            }
        });
    });
}

/// `(start, sweep)` of each slice in screen radians. Slices start at 12
/// o'clock and run counterclockwise, so sweeps are negative (y points down).
pub fn pie_angles(percentages: &[f64]) -> Vec<(f32, f32)> {
    let mut start = -FRAC_PI_2;
    percentages
        .iter()
        .map(|pct| {
            let sweep = -TAU * (*pct as f32) / 100.0;
            let slice = (start, sweep);
            start += sweep;
            slice
        })
        .collect()
}

/// Heatmap of a pivot, rows in the pivot's order, values printed in cells
pub fn heatmap(ui: &mut egui::Ui, title: &str, pivot: &PivotTable, scale: ColorScale, height: f32) {
    profiling::scope!("heatmap");

    ui.strong(title);
    if pivot.is_empty() {
        ui.label(NO_DATA);
        return;
    }

    let (min, max) = pivot.value_range();
    let header_height = 24.0;
    let n_rows = pivot.rows.len();
    let n_cols = pivot.columns.len();
    let cell_w = ((ui.available_width() - HEATMAP_LABEL_WIDTH) / n_cols as f32).clamp(40.0, 160.0);
    let cell_h = ((height - header_height) / n_rows as f32).clamp(14.0, 40.0);

    let size = vec2(
        HEATMAP_LABEL_WIDTH + cell_w * n_cols as f32,
        header_height + cell_h * n_rows as f32,
    );
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();
    let grid_left = rect.left() + HEATMAP_LABEL_WIDTH;
    let grid_top = rect.top() + header_height;

    for (c, column) in pivot.columns.iter().enumerate() {
        painter.text(
            pos2(grid_left + cell_w * (c as f32 + 0.5), rect.top() + header_height / 2.0),
            Align2::CENTER_CENTER,
            column,
            FontId::proportional(12.0),
            text_color,
        );
    }

    for (r, row) in pivot.rows.iter().enumerate() {
        painter.text(
            pos2(grid_left - 6.0, grid_top + cell_h * (r as f32 + 0.5)),
            Align2::RIGHT_CENTER,
            row,
            FontId::proportional(11.0),
            text_color,
        );
    }

    // Long records come out row-major, so the index gives the cell position
    for (idx, record) in pivot.melt().iter().enumerate() {
        let (r, c) = (idx / n_cols, idx % n_cols);
        let cell = Rect::from_min_size(
            pos2(grid_left + cell_w * c as f32, grid_top + cell_h * r as f32),
            vec2(cell_w, cell_h),
        )
        .shrink(0.5);
        let fill = scale.color_for(record.value, min, max);
        painter.rect_filled(cell, 0.0, fill);
        painter.text(
            cell.center(),
            Align2::CENTER_CENTER,
            format_value(record.value),
            FontId::proportional(11.0),
            contrasting_text(fill),
        );
    }

    let hovered_cell = response.hover_pos().and_then(|pos| {
        let c = ((pos.x - grid_left) / cell_w).floor();
        let r = ((pos.y - grid_top) / cell_h).floor();
        (c >= 0.0 && r >= 0.0 && (c as usize) < n_cols && (r as usize) < n_rows)
            .then(|| (r as usize, c as usize))
    });
    if let Some((r, c)) = hovered_cell {
        let (row, column) = (&pivot.rows[r], &pivot.columns[c]);
        let value = pivot.get(row, column).unwrap_or_default();
        response.on_hover_text_at_pointer(format!("{}\n{}: {}", row, column, format_value(value)));
    }

    color_bar(ui, scale, min, max);
}

fn color_bar(ui: &mut egui::Ui, scale: ColorScale, min: f64, max: f64) {
    const STEPS: usize = 48;
    ui.horizontal(|ui| {
        ui.small(format_value(min));
        let (rect, _) = ui.allocate_exact_size(vec2(192.0, 10.0), Sense::hover());
        let painter = ui.painter_at(rect);
        let step_w = rect.width() / STEPS as f32;
        for i in 0..STEPS {
            let swatch = Rect::from_min_size(pos2(rect.left() + step_w * i as f32, rect.top()), vec2(step_w + 0.5, rect.height()));
            painter.rect_filled(swatch, 0.0, scale.sample(i as f64 / (STEPS - 1) as f64));
        }
        ui.small(format_value(max));
    });
}
