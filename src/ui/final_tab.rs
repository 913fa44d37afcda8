//! The merged-data tab: filtered table, KPI cards and the nine panels.
//!
//! Every panel reads the filtered view. The nine aggregations run in display
//! order before anything is drawn; the first one that fails ends the pass and
//! its error is the only thing shown where the charts would be.

use eframe::egui;
use polars::prelude::DataFrame;

use super::charts::{self, AxisOptions, BarMode};
use super::data_table::{render_frame_table, row_count_label};
use super::palette::ColorScale;
use super::tabs::{panel_error, render_count_labels};
use crate::analysis::aggregate::{
    GroupedBars, LineSeries, claims_by_hour_and_status, mean_quantity_by_expiry,
    providers_by_status, quantity_by_food_and_expiry, quantity_by_provider_and_food_bars,
};
use crate::analysis::pivot::{
    PivotTable, RankedPivot, food_quantity_by_status, provider_vs_receiver,
    top_providers_by_status, top_receivers_by_status,
};
use crate::analysis::Kpis;
use crate::app::Dashboard;
use crate::constants::layout::{CHART_HEIGHT, FILTERED_TABLE_HEIGHT, TABLE_ROW_HEIGHT, TALL_CHART_HEIGHT};
use crate::error::Result;
use crate::state::FilterState;
use crate::widgets::{KpiCard, MultiSelect, MultiSelectAction};

const EXPIRY_MARKER: &str = "Expiry Date";

pub fn render_final_tab(app: &mut Dashboard, ui: &mut egui::Ui) {
    profiling::scope!("render_final_tab");

    let Some(data) = app.state.data.as_ref() else {
        return;
    };
    let preview = data.final_data.head(app.state.view.preview_rows);
    let total_rows = data.final_data.height();

    ui.heading("Final Data (Merged)");
    render_frame_table(
        ui,
        "final_preview",
        &preview,
        TABLE_ROW_HEIGHT * (preview.height() as f32 + 1.5),
    );
    ui.add_space(12.0);

    let view = match app.filtered_view() {
        Some(Ok(view)) => view,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "filtered view failed");
            ui.colored_label(egui::Color32::RED, e.user_message());
            return;
        }
        None => return,
    };

    ui.heading("📂 Filtered Dataset");
    ui.label(row_count_label(view.height(), total_rows));
    render_frame_table(ui, "filtered_table", &view, FILTERED_TABLE_HEIGHT);
    ui.add_space(12.0);

    if render_kpis(ui, &view) {
        app.copy_kpis();
    }
    ui.separator();

    let result = render_panels(ui, &view, &mut app.state.filters, app.state.view.top_n);
    panel_error(ui, "📈 Charts", result);
}

/// KPI cards; true when the copy button was clicked
fn render_kpis(ui: &mut egui::Ui, view: &DataFrame) -> bool {
    let title = "📊 KPIs (Based on Filters)";
    ui.heading(title);

    let mut copy = false;
    let result = Kpis::compute(view).map(|kpis| {
        ui.horizontal(|ui| {
            KpiCard::new("Total Claims", kpis.total_claims).show(ui);
            KpiCard::new("Completed Claims", kpis.completed_claims).show(ui);
            KpiCard::new("Total Quantity", kpis.total_quantity).show(ui);
            copy = ui
                .button("📋")
                .on_hover_text("Copy KPIs to clipboard")
                .clicked();
        });
    });
    panel_error(ui, title, result);
    copy
}

/// Aggregates behind the nine panels, in display order
struct PanelData {
    quantity_by_provider: GroupedBars,
    mean_quantity: LineSeries,
    claims_by_hour: Vec<LineSeries>,
    providers_by_status: GroupedBars,
    food_by_expiry: GroupedBars,
    food_by_status: PivotTable,
    provider_vs_receiver: PivotTable,
    top_providers: RankedPivot,
    top_receivers: RankedPivot,
}

impl PanelData {
    fn compute(view: &DataFrame, top_n: usize) -> Result<Self> {
        profiling::scope!("PanelData::compute");
        Ok(Self {
            quantity_by_provider: quantity_by_provider_and_food_bars(view)?,
            mean_quantity: mean_quantity_by_expiry(view)?,
            claims_by_hour: claims_by_hour_and_status(view)?,
            providers_by_status: providers_by_status(view)?,
            food_by_expiry: quantity_by_food_and_expiry(view)?,
            food_by_status: food_quantity_by_status(view)?,
            provider_vs_receiver: provider_vs_receiver(view)?,
            top_providers: top_providers_by_status(view, top_n)?,
            top_receivers: top_receivers_by_status(view, top_n)?,
        })
    }
}

fn render_panels(
    ui: &mut egui::Ui,
    view: &DataFrame,
    filters: &mut FilterState,
    top_n: usize,
) -> Result<()> {
    let panels = PanelData::compute(view, top_n)?;

    ui.heading("Food Quantity by Provider Type and Food Name");
    charts::bar_chart(
        ui,
        "quantity_by_provider",
        "Food Quantity by Provider Type",
        &panels.quantity_by_provider,
        BarMode::Group,
        AxisOptions::new("Provider_Type", "Total_Quantity"),
    );
    ui.weak(format!(
        "Total quantity: {}",
        charts::format_value(panels.quantity_by_provider.total())
    ));
    ui.add_space(16.0);

    charts::line_chart(
        ui,
        "mean_quantity_by_expiry",
        "Average Quantity Available by Days to Expiry",
        std::slice::from_ref(&panels.mean_quantity),
        AxisOptions::new("Days_To_Expiry", "Quantity")
            .numeric_x()
            .zero_marker(EXPIRY_MARKER),
    );
    ui.add_space(16.0);

    ui.heading("⏰ Claims by Hour and Status");
    charts::line_chart(
        ui,
        "claims_by_hour",
        "Claims by Hour (with Status Breakdown)",
        &panels.claims_by_hour,
        AxisOptions::new("Hour of Day", "Number of Claims")
            .numeric_x()
            .unit_x_ticks(),
    );
    ui.add_space(16.0);

    charts::bar_chart(
        ui,
        "providers_by_status",
        "Status wise Provider Count",
        &panels.providers_by_status,
        BarMode::Stack,
        AxisOptions::new("Provider Type", "Provider Count"),
    );
    render_count_labels(
        ui,
        &panels.providers_by_status.x_labels,
        &panels.providers_by_status.stacked_totals(),
    );
    ui.add_space(16.0);

    food_expiry_panel(ui, panels.food_by_expiry, filters);
    ui.add_space(16.0);

    charts::heatmap(
        ui,
        "Food Item Quantity wise Status",
        &panels.food_by_status,
        ColorScale::YlGnBu,
        CHART_HEIGHT,
    );
    ui.add_space(16.0);

    ui.heading("🔥 Provider Type vs Receiver Type");
    charts::heatmap(
        ui,
        "Provider Type vs Receiver Type",
        &panels.provider_vs_receiver,
        ColorScale::Spectral,
        CHART_HEIGHT,
    );
    ui.add_space(16.0);

    charts::heatmap(
        ui,
        "Top Food Providers by Food Status",
        &panels.top_providers.pivot,
        ColorScale::Plasma,
        TALL_CHART_HEIGHT,
    );
    ui.add_space(16.0);

    charts::heatmap(
        ui,
        "Top Receivers by Food Claim Status",
        &panels.top_receivers.pivot,
        ColorScale::RdBu,
        TALL_CHART_HEIGHT,
    );
    Ok(())
}

fn food_expiry_panel(ui: &mut egui::Ui, mut bars: GroupedBars, filters: &mut FilterState) {
    ui.heading("📊 Food Item Quantity by Days to Expiry");

    let mut items: Vec<String> = bars.series.iter().map(|s| s.name.clone()).collect();
    items.sort();
    let action = MultiSelect::new("Select Food Items", &items, |item| {
        filters.is_food_item_selected(item)
    })
    .show(ui);
    if let Some(action) = action {
        apply_food_action(filters, &items, action);
    }

    bars.retain_series(|name| filters.is_food_item_selected(name));
    charts::bar_chart(
        ui,
        "food_quantity_by_expiry",
        "Total Food Item Quantity Available by Days to Expiry",
        &bars,
        BarMode::Group,
        AxisOptions::new("Days_To_Expiry", "Quantity")
            .numeric_x()
            .zero_marker(EXPIRY_MARKER),
    );
}

/// Apply a food-item picker action to the exclusions among `items`
fn apply_food_action(filters: &mut FilterState, items: &[String], action: MultiSelectAction) {
    match action {
        MultiSelectAction::Toggle(item) => filters.toggle_food_item(&item),
        MultiSelectAction::SelectAll => {
            for item in items {
                filters.excluded_food_items.remove(item);
            }
        }
        MultiSelectAction::SelectNone => {
            filters.excluded_food_items.extend(items.iter().cloned());
        }
    }
}
