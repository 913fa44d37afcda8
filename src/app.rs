use eframe::egui;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::analysis::{FilterOptions, FilterSelection, Kpis, apply_filters};
use crate::constants::config::{EXPORT_FILE, SELECTION_FILE};
use crate::data::{DataPaths, Dataset, TableKind};
use crate::error::{DashboardError, Result};
use crate::state::{AppState, FilterState, Tab, ViewState};
use crate::ui;

const APP_TITLE: &str = "🍴 Local Food Wastage Management System Dashboard";

/// The dashboard application
pub struct Dashboard {
    pub state: AppState,

    /// Selection applied right after each successful load
    startup_selection: Option<PathBuf>,
}

impl Dashboard {
    pub fn new(paths: DataPaths, view: ViewState, startup_selection: Option<PathBuf>) -> Self {
        let mut state = AppState::new(paths);
        state.view = view;
        Self {
            state,
            startup_selection,
        }
    }

    /// Load every table from the configured paths.
    /// On failure the previous data (if any) is dropped so no stale view is shown.
    pub fn load_data(&mut self) -> Result<()> {
        profiling::scope!("Dashboard::load_data");

        self.state.data = None;
        let dataset = Dataset::load(&self.state.paths)?;
        let options = FilterOptions::from_frame(dataset.final_data.dataframe())?;
        self.state.filters = FilterState::new(options);
        self.state.data = Some(dataset);
        Ok(())
    }

    /// Load, then apply the startup selection. Either failure becomes the
    /// error banner; a bad selection file keeps the loaded data.
    pub fn reload(&mut self) {
        self.state.ui.clear_error();
        if let Err(e) = self.load_data() {
            tracing::error!(error = %e, "failed to load data");
            self.state.ui.set_error(e.user_message());
            return;
        }
        let rows = self.state.final_row_count();
        self.state.ui.set_status(format!("Loaded {} merged rows", rows));

        if let Some(path) = self.startup_selection.clone() {
            if let Err(e) = self.read_selection_from(&path) {
                tracing::warn!(path = %path.display(), error = %e, "startup selection not applied");
                self.state
                    .ui
                    .set_error(format!("Selection '{}': {}", path.display(), e.user_message()));
            }
        }
    }

    /// Pick another data directory and load from it
    pub fn open_data_dir(&mut self) {
        if let Some(dir) = rfd::FileDialog::new()
            .set_title("Select data directory")
            .pick_folder()
        {
            tracing::info!(dir = %dir.display(), "data directory selected");
            self.state.paths = DataPaths::in_dir(&dir);
            self.reload();
        }
    }

    /// The final table narrowed by the current selection
    pub fn filtered_view(&self) -> Option<Result<DataFrame>> {
        let data = self.state.data.as_ref()?;
        Some(apply_filters(
            data.final_data.dataframe(),
            &self.state.filters.selection,
        ))
    }

    pub fn write_selection_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.state.filters.selection)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "filter selection saved");
        Ok(())
    }

    pub fn read_selection_from(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)?;
        let selection: FilterSelection = serde_json::from_str(&contents)?;
        self.state.filters.selection = selection;
        tracing::info!(path = %path.display(), "filter selection loaded");
        Ok(())
    }

    pub fn save_selection(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(SELECTION_FILE)
            .save_file()
        {
            match self.write_selection_to(&path) {
                Ok(()) => self.state.ui.set_status(format!("Selection saved to {}", path.display())),
                Err(e) => self.state.ui.set_error(e.user_message()),
            }
        }
    }

    pub fn load_selection(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match self.read_selection_from(&path) {
                Ok(()) => self.state.ui.set_status(format!("Selection loaded from {}", path.display())),
                Err(e) => self.state.ui.set_error(e.user_message()),
            }
        }
    }

    /// Write the filtered view as CSV, returning the number of rows written
    pub fn export_filtered_to(&self, path: &Path) -> Result<usize> {
        let mut df = self
            .filtered_view()
            .ok_or_else(|| DashboardError::Config("no data loaded".to_string()))??;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
        tracing::info!(path = %path.display(), rows = df.height(), "filtered view exported");
        Ok(df.height())
    }

    pub fn export_filtered(&mut self) {
        if !self.state.has_data() {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(EXPORT_FILE)
            .save_file()
        {
            match self.export_filtered_to(&path) {
                Ok(rows) => self
                    .state
                    .ui
                    .set_status(format!("Exported {} rows to {}", rows, path.display())),
                Err(e) => self.state.ui.set_error(e.user_message()),
            }
        }
    }

    /// KPIs of the current filtered view
    pub fn kpis(&self) -> Option<Result<Kpis>> {
        self.filtered_view()
            .map(|view| view.and_then(|df| Kpis::compute(&df)))
    }

    pub fn copy_kpis(&mut self) {
        let Some(kpis) = self.kpis() else {
            return;
        };
        let result = kpis.and_then(|kpis| {
            arboard::Clipboard::new()
                .and_then(|mut clipboard| clipboard.set_text(kpis.summary()))
                .map_err(|e| DashboardError::Clipboard(e.to_string()))
        });
        match result {
            Ok(()) => self.state.ui.set_status("KPIs copied to clipboard"),
            Err(e) => self.state.ui.set_error(e.user_message()),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let mut reload = false;
        ctx.input(|i| {
            if i.modifiers.ctrl && i.key_pressed(egui::Key::R) {
                reload = true;
            }
            if i.modifiers.any() {
                return;
            }
            if i.key_pressed(egui::Key::T) {
                self.state.view.dark_mode = !self.state.view.dark_mode;
            }
            if i.key_pressed(egui::Key::H) || i.key_pressed(egui::Key::F1) {
                self.state.view.show_help = !self.state.view.show_help;
            }
            if i.key_pressed(egui::Key::Escape) {
                self.state.view.show_help = false;
            }
            let number_keys = [
                egui::Key::Num1,
                egui::Key::Num2,
                egui::Key::Num3,
                egui::Key::Num4,
                egui::Key::Num5,
            ];
            for (idx, key) in number_keys.into_iter().enumerate() {
                if i.key_pressed(key) {
                    if let Some(tab) = Tab::from_number(idx + 1) {
                        self.state.view.active_tab = tab;
                    }
                }
            }
        });
        if reload {
            self.reload();
        }
    }

    fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading(APP_TITLE);
            ui::render_toolbar(self, ui);

            if let Some(message) = self.state.ui.error_message.clone() {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, format!("⚠ {}", message));
                    if ui.small_button("✖").clicked() {
                        self.state.ui.clear_error();
                    }
                });
            } else if let Some(message) = &self.state.ui.status_message {
                ui.weak(message);
            }

            ui.separator();
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.state.view.active_tab, tab, tab.title());
                }
            });
            ui.add_space(2.0);
        });
    }
}

impl eframe::App for Dashboard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::finish_frame!();

        // Set theme
        if self.state.view.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Plain keys belong to a focused text field
        if !ctx.wants_keyboard_input() {
            self.handle_shortcuts(ctx);
        }

        self.render_top_panel(ctx);

        if self.state.view.active_tab == Tab::Final && self.state.has_data() {
            egui::SidePanel::left("filter_panel")
                .resizable(true)
                .default_width(crate::constants::layout::FILTER_PANEL_WIDTH)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        if crate::widgets::FilterControls::new(&mut self.state.filters).show(ui) {
                            tracing::debug!("filter selection changed");
                        }
                    });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.state.has_data() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.heading("No data loaded");
                    ui.label("Use 📂 to pick the directory holding the five CSV files, or fix the error above and press Ctrl+R");
                });
                return;
            }

            let tab = self.state.view.active_tab;
            let preview_rows = self.state.view.preview_rows;
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if tab == Tab::Final {
                        ui::render_final_tab(self, ui);
                        return;
                    }
                    let Some(data) = self.state.data.as_ref() else {
                        return;
                    };
                    let table = data.table(tab_table(tab));
                    match tab {
                        Tab::Claims => ui::render_claims_tab(ui, table, preview_rows),
                        Tab::Foods => ui::render_foods_tab(ui, table, preview_rows),
                        Tab::Providers => ui::render_providers_tab(ui, table, preview_rows),
                        Tab::Receivers => ui::render_receivers_tab(ui, table, preview_rows),
                        Tab::Final => {}
                    }
                });
        });

        ui::render_help_dialog(self, ctx);
    }
}

/// Table shown by a tab
fn tab_table(tab: Tab) -> TableKind {
    match tab {
        Tab::Claims => TableKind::Claims,
        Tab::Foods => TableKind::Foods,
        Tab::Providers => TableKind::Providers,
        Tab::Receivers => TableKind::Receivers,
        Tab::Final => TableKind::Final,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FilterColumn;
    use crate::data::dataset::tests::write_fixture_dir;

    fn loaded_dashboard(dir: &Path) -> Dashboard {
        write_fixture_dir(dir);
        let mut app = Dashboard::new(DataPaths::in_dir(dir), ViewState::default(), None);
        app.load_data().unwrap();
        app
    }

    #[test]
    fn test_load_selects_everything() {
        let dir = tempfile::tempdir().unwrap();
        let app = loaded_dashboard(dir.path());

        assert!(app.state.has_data());
        assert!(!app.state.filters.has_active_filters());
        let view = app.filtered_view().unwrap().unwrap();
        assert_eq!(view.height(), app.state.final_row_count());
    }

    #[test]
    fn test_load_failure_leaves_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = Dashboard::new(DataPaths::in_dir(dir.path()), ViewState::default(), None);

        let err = app.load_data().unwrap_err();
        assert!(matches!(err, DashboardError::MissingFile { .. }));
        assert!(!app.state.has_data());

        app.reload();
        assert!(app.state.ui.error_message.is_some());
    }

    #[test]
    fn test_selection_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_dashboard(dir.path());
        app.state.filters.clear_column(FilterColumn::Status);
        app.state.filters.selection.toggle(FilterColumn::Status, "Completed");
        let saved = app.state.filters.selection.clone();

        let path = dir.path().join(SELECTION_FILE);
        app.write_selection_to(&path).unwrap();

        app.state.filters.reset();
        assert_ne!(app.state.filters.selection, saved);

        app.read_selection_from(&path).unwrap();
        assert_eq!(app.state.filters.selection, saved);
    }

    #[test]
    fn test_startup_selection_applied_after_load() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_dir(dir.path());
        let path = dir.path().join(SELECTION_FILE);
        std::fs::write(&path, r#"{"selected":{"Status":["Pending"]}}"#).unwrap();

        let mut app = Dashboard::new(DataPaths::in_dir(dir.path()), ViewState::default(), Some(path));
        app.reload();
        assert!(app.state.ui.error_message.is_none());

        // Columns missing from the file select nothing
        assert_eq!(app.filtered_view().unwrap().unwrap().height(), 0);
        assert!(app.state.filters.selection.is_selected(FilterColumn::Status, "Pending"));
    }

    #[test]
    fn test_bad_startup_selection_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_dir(dir.path());
        let path = dir.path().join(SELECTION_FILE);
        std::fs::write(&path, "not json").unwrap();

        let mut app = Dashboard::new(DataPaths::in_dir(dir.path()), ViewState::default(), Some(path));
        app.reload();

        assert!(app.state.has_data());
        let error = app.state.ui.error_message.clone().unwrap();
        assert!(error.starts_with("Selection '"));
        assert!(error.contains("JSON error"));
        // The default selection stays in place
        assert_eq!(app.filtered_view().unwrap().unwrap().height(), app.state.final_row_count());
    }

    #[test]
    fn test_export_filtered_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let app = loaded_dashboard(dir.path());

        let path = dir.path().join(EXPORT_FILE);
        let rows = app.export_filtered_to(&path).unwrap();
        assert_eq!(rows, app.state.final_row_count());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.lines().next().unwrap().contains("Claim_ID"));
        assert_eq!(written.lines().count(), rows + 1);
    }

    #[test]
    fn test_export_without_data_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = Dashboard::new(DataPaths::in_dir(dir.path()), ViewState::default(), None);
        assert!(app.export_filtered_to(&dir.path().join("x.csv")).is_err());
    }
}
