use crate::app::Dashboard;
use eframe::egui;

/// Render the compact action toolbar under the title
pub fn render_toolbar(app: &mut Dashboard, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        if ui.button("📂").on_hover_text("Open data directory").clicked() {
            app.open_data_dir();
        }
        if ui.button("🔄").on_hover_text("Reload data (Ctrl+R)").clicked() {
            app.reload();
        }

        // Loaded file when there is one, configured path otherwise
        let final_path = app
            .state
            .data
            .as_ref()
            .and_then(|ds| ds.final_data.file_path())
            .unwrap_or(app.state.paths.final_data.as_path())
            .to_path_buf();
        if let Some(dir) = final_path.parent() {
            let dir = dir.display().to_string();
            ui.label(format!("📁 {}", if dir.is_empty() { "." } else { dir.as_str() }))
                .on_hover_text(final_path.display().to_string());
        }

        ui.separator();

        let has_data = app.state.has_data();
        if ui
            .add_enabled(has_data, egui::Button::new("💾"))
            .on_hover_text("Export filtered data as CSV")
            .clicked()
        {
            app.export_filtered();
        }
        if ui
            .add_enabled(has_data, egui::Button::new("⚙"))
            .on_hover_text("Save filter selection")
            .clicked()
        {
            app.save_selection();
        }
        if ui
            .add_enabled(has_data, egui::Button::new("📥"))
            .on_hover_text("Load filter selection")
            .clicked()
        {
            app.load_selection();
        }

        ui.separator();
        if ui
            .button(if app.state.view.dark_mode { "🌙" } else { "☀" })
            .on_hover_text("Toggle theme (T)")
            .clicked()
        {
            app.state.view.dark_mode = !app.state.view.dark_mode;
        }
        if ui.button("❓").on_hover_text("Help (F1)").clicked() {
            app.state.view.show_help = !app.state.view.show_help;
        }

        if has_data {
            ui.separator();
            ui.label(format!("Rows: {}", app.state.final_row_count()));
        }
    });
}
