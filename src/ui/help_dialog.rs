use crate::app::Dashboard;

pub fn render_help_dialog(app: &mut Dashboard, ctx: &eframe::egui::Context) {
    if app.state.view.show_help {
        eframe::egui::Window::new("⌨ Keyboard Shortcuts")
            .anchor(eframe::egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .collapsible(false)
            .show(ctx, |ui| {
                ui.heading("Navigation");
                ui.label("1 - 5 - Switch tab");
                ui.label("T - Toggle dark/light theme");
                ui.label("H / F1 - Toggle help");
                ui.label("ESC - Close help");
                ui.label("Ctrl + R - Reload data");

                ui.separator();
                ui.heading("Final Data");
                ui.label("Left panel - Narrow every chart and KPI");
                ui.label("All / None - Select every or no value of a filter");
                ui.label("Hover a bar or heatmap cell - Show its value");
                ui.label(super::charts::chart_navigation_help());

                ui.separator();
                if ui.button("Close").clicked() {
                    app.state.view.show_help = false;
                }
            });
    }
}
