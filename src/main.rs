#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use tracing_subscriber::EnvFilter;

// Pure aggregations over the merged table
mod analysis;

mod app;
mod cli;

// Application constants
mod constants;

// CSV loading and schema checks
mod data;

// Error handling
mod error;

// Application state modules
mod state;

mod ui;
mod widgets;

use app::Dashboard;
use cli::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse_args();
    let view = match cli.view_state() {
        Ok(view) => view,
        Err(e) => {
            tracing::error!(error = %e, "invalid arguments");
            std::process::exit(2);
        }
    };

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = {
        puffin::set_scopes_on(true);
        let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        match puffin_http::Server::new(&addr) {
            Ok(server) => {
                tracing::info!(%addr, "puffin server listening");
                Some(server)
            }
            Err(e) => {
                tracing::warn!(error = %e, "puffin server failed to start");
                None
            }
        }
    };

    let paths = cli.data_paths();
    tracing::info!(final_data = %paths.final_data.display(), top_n = view.top_n, "starting dashboard");

    let mut dashboard = Dashboard::new(paths, view, cli.selection.clone());
    dashboard.reload();

    let options = eframe::NativeOptions::default();
    if let Err(e) = eframe::run_native(
        "Food Wastage Dashboard",
        options,
        Box::new(|_| Ok(Box::new(dashboard))),
    ) {
        tracing::error!(error = %e, "eframe exited with an error");
        std::process::exit(1);
    }
}
