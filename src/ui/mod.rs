mod charts;
mod data_table;
mod final_tab;
mod help_dialog;
mod palette;
mod tabs;
mod toolbar;

pub use final_tab::render_final_tab;
pub use help_dialog::render_help_dialog;
pub use tabs::{render_claims_tab, render_foods_tab, render_providers_tab, render_receivers_tab};
pub use toolbar::render_toolbar;
