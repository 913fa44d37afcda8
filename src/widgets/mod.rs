//! Reusable UI widgets for the dashboard

mod filter_controls;
mod kpi_card;
pub mod multi_select;

pub use filter_controls::FilterControls;
pub use kpi_card::KpiCard;
pub use multi_select::{MultiSelect, MultiSelectAction};
