//! Pure data transformations behind every panel
//!
//! Nothing in here keeps state between frames: each function takes the
//! current (filtered) DataFrame and returns chart-ready values.

pub mod aggregate;
pub mod filter;
pub mod kpi;
pub mod pivot;

pub use aggregate::{GroupedBars, LineSeries};
pub use filter::{FilterColumn, FilterOptions, FilterSelection, apply_filters};
pub use kpi::Kpis;
pub use pivot::PivotTable;
