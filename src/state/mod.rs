//! Application state management
//!
//! The loaded tables, the filter controls, navigation and status banners are
//! kept in separate components so each UI module borrows only what it needs.

mod filters;
mod ui;
mod view;

pub use filters::FilterState;
pub use ui::UiState;
pub use view::{Tab, ViewState};

use crate::data::{DataPaths, Dataset};

/// Main application state container
pub struct AppState {
    /// The five tables, once loaded
    pub data: Option<Dataset>,

    /// Where the tables were (or will be) loaded from
    pub paths: DataPaths,

    /// Filter controls
    pub filters: FilterState,

    /// Navigation and display options
    pub view: ViewState,

    /// Status banners
    pub ui: UiState,
}

impl AppState {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            data: None,
            paths,
            filters: FilterState::default(),
            view: ViewState::default(),
            ui: UiState::default(),
        }
    }

    /// Check if data is loaded
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Number of rows in the merged table
    pub fn final_row_count(&self) -> usize {
        self.data
            .as_ref()
            .map(|ds| ds.final_data.height())
            .unwrap_or(0)
    }
}
