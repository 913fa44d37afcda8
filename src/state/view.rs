//! View and navigation state

use crate::constants::analysis::{DEFAULT_PREVIEW_ROWS, DEFAULT_TOP_N};

/// Dashboard tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Claims,
    Foods,
    Providers,
    Receivers,
    Final,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Claims, Tab::Foods, Tab::Providers, Tab::Receivers, Tab::Final];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Claims => "📑 Claims Data",
            Tab::Foods => "🥗 Food Listings",
            Tab::Providers => "🏭 Providers",
            Tab::Receivers => "🙋 Receivers",
            Tab::Final => "📊 Final Data",
        }
    }

    /// Tab for a 1-based number key
    pub fn from_number(n: usize) -> Option<Tab> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// View state manages navigation and display options
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Currently shown tab
    pub active_tab: Tab,

    /// Dark mode theme toggle
    pub dark_mode: bool,

    /// Show help panel
    pub show_help: bool,

    /// Rows shown in each preview table
    pub preview_rows: usize,

    /// Rows kept by the top provider / receiver heatmaps
    pub top_n: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_tab: Tab::default(),
            dark_mode: true,
            show_help: false,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_from_number() {
        assert_eq!(Tab::from_number(1), Some(Tab::Claims));
        assert_eq!(Tab::from_number(5), Some(Tab::Final));
        assert_eq!(Tab::from_number(0), None);
        assert_eq!(Tab::from_number(6), None);
    }
}
