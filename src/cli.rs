//! Command-line interface argument parsing.
//!
//! - `food-dash` reads the five CSV files from the current directory
//! - `food-dash --data-dir data/ --top-n 20`
//! - `food-dash --final merged.csv --selection filter_selection.json`

use clap::Parser;
use std::path::PathBuf;

use crate::constants::analysis::{DEFAULT_PREVIEW_ROWS, DEFAULT_TOP_N};
use crate::data::DataPaths;
use crate::error::{DashboardError, Result};
use crate::state::ViewState;

/// Interactive dashboard for the local food wastage management dataset.
#[derive(Parser, Debug)]
#[command(name = "food-dash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the five CSV files
    #[arg(short, long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Claims file (defaults to claims_data.csv in the data directory)
    #[arg(long)]
    pub claims: Option<PathBuf>,

    /// Food listings file
    #[arg(long)]
    pub foods: Option<PathBuf>,

    /// Providers file
    #[arg(long)]
    pub providers: Option<PathBuf>,

    /// Receivers file
    #[arg(long)]
    pub receivers: Option<PathBuf>,

    /// Merged claims/providers/receivers/foods file
    #[arg(long = "final")]
    pub final_data: Option<PathBuf>,

    /// Rows kept by the top provider and receiver heatmaps
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Rows shown in each preview table
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,

    /// Start with the light theme
    #[arg(long)]
    pub light: bool,

    /// Filter selection (JSON) applied after loading
    #[arg(long)]
    pub selection: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Input paths: the data directory defaults, overridden file by file
    pub fn data_paths(&self) -> DataPaths {
        let mut paths = DataPaths::in_dir(&self.data_dir);
        let overrides = [
            (&mut paths.claims, &self.claims),
            (&mut paths.foods, &self.foods),
            (&mut paths.providers, &self.providers),
            (&mut paths.receivers, &self.receivers),
            (&mut paths.final_data, &self.final_data),
        ];
        for (path, custom) in overrides {
            if let Some(custom) = custom {
                *path = custom.clone();
            }
        }
        paths
    }

    /// Initial view options
    pub fn view_state(&self) -> Result<ViewState> {
        if self.top_n == 0 {
            return Err(DashboardError::Config("--top-n must be at least 1".to_string()));
        }
        Ok(ViewState {
            dark_mode: !self.light,
            preview_rows: self.preview_rows,
            top_n: self.top_n,
            ..ViewState::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["food-dash"]);
        let paths = cli.data_paths();
        assert_eq!(paths.claims, Path::new(".").join("claims_data.csv"));
        assert_eq!(paths.final_data, Path::new(".").join("full_data.csv"));

        let view = cli.view_state().unwrap();
        assert!(view.dark_mode);
        assert_eq!(view.top_n, 30);
        assert_eq!(view.preview_rows, 5);
        assert!(cli.selection.is_none());
    }

    #[test]
    fn test_file_overrides() {
        let cli = Cli::parse_from([
            "food-dash",
            "--data-dir",
            "data",
            "--final",
            "/tmp/merged.csv",
            "--top-n",
            "10",
            "--light",
        ]);
        let paths = cli.data_paths();
        assert_eq!(paths.final_data, PathBuf::from("/tmp/merged.csv"));
        assert_eq!(paths.receivers, Path::new("data").join("receivers_data.csv"));

        let view = cli.view_state().unwrap();
        assert!(!view.dark_mode);
        assert_eq!(view.top_n, 10);
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let cli = Cli::parse_from(["food-dash", "--top-n", "0"]);
        assert!(matches!(cli.view_state(), Err(DashboardError::Config(_))));
    }
}
