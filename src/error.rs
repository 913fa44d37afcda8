//! Error types for the dashboard
//!
//! Every fallible operation in the data and analysis layers returns
//! [`Result`], so a failed load or a failed panel can be reported in the UI
//! without bringing the whole window down.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// One of the input CSV files does not exist
    #[error("Input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// Column not found in a table
    #[error("Column '{column}' not found in {table} table")]
    ColumnNotFound { table: String, column: String },

    /// Type conversion error
    #[error("Type conversion error: {0}")]
    TypeConversion(String),

    /// Configuration error (CLI or selection file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Clipboard access failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// UI-friendly error message formatting
impl DashboardError {
    /// Shorthand for a missing column error
    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        DashboardError::ColumnNotFound {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::FileIo(e) => format!("File error: {}", e),
            DashboardError::Polars(e) => format!("Data error: {}", e),
            DashboardError::Json(e) => format!("JSON error: {}", e),
            DashboardError::MissingFile { path } => {
                format!("File '{}' does not exist", path.display())
            }
            DashboardError::ColumnNotFound { table, column } => {
                format!("Column '{}' missing from {} data", column, table)
            }
            DashboardError::TypeConversion(msg) => format!("Type error: {}", msg),
            DashboardError::Config(msg) => format!("Config error: {}", msg),
            DashboardError::Clipboard(msg) => format!("Clipboard error: {}", msg),
        }
    }

    /// Get a short title for the error (for banners)
    pub fn title(&self) -> &'static str {
        match self {
            DashboardError::FileIo(_) => "File Error",
            DashboardError::Polars(_) => "Data Error",
            DashboardError::Json(_) => "JSON Error",
            DashboardError::MissingFile { .. } => "Missing File",
            DashboardError::ColumnNotFound { .. } => "Column Not Found",
            DashboardError::TypeConversion(_) => "Type Error",
            DashboardError::Config(_) => "Configuration Error",
            DashboardError::Clipboard(_) => "Clipboard Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DashboardError::missing_column("final", "Quantity");
        assert_eq!(err.user_message(), "Column 'Quantity' missing from final data");
        assert_eq!(err.title(), "Column Not Found");

        let err = DashboardError::MissingFile {
            path: PathBuf::from("data/claims_data.csv"),
        };
        assert_eq!(err.user_message(), "File 'data/claims_data.csv' does not exist");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DashboardError = io_err.into();
        assert!(matches!(err, DashboardError::FileIo(_)));
    }
}
