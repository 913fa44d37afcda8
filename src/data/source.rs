use chrono::{DateTime, NaiveDateTime, Timelike};
use polars::prelude::*;
use std::path::{Path, PathBuf};

use super::schema::TableKind;
use crate::constants::{analysis::INFER_SCHEMA_ROWS, columns};
use crate::error::{DashboardError, Result};

/// Timestamp layouts accepted when deriving the claim hour
const TIMESTAMP_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M",
];

/// Table wraps one loaded CSV as a materialized Polars DataFrame
#[derive(Clone)]
pub struct Table {
    kind: TableKind,
    df: DataFrame,
    file_path: Option<PathBuf>,
}

impl Table {
    /// Load a CSV file and check it carries the columns `kind` needs
    pub fn load(kind: TableKind, path: &Path) -> Result<Self> {
        profiling::scope!("Table::load");

        if !path.is_file() {
            return Err(DashboardError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .finish()?
            .collect()?;

        tracing::debug!(table = kind.name(), rows = df.height(), cols = df.width(), "csv parsed");

        Self::from_dataframe(kind, df, Some(path.to_path_buf()))
    }

    /// Build a table from an already-loaded DataFrame.
    ///
    /// Runs the same post-processing and validation as [`Table::load`].
    pub fn from_dataframe(kind: TableKind, mut df: DataFrame, path: Option<PathBuf>) -> Result<Self> {
        if kind == TableKind::Final {
            derive_hour_column(&mut df)?;
        }

        let table = Self {
            kind,
            df,
            file_path: path,
        };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<()> {
        for &column in self.kind.required_columns() {
            if self.df.column(column).is_err() {
                return Err(DashboardError::missing_column(self.kind.name(), column));
            }
        }
        Ok(())
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Get a reference to the materialized DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Get the number of rows
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Get the file path
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// First `n` rows, for the preview tables
    pub fn head(&self, n: usize) -> DataFrame {
        self.df.head(Some(n))
    }
}

/// Get all column names of a frame
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Get column values as a Series
pub fn column_series<'a>(df: &'a DataFrame, table: &str, col: &str) -> Result<&'a Series> {
    df.column(col)
        .map(|c| c.as_materialized_series())
        .map_err(|_| DashboardError::missing_column(table, col))
}

/// Get a column's values rendered as strings.
/// Nulls become the empty string.
pub fn column_as_string(df: &DataFrame, table: &str, col: &str) -> Result<Vec<String>> {
    let series = column_series(df, table, col)?;
    let as_str = series.cast(&DataType::String)?;
    let ca = as_str.str()?;
    Ok(ca
        .into_iter()
        .map(|opt| opt.unwrap_or("").to_string())
        .collect())
}

/// Get a column's numeric values.
/// Nulls stay `None`; a column that cannot be cast to a number is an error.
pub fn column_as_f64(df: &DataFrame, table: &str, col: &str) -> Result<Vec<Option<f64>>> {
    let series = column_series(df, table, col)?;
    let numeric = matches!(
        series.dtype(),
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
            | DataType::Null
    );
    if !numeric {
        return Err(DashboardError::TypeConversion(format!(
            "column '{}' has type {} but a number was expected",
            col,
            series.dtype()
        )));
    }
    let cast = series.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

/// One cell as table text. Nulls and out-of-range rows are empty.
pub fn cell_text(series: &Series, row: usize) -> String {
    match series.get(row) {
        Ok(AnyValue::Null) | Err(_) => String::new(),
        Ok(AnyValue::String(s)) => s.to_string(),
        Ok(AnyValue::StringOwned(s)) => s.to_string(),
        Ok(value) => value.to_string(),
    }
}

/// Parse the hour of day out of a textual timestamp
pub fn parse_hour(s: &str) -> Option<u32> {
    let trimmed = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|dt| dt.hour())
}

/// Add an `Hour` column derived from `Timestamp` when the file has none
fn derive_hour_column(df: &mut DataFrame) -> Result<()> {
    if df.column(columns::HOUR).is_ok() {
        return Ok(());
    }
    let Ok(timestamp) = df.column(columns::TIMESTAMP) else {
        // Validation reports the missing Hour column
        return Ok(());
    };
    let timestamp = timestamp.as_materialized_series().clone();

    let hours: Vec<Option<i64>> = match timestamp.dtype() {
        DataType::Datetime(unit, _) => {
            let per_second: i64 = match unit {
                TimeUnit::Nanoseconds => 1_000_000_000,
                TimeUnit::Microseconds => 1_000_000,
                TimeUnit::Milliseconds => 1_000,
            };
            timestamp
                .datetime()?
                .into_iter()
                .map(|opt| {
                    opt.and_then(|ts| DateTime::from_timestamp(ts.div_euclid(per_second), 0))
                        .map(|dt| dt.hour() as i64)
                })
                .collect()
        }
        DataType::String => timestamp
            .str()?
            .into_iter()
            .map(|opt| opt.and_then(parse_hour).map(|h| h as i64))
            .collect(),
        other => {
            return Err(DashboardError::TypeConversion(format!(
                "cannot derive hour from a {} timestamp column",
                other
            )));
        }
    };

    let unparsed = hours.iter().filter(|h| h.is_none()).count();
    if unparsed > 0 {
        tracing::warn!(unparsed, "timestamps without a recognisable time of day");
    }

    df.with_column(Series::new(columns::HOUR.into(), hours))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_table_csv_loading() {
        let file = write_csv(&[
            "Provider_ID,Name,Type,City",
            "1,Gonzales Ltd,Restaurant,New Jessica",
            "2,Campbell Inc,Supermarket,East Sheena",
        ]);

        let table = Table::load(TableKind::Providers, file.path()).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(
            column_names(table.dataframe()),
            vec!["Provider_ID", "Name", "Type", "City"]
        );

        let types = column_as_string(table.dataframe(), "providers", "Type").unwrap();
        assert_eq!(types, vec!["Restaurant", "Supermarket"]);

        let ids = column_as_f64(table.dataframe(), "providers", "Provider_ID").unwrap();
        assert_eq!(ids, vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_missing_required_column() {
        let file = write_csv(&["Receiver_ID,Name", "1,Donald Gomez"]);

        match Table::load(TableKind::Receivers, file.path()) {
            Err(DashboardError::ColumnNotFound { table, column }) => {
                assert_eq!(table, "receivers");
                assert_eq!(column, "Type");
            }
            other => panic!("expected ColumnNotFound, got {:?}", other.map(|t| t.height())),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Table::load(TableKind::Claims, Path::new("/nonexistent/claims_data.csv"))
            .err()
            .unwrap();
        assert!(matches!(err, DashboardError::MissingFile { .. }));
    }

    #[test]
    fn test_hour_derived_from_timestamp() {
        let file = write_csv(&[
            "Claim_ID,Status,Timestamp,Provider_ID,Provider_Name,Provider_Type,Provider_City,Receiver_Name,Receiver_Type,Food_Name,Meal_Type,Quantity,Days_To_Expiry",
            "1,Completed,2025-03-05 05:43:00,7,Acme,Restaurant,Springfield,Ann,NGO,Rice,Lunch,5,2",
            "2,Pending,not a time,7,Acme,Restaurant,Springfield,Bob,Shelter,Bread,Dinner,3,-1",
        ]);

        let table = Table::load(TableKind::Final, file.path()).unwrap();
        let hours = column_as_f64(table.dataframe(), "final", "Hour").unwrap();
        assert_eq!(hours, vec![Some(5.0), None]);
    }

    #[test]
    fn test_string_column_is_not_numeric() {
        let df = df!("Quantity" => ["many", "few"]).unwrap();
        let err = column_as_f64(&df, "final", "Quantity").err().unwrap();
        assert!(matches!(err, DashboardError::TypeConversion(_)));
    }

    #[test]
    fn test_parse_hour_formats() {
        assert_eq!(parse_hour("2025-03-05 17:26:00"), Some(17));
        assert_eq!(parse_hour("2025-03-05T08:00:00.250"), Some(8));
        assert_eq!(parse_hour("yesterday"), None);
    }

    #[test]
    fn test_cell_text() {
        let df = df!(
            "Food_Name" => ["Rice", "Bread"],
            "Quantity" => [Some(5i64), None],
        )
        .unwrap();
        let names = column_series(&df, "t", "Food_Name").unwrap();
        let quantity = column_series(&df, "t", "Quantity").unwrap();
        assert_eq!(cell_text(names, 1), "Bread");
        assert_eq!(cell_text(quantity, 0), "5");
        assert_eq!(cell_text(quantity, 1), "");
        assert_eq!(cell_text(quantity, 7), "");
    }
}
