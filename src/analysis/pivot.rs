//! Two-dimensional pivots behind the heatmap panels
//!
//! A [`PivotTable`] is the wide form (one row per index value, one column per
//! column value). [`PivotTable::melt`] produces the long form the heatmap
//! iterates over, and [`PivotTable::from_long`] rebuilds the wide form from
//! it without double counting.

use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::aggregate::{group_count, group_sum};
use crate::constants::columns::*;
use crate::data::source::{column_as_f64, column_as_string};
use crate::error::Result;

const VALUE_ALIAS: &str = "__value";

/// How the cells of a pivot are aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotAgg {
    Sum,
    /// Non-null count of the value column
    Count,
}

/// One cell of the long form
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub row: String,
    pub column: String,
    pub value: f64,
}

/// Wide table: `values[r][c]` is the cell at `rows[r]`, `columns[c]`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PivotTable {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl PivotTable {
    /// Pivot `df` with `index` down the side and `columns` across the top.
    /// Rows and columns are sorted; absent combinations are 0.
    pub fn from_frame(
        df: &DataFrame,
        index: &str,
        columns: &str,
        values: &str,
        agg: PivotAgg,
    ) -> Result<Self> {
        profiling::scope!("PivotTable::from_frame");

        let grouped = match agg {
            PivotAgg::Sum => group_sum(df, &[index, columns], values, VALUE_ALIAS)?,
            PivotAgg::Count => group_count(df, &[index, columns], values, VALUE_ALIAS)?,
        };

        let row_keys = column_as_string(&grouped, "pivot", index)?;
        let col_keys = column_as_string(&grouped, "pivot", columns)?;
        let cells = column_as_f64(&grouped, "pivot", VALUE_ALIAS)?;

        let records = row_keys
            .into_iter()
            .zip(col_keys)
            .zip(cells)
            .map(|((row, column), value)| LongRecord {
                row,
                column,
                value: value.unwrap_or(0.0),
            });
        Ok(Self::from_long(records))
    }

    /// Build the wide form from long records; repeated cells are added up
    pub fn from_long(records: impl IntoIterator<Item = LongRecord>) -> Self {
        let records: Vec<LongRecord> = records.into_iter().collect();
        let rows: Vec<String> = records
            .iter()
            .map(|r| r.row.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let columns: Vec<String> = records
            .iter()
            .map(|r| r.column.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut values = vec![vec![0.0; columns.len()]; rows.len()];
        for record in &records {
            // Both searches succeed: the keys were collected from `records`
            if let (Ok(r), Ok(c)) = (
                rows.binary_search(&record.row),
                columns.binary_search(&record.column),
            ) {
                values[r][c] += record.value;
            }
        }

        Self {
            rows,
            columns,
            values,
        }
    }

    /// Long form, row-major
    pub fn melt(&self) -> Vec<LongRecord> {
        self.rows
            .iter()
            .zip(&self.values)
            .flat_map(|(row, cells)| {
                self.columns.iter().zip(cells).map(move |(column, &value)| LongRecord {
                    row: row.clone(),
                    column: column.clone(),
                    value,
                })
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.rows.iter().position(|x| x == row)?;
        let c = self.columns.iter().position(|x| x == column)?;
        Some(self.values[r][c])
    }

    /// Sum of each row
    pub fn row_totals(&self) -> Vec<f64> {
        self.values.iter().map(|cells| cells.iter().sum()).collect()
    }

    /// Largest and smallest cell, used to scale heatmap colours
    pub fn value_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// The `n` rows with the largest total, largest first.
    ///
    /// Ties keep label order. The returned pivot's row order is the ranking
    /// and must be kept when rendering.
    pub fn top_n_by_total(&self, n: usize) -> RankedPivot {
        let totals = self.row_totals();
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by(|&a, &b| {
            totals[b]
                .partial_cmp(&totals[a])
                .unwrap_or(Ordering::Equal)
                .then_with(|| self.rows[a].cmp(&self.rows[b]))
        });
        order.truncate(n);

        RankedPivot {
            pivot: PivotTable {
                rows: order.iter().map(|&i| self.rows[i].clone()).collect(),
                columns: self.columns.clone(),
                values: order.iter().map(|&i| self.values[i].clone()).collect(),
            },
            totals: order.iter().map(|&i| totals[i]).collect(),
        }
    }
}

/// A pivot whose rows are ranked by total, with the totals kept aside
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedPivot {
    pub pivot: PivotTable,
    pub totals: Vec<f64>,
}

/// Quantity per (food name, status)
pub fn food_quantity_by_status(df: &DataFrame) -> Result<PivotTable> {
    PivotTable::from_frame(df, FOOD_NAME, STATUS, QUANTITY, PivotAgg::Sum)
}

/// Claim rows per (provider type, receiver type)
pub fn provider_vs_receiver(df: &DataFrame) -> Result<PivotTable> {
    PivotTable::from_frame(df, PROVIDER_TYPE, RECEIVER_TYPE, PROVIDER_ID, PivotAgg::Count)
}

/// Providers with the most quantity, split by status
pub fn top_providers_by_status(df: &DataFrame, n: usize) -> Result<RankedPivot> {
    Ok(PivotTable::from_frame(df, PROVIDER_NAME, STATUS, QUANTITY, PivotAgg::Sum)?.top_n_by_total(n))
}

/// Receivers with the most quantity, split by status
pub fn top_receivers_by_status(df: &DataFrame, n: usize) -> Result<RankedPivot> {
    Ok(PivotTable::from_frame(df, RECEIVER_NAME, STATUS, QUANTITY, PivotAgg::Sum)?.top_n_by_total(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::filter::tests::sample_final;

    #[test]
    fn test_pivot_sum_fills_zero() {
        let pivot =
            PivotTable::from_frame(&sample_final(), FOOD_NAME, STATUS, QUANTITY, PivotAgg::Sum)
                .unwrap();
        assert_eq!(pivot.rows, vec!["Bread", "Fruits", "Rice", "Soup"]);
        assert_eq!(pivot.columns, vec!["Cancelled", "Completed", "Pending"]);
        assert_eq!(pivot.get("Rice", "Completed"), Some(15.0));
        assert_eq!(pivot.get("Bread", "Completed"), Some(4.0));
        assert_eq!(pivot.get("Bread", "Pending"), Some(3.0));
        assert_eq!(pivot.get("Soup", "Completed"), Some(0.0));
    }

    #[test]
    fn test_pivot_leaves_out_null_keys() {
        let df = df!(
            "Food_Name" => [Some("Rice"), None],
            "Status" => ["Completed", "Completed"],
            "Quantity" => [4i64, 9],
        )
        .unwrap();
        let pivot = PivotTable::from_frame(&df, FOOD_NAME, STATUS, QUANTITY, PivotAgg::Sum).unwrap();
        assert_eq!(pivot.rows, vec!["Rice"]);
        assert_eq!(pivot.get("Rice", "Completed"), Some(4.0));
    }

    #[test]
    fn test_pivot_count() {
        let pivot = PivotTable::from_frame(
            &sample_final(),
            PROVIDER_TYPE,
            RECEIVER_TYPE,
            PROVIDER_ID,
            PivotAgg::Count,
        )
        .unwrap();
        assert_eq!(pivot.get("Supermarket", "Shelter"), Some(2.0));
        assert_eq!(pivot.get("Restaurant", "NGO"), Some(1.0));
        assert_eq!(pivot.get("Grocery Store", "NGO"), Some(0.0));
        let total: f64 = pivot.row_totals().iter().sum();
        assert_eq!(total, 6.0);
    }

    #[test]
    fn test_melt_then_repivot_is_identity() {
        let pivot =
            PivotTable::from_frame(&sample_final(), FOOD_NAME, STATUS, QUANTITY, PivotAgg::Sum)
                .unwrap();
        let long = pivot.melt();
        assert_eq!(long.len(), pivot.rows.len() * pivot.columns.len());
        assert_eq!(PivotTable::from_long(long), pivot);
    }

    #[test]
    fn test_top_n_keeps_ranking_order() {
        let pivot = PivotTable::from_frame(
            &sample_final(),
            PROVIDER_NAME,
            STATUS,
            QUANTITY,
            PivotAgg::Sum,
        )
        .unwrap();
        // Fresh = 10 + 2 + 4, Acme = 5 + 3, Gordon = 7
        let ranked = pivot.top_n_by_total(2);
        assert_eq!(ranked.pivot.rows, vec!["Fresh", "Acme"]);
        assert_eq!(ranked.totals, vec![16.0, 8.0]);
        // The total is kept aside, not melted as a status column
        assert_eq!(ranked.pivot.columns, pivot.columns);
        assert!(ranked.pivot.melt().iter().all(|r| r.column != "Total"));
    }

    #[test]
    fn test_top_n_larger_than_rows() {
        let pivot = PivotTable::from_long(vec![
            LongRecord { row: "b".into(), column: "x".into(), value: 1.0 },
            LongRecord { row: "a".into(), column: "x".into(), value: 1.0 },
        ]);
        let ranked = pivot.top_n_by_total(30);
        assert_eq!(ranked.pivot.rows, vec!["a", "b"]);
    }

    #[test]
    fn test_value_range() {
        let pivot = PivotTable::from_long(vec![
            LongRecord { row: "a".into(), column: "x".into(), value: 4.0 },
            LongRecord { row: "b".into(), column: "y".into(), value: 9.0 },
        ]);
        assert_eq!(pivot.value_range(), (0.0, 9.0));
    }

    #[test]
    fn test_top_receivers_panel() {
        let ranked = top_receivers_by_status(&sample_final(), 30).unwrap();
        // Bob = 3 + 2 + 4, Ann = 5 + 10, Cy = 7
        assert_eq!(ranked.pivot.rows, vec!["Ann", "Bob", "Cy"]);
        assert_eq!(ranked.totals, vec![15.0, 9.0, 7.0]);
        assert_eq!(ranked.pivot.get("Bob", "Pending"), Some(3.0));
    }

    #[test]
    fn test_empty_pivot() {
        let df = sample_final().head(Some(0));
        let pivot = PivotTable::from_frame(&df, FOOD_NAME, STATUS, QUANTITY, PivotAgg::Sum).unwrap();
        assert!(pivot.is_empty());
        assert!(pivot.melt().is_empty());
    }
}
