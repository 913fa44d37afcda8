//! Summary indicators over the filtered view

use polars::prelude::*;

use crate::constants::{COMPLETED_STATUS, columns};
use crate::data::source::{column_as_f64, column_as_string, column_series};
use crate::error::Result;

/// The three indicator cards shown above the charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Kpis {
    /// Distinct claim identifiers
    pub total_claims: usize,
    /// Rows whose status is exactly "Completed"
    pub completed_claims: usize,
    /// Sum of the quantity column, truncated to an integer
    pub total_quantity: i64,
}

impl Kpis {
    pub fn compute(df: &DataFrame) -> Result<Self> {
        profiling::scope!("Kpis::compute");

        let total_claims = column_series(df, "final", columns::CLAIM_ID)?
            .drop_nulls()
            .n_unique()?;

        let completed_claims = column_as_string(df, "final", columns::STATUS)?
            .iter()
            .filter(|status| status.as_str() == COMPLETED_STATUS)
            .count();

        let total_quantity = column_as_f64(df, "final", columns::QUANTITY)?
            .into_iter()
            .flatten()
            .sum::<f64>() as i64;

        Ok(Self {
            total_claims,
            completed_claims,
            total_quantity,
        })
    }

    /// Plain-text summary for the clipboard
    pub fn summary(&self) -> String {
        format!(
            "Total Claims: {}\nCompleted Claims: {}\nTotal Quantity: {}",
            self.total_claims, self.completed_claims, self.total_quantity
        )
    }
}
