//! Filter view builder for the merged (final) table
//!
//! A [`FilterSelection`] names, for each of the five filterable columns, the
//! set of values the user kept. [`apply_filters`] keeps exactly the rows whose
//! value in every filter column is in that column's set.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::constants::columns;
use crate::data::source::column_as_string;
use crate::error::Result;

/// The columns of the final table that have a multi-select control
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilterColumn {
    #[serde(rename = "Provider_Type")]
    ProviderType,
    #[serde(rename = "Receiver_Type")]
    ReceiverType,
    #[serde(rename = "Status")]
    Status,
    #[serde(rename = "Meal_Type")]
    MealType,
    #[serde(rename = "Provider_City")]
    ProviderCity,
}

impl FilterColumn {
    pub const ALL: [FilterColumn; 5] = [
        FilterColumn::ProviderType,
        FilterColumn::ReceiverType,
        FilterColumn::Status,
        FilterColumn::MealType,
        FilterColumn::ProviderCity,
    ];

    /// Column name in the final table
    pub fn column_name(self) -> &'static str {
        match self {
            FilterColumn::ProviderType => columns::PROVIDER_TYPE,
            FilterColumn::ReceiverType => columns::RECEIVER_TYPE,
            FilterColumn::Status => columns::STATUS,
            FilterColumn::MealType => columns::MEAL_TYPE,
            FilterColumn::ProviderCity => columns::PROVIDER_CITY,
        }
    }

    /// Label of the multi-select control
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::ProviderType => "Select Provider Type",
            FilterColumn::ReceiverType => "Select Receiver Type",
            FilterColumn::Status => "Select Status",
            FilterColumn::MealType => "Select Meal Type",
            FilterColumn::ProviderCity => "Select Provider City",
        }
    }
}

/// Distinct values observed in each filter column at load time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    values: BTreeMap<FilterColumn, Vec<String>>,
}

impl FilterOptions {
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let mut values = BTreeMap::new();
        for column in FilterColumn::ALL {
            let distinct: BTreeSet<String> = column_as_string(df, "final", column.column_name())?
                .into_iter()
                .collect();
            values.insert(column, distinct.into_iter().collect());
        }
        Ok(Self { values })
    }

    /// Options for one control, sorted
    pub fn values(&self, column: FilterColumn) -> &[String] {
        self.values.get(&column).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Selected value set per filter column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    selected: BTreeMap<FilterColumn, BTreeSet<String>>,
}

impl FilterSelection {
    /// Every column selects all of its observed values
    pub fn select_all(options: &FilterOptions) -> Self {
        let selected = FilterColumn::ALL
            .iter()
            .map(|&column| (column, options.values(column).iter().cloned().collect()))
            .collect();
        Self { selected }
    }

    pub fn selected(&self, column: FilterColumn) -> Option<&BTreeSet<String>> {
        self.selected.get(&column)
    }

    pub fn is_selected(&self, column: FilterColumn, value: &str) -> bool {
        self.selected
            .get(&column)
            .map(|set| set.contains(value))
            .unwrap_or(false)
    }

    /// Replace the selected set of one column
    pub fn set(&mut self, column: FilterColumn, values: impl IntoIterator<Item = String>) {
        self.selected.insert(column, values.into_iter().collect());
    }

    /// Add or remove a single value
    pub fn toggle(&mut self, column: FilterColumn, value: &str) {
        let set = self.selected.entry(column).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    /// True when every column selects every observed value
    pub fn is_everything(&self, options: &FilterOptions) -> bool {
        FilterColumn::ALL.iter().all(|&column| {
            options
                .values(column)
                .iter()
                .all(|value| self.is_selected(column, value))
        })
    }
}

/// Keep the rows whose filter-column values all lie in the selection.
///
/// A column with no entry in `selection` (or an empty set) matches nothing.
/// Row order is preserved.
pub fn apply_filters(df: &DataFrame, selection: &FilterSelection) -> Result<DataFrame> {
    profiling::scope!("apply_filters");

    let mut mask = vec![true; df.height()];
    for column in FilterColumn::ALL {
        let values = column_as_string(df, "final", column.column_name())?;
        let empty = BTreeSet::new();
        let allowed = selection.selected(column).unwrap_or(&empty);
        for (keep, value) in mask.iter_mut().zip(&values) {
            *keep = *keep && allowed.contains(value);
        }
    }

    let mask = BooleanChunked::from_slice("mask".into(), &mask);
    let filtered = df.filter(&mask)?;
    tracing::debug!(rows = filtered.height(), of = df.height(), "filtered view rebuilt");
    Ok(filtered)
}
