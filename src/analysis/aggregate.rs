//! Group-by aggregates behind the bar, line and histogram panels
//!
//! Aggregation runs through Polars' lazy group-by. The results are then
//! reshaped into [`GroupedBars`] or [`LineSeries`] values that the chart
//! widgets draw without touching the DataFrame again.

use polars::prelude::*;

use crate::constants::columns::*;
use crate::data::source::{column_as_f64, column_as_string, column_series};
use crate::error::Result;

/// Bars of one colour in a grouped or stacked bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    /// One value per x position, 0.0 where the group is absent
    pub values: Vec<f64>,
}

/// Chart-ready data for a bar chart with an optional colour split
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupedBars {
    pub x_labels: Vec<String>,
    /// Plot x coordinate of each label: the index for categorical axes,
    /// the value itself for numeric axes
    pub x_values: Vec<f64>,
    pub series: Vec<BarSeries>,
}

impl GroupedBars {
    pub fn is_empty(&self) -> bool {
        self.x_labels.is_empty()
    }

    /// Sum of all bar heights
    pub fn total(&self) -> f64 {
        self.series.iter().flat_map(|s| s.values.iter()).sum()
    }

    /// Total height of the bars stacked at each x position
    pub fn stacked_totals(&self) -> Vec<f64> {
        (0..self.x_labels.len())
            .map(|i| self.series.iter().map(|s| s.values[i]).sum())
            .collect()
    }

    /// Keep only the series whose name passes `keep`
    pub fn retain_series(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.series.retain(|s| keep(&s.name));
    }
}

/// One coloured line of a line chart
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    /// Points sorted by x
    pub points: Vec<[f64; 2]>,
}

fn ensure_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    for name in names {
        column_series(df, "filtered", name)?;
    }
    Ok(())
}

/// Group by `keys` and evaluate `agg`; output sorted by the keys.
/// Rows with a null in any key are left out.
pub fn group_agg(df: &DataFrame, keys: &[&str], agg: Expr) -> Result<DataFrame> {
    profiling::scope!("group_agg");
    ensure_columns(df, keys)?;

    let key_exprs: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();
    let mut lf = df.clone().lazy();
    if let Some(keys_present) = key_exprs
        .iter()
        .map(|k| k.clone().is_not_null())
        .reduce(|a, b| a.and(b))
    {
        lf = lf.filter(keys_present);
    }
    let out = lf
        .group_by(key_exprs)
        .agg([agg])
        .sort(keys.to_vec(), SortMultipleOptions::default())
        .collect()?;
    Ok(out)
}

/// Sum of `value` per group
pub fn group_sum(df: &DataFrame, keys: &[&str], value: &str, alias: &str) -> Result<DataFrame> {
    ensure_columns(df, &[value])?;
    group_agg(df, keys, col(value).sum().alias(alias))
}

/// Non-null count of `counted` per group
pub fn group_count(df: &DataFrame, keys: &[&str], counted: &str, alias: &str) -> Result<DataFrame> {
    ensure_columns(df, &[counted])?;
    group_agg(df, keys, col(counted).count().alias(alias))
}

/// Mean of `value` per group
pub fn group_mean(df: &DataFrame, keys: &[&str], value: &str, alias: &str) -> Result<DataFrame> {
    ensure_columns(df, &[value])?;
    group_agg(df, keys, col(value).mean().alias(alias))
}

/// Occurrences of each non-null value, most frequent first; ties by label
pub fn value_counts(df: &DataFrame, table: &str, column: &str) -> Result<Vec<(String, u64)>> {
    column_series(df, table, column)?;
    let counted = group_agg(df, &[column], len().alias(COUNT))?
        .lazy()
        .sort(
            vec![COUNT, column],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    let labels = column_as_string(&counted, table, column)?;
    let counts = column_as_f64(&counted, table, COUNT)?;
    Ok(labels
        .into_iter()
        .zip(counts)
        .map(|(label, count)| (label, count.unwrap_or(0.0) as u64))
        .collect())
}

/// Reshape a long (x, colour, value) frame into grouped bars.
///
/// Categorical x labels and colour names keep their first-appearance order,
/// so a frame sorted by value yields bars in that order. Numeric x labels are
/// sorted by value and placed at their own coordinate.
pub fn long_to_grouped(
    df: &DataFrame,
    x_col: &str,
    color_col: Option<&str>,
    value_col: &str,
    numeric_x: bool,
) -> Result<GroupedBars> {
    let xs = column_as_string(df, "aggregate", x_col)?;
    let colors = match color_col {
        Some(c) => column_as_string(df, "aggregate", c)?,
        None => vec![value_col.to_string(); df.height()],
    };
    let values = column_as_f64(df, "aggregate", value_col)?;

    let mut x_labels: Vec<String> = Vec::new();
    for x in &xs {
        if !x_labels.contains(x) {
            x_labels.push(x.clone());
        }
    }

    let x_values: Vec<f64> = if numeric_x {
        let x_numeric = column_as_f64(df, "aggregate", x_col)?;
        let mut pairs: Vec<(String, f64)> = Vec::new();
        for (label, value) in xs.iter().zip(&x_numeric) {
            if let Some(v) = value {
                if !pairs.iter().any(|(l, _)| l == label) {
                    pairs.push((label.clone(), *v));
                }
            }
        }
        pairs.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        x_labels = pairs.iter().map(|(l, _)| l.clone()).collect();
        pairs.into_iter().map(|(_, v)| v).collect()
    } else {
        (0..x_labels.len()).map(|i| i as f64).collect()
    };

    let mut series: Vec<BarSeries> = Vec::new();
    for ((x, color), value) in xs.iter().zip(&colors).zip(&values) {
        let Some(x_idx) = x_labels.iter().position(|l| l == x) else {
            continue;
        };
        let idx = match series.iter().position(|s| &s.name == color) {
            Some(idx) => idx,
            None => {
                series.push(BarSeries {
                    name: color.clone(),
                    values: vec![0.0; x_labels.len()],
                });
                series.len() - 1
            }
        };
        series[idx].values[x_idx] += value.unwrap_or(0.0);
    }

    Ok(GroupedBars {
        x_labels,
        x_values,
        series,
    })
}

/// Reshape a long (x, colour, value) frame into one line per colour
pub fn long_to_lines(
    df: &DataFrame,
    x_col: &str,
    color_col: Option<&str>,
    value_col: &str,
) -> Result<Vec<LineSeries>> {
    let xs = column_as_f64(df, "aggregate", x_col)?;
    let ys = column_as_f64(df, "aggregate", value_col)?;
    let colors = match color_col {
        Some(c) => column_as_string(df, "aggregate", c)?,
        None => vec![value_col.to_string(); df.height()],
    };

    let mut lines: Vec<LineSeries> = Vec::new();
    for ((x, y), color) in xs.iter().zip(&ys).zip(colors) {
        let (Some(x), Some(y)) = (x, y) else {
            continue;
        };
        match lines.iter_mut().find(|l| l.name == color) {
            Some(line) => line.points.push([*x, *y]),
            None => lines.push(LineSeries {
                name: color,
                points: vec![[*x, *y]],
            }),
        }
    }
    for line in &mut lines {
        line.points
            .sort_by(|a, b| a[0].partial_cmp(&b[0]).unwrap_or(std::cmp::Ordering::Equal));
    }
    Ok(lines)
}

/// Quantity summed per (provider type, food name), largest first
pub fn quantity_by_provider_and_food(df: &DataFrame) -> Result<DataFrame> {
    let grouped = group_sum(df, &[PROVIDER_TYPE, FOOD_NAME], QUANTITY, TOTAL_QUANTITY)?;
    let sorted = grouped
        .lazy()
        .sort(
            [TOTAL_QUANTITY],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;
    Ok(sorted)
}

/// Grouped bars: provider type on x, one colour per food name
pub fn quantity_by_provider_and_food_bars(df: &DataFrame) -> Result<GroupedBars> {
    let long = quantity_by_provider_and_food(df)?;
    long_to_grouped(&long, PROVIDER_TYPE, Some(FOOD_NAME), TOTAL_QUANTITY, false)
}

/// Average quantity at each days-to-expiry value
pub fn mean_quantity_by_expiry(df: &DataFrame) -> Result<LineSeries> {
    let grouped = group_mean(df, &[DAYS_TO_EXPIRY], QUANTITY, QUANTITY)?;
    let mut lines = long_to_lines(&grouped, DAYS_TO_EXPIRY, None, QUANTITY)?;
    Ok(lines.pop().unwrap_or(LineSeries {
        name: QUANTITY.to_string(),
        points: Vec::new(),
    }))
}

/// Claim count per hour, one line per status
pub fn claims_by_hour_and_status(df: &DataFrame) -> Result<Vec<LineSeries>> {
    let grouped = group_count(df, &[HOUR, STATUS], CLAIM_ID, CLAIM_ID)?;
    long_to_lines(&grouped, HOUR, Some(STATUS), CLAIM_ID)
}

/// Provider rows per (provider type, status), for a stacked bar
pub fn providers_by_status(df: &DataFrame) -> Result<GroupedBars> {
    let grouped = group_count(df, &[PROVIDER_TYPE, STATUS], PROVIDER_ID, PROVIDER_ID)?;
    long_to_grouped(&grouped, PROVIDER_TYPE, Some(STATUS), PROVIDER_ID, false)
}

/// Quantity summed per (food name, days to expiry)
pub fn quantity_by_food_and_expiry(df: &DataFrame) -> Result<GroupedBars> {
    let grouped = group_sum(df, &[FOOD_NAME, DAYS_TO_EXPIRY], QUANTITY, QUANTITY)?;
    long_to_grouped(&grouped, DAYS_TO_EXPIRY, Some(FOOD_NAME), QUANTITY, true)
}

/// Listing count per (food type, meal type) for the food listings histogram
pub fn food_type_by_meal(df: &DataFrame) -> Result<GroupedBars> {
    let grouped = group_agg(df, &[FOOD_TYPE, MEAL_TYPE], len().alias(COUNT))?;
    long_to_grouped(&grouped, FOOD_TYPE, Some(MEAL_TYPE), COUNT, false)
}

/// Value counts of a type column as a single-series bar chart
pub fn type_distribution(df: &DataFrame, table: &str, column: &str) -> Result<GroupedBars> {
    let counts = value_counts(df, table, column)?;
    Ok(GroupedBars {
        x_values: (0..counts.len()).map(|i| i as f64).collect(),
        series: vec![BarSeries {
            name: COUNT.to_string(),
            values: counts.iter().map(|(_, c)| *c as f64).collect(),
        }],
        x_labels: counts.into_iter().map(|(label, _)| label).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::filter::tests::sample_final;

    #[test]
    fn test_group_sum_matches_ungrouped_sum() {
        let df = sample_final();
        let grouped = group_sum(&df, &[PROVIDER_TYPE, FOOD_NAME], QUANTITY, TOTAL_QUANTITY).unwrap();

        let grouped_total: f64 = column_as_f64(&grouped, "t", TOTAL_QUANTITY)
            .unwrap()
            .into_iter()
            .flatten()
            .sum();
        let raw_total: f64 = column_as_f64(&df, "t", QUANTITY)
            .unwrap()
            .into_iter()
            .flatten()
            .sum();
        assert_eq!(grouped_total, raw_total);

        let bars = quantity_by_provider_and_food_bars(&df).unwrap();
        assert_eq!(bars.total(), raw_total);
    }

    #[test]
    fn test_quantity_by_provider_and_food_sorted_desc() {
        let long = quantity_by_provider_and_food(&sample_final()).unwrap();
        let totals: Vec<f64> = column_as_f64(&long, "t", TOTAL_QUANTITY)
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(totals, vec![10.0, 7.0, 5.0, 4.0, 3.0, 2.0]);
    }

    #[test]
    fn test_value_counts_order() {
        let counts = value_counts(&sample_final(), "final", STATUS).unwrap();
        assert_eq!(
            counts,
            vec![
                ("Completed".to_string(), 4),
                ("Cancelled".to_string(), 1),
                ("Pending".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_value_counts_skips_nulls_and_breaks_ties_by_label() {
        let df = df!(
            "Status" => [Some("Pending"), None, Some("Cancelled"), None, Some("Completed"), Some("Pending")],
        )
        .unwrap();
        let counts = value_counts(&df, "claims", STATUS).unwrap();
        assert_eq!(
            counts,
            vec![
                ("Pending".to_string(), 2),
                ("Cancelled".to_string(), 1),
                ("Completed".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_value_counts_missing_column_names_table() {
        let err = value_counts(&sample_final(), "claims", "Nope").unwrap_err();
        assert_eq!(err.user_message(), "Column 'Nope' missing from claims data");
    }

    #[test]
    fn test_group_sum_drops_null_keys() {
        let df = df!(
            "Food_Name" => [Some("Rice"), None, Some("Rice")],
            "Quantity" => [2i64, 7, 3],
        )
        .unwrap();
        let grouped = group_sum(&df, &[FOOD_NAME], QUANTITY, QUANTITY).unwrap();
        assert_eq!(column_as_string(&grouped, "t", FOOD_NAME).unwrap(), vec!["Rice"]);
        assert_eq!(column_as_f64(&grouped, "t", QUANTITY).unwrap(), vec![Some(5.0)]);
    }

    #[test]
    fn test_claims_by_hour_lines() {
        let lines = claims_by_hour_and_status(&sample_final()).unwrap();
        let completed = lines.iter().find(|l| l.name == "Completed").unwrap();
        assert_eq!(completed.points, vec![[5.0, 1.0], [9.0, 1.0], [12.0, 2.0]]);
        let cancelled = lines.iter().find(|l| l.name == "Cancelled").unwrap();
        assert_eq!(cancelled.points, vec![[5.0, 1.0]]);
    }

    #[test]
    fn test_mean_quantity_by_expiry() {
        let line = mean_quantity_by_expiry(&sample_final()).unwrap();
        // -1 -> (3 + 4) / 2, 0 -> 10, 2 -> (5 + 2) / 2, 3 -> 7
        assert_eq!(line.points, vec![[-1.0, 3.5], [0.0, 10.0], [2.0, 3.5], [3.0, 7.0]]);
    }

    #[test]
    fn test_providers_by_status_stacks() {
        let bars = providers_by_status(&sample_final()).unwrap();
        assert_eq!(bars.x_labels, vec!["Grocery Store", "Restaurant", "Supermarket"]);
        assert_eq!(bars.stacked_totals(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_food_and_expiry_uses_numeric_axis() {
        let mut bars = quantity_by_food_and_expiry(&sample_final()).unwrap();
        assert_eq!(bars.x_values, vec![-1.0, 0.0, 2.0, 3.0]);
        assert_eq!(bars.x_labels, vec!["-1", "0", "2", "3"]);

        bars.retain_series(|name| name == "Bread");
        assert_eq!(bars.series.len(), 1);
        assert_eq!(bars.series[0].values, vec![7.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_type_distribution() {
        let bars = type_distribution(&sample_final(), "final", PROVIDER_TYPE).unwrap();
        assert_eq!(bars.x_labels[0], "Supermarket");
        assert_eq!(bars.series[0].values[0], 3.0);
        assert_eq!(bars.total(), 6.0);
    }

    #[test]
    fn test_missing_column_reports_error() {
        let df = sample_final().drop(QUANTITY).unwrap();
        assert!(quantity_by_provider_and_food(&df).is_err());
    }

    #[test]
    fn test_empty_view_gives_empty_chart() {
        let df = sample_final().head(Some(0));
        let bars = providers_by_status(&df).unwrap();
        assert!(bars.is_empty());
        assert!(claims_by_hour_and_status(&df).unwrap().is_empty());
    }
}
