//! Table kinds and the columns each panel relies on

use crate::constants::{columns::*, files};

/// One of the five input tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Claims,
    Foods,
    Providers,
    Receivers,
    Final,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::Claims,
        TableKind::Foods,
        TableKind::Providers,
        TableKind::Receivers,
        TableKind::Final,
    ];

    /// Short name used in error messages and logs
    pub fn name(self) -> &'static str {
        match self {
            TableKind::Claims => "claims",
            TableKind::Foods => "food listings",
            TableKind::Providers => "providers",
            TableKind::Receivers => "receivers",
            TableKind::Final => "final",
        }
    }

    /// Default file name inside the data directory
    pub fn default_file(self) -> &'static str {
        match self {
            TableKind::Claims => files::CLAIMS,
            TableKind::Foods => files::FOODS,
            TableKind::Providers => files::PROVIDERS,
            TableKind::Receivers => files::RECEIVERS,
            TableKind::Final => files::FINAL,
        }
    }

    /// Columns that must be present after loading.
    ///
    /// `Hour` is checked after it has had a chance to be derived from
    /// `Timestamp`, see [`super::source::Table::load`].
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            TableKind::Claims => &[CLAIM_ID, STATUS],
            TableKind::Foods => &[FOOD_NAME, FOOD_TYPE, MEAL_TYPE],
            TableKind::Providers => &[PROVIDER_ID, NAME, TYPE, CITY],
            TableKind::Receivers => &[RECEIVER_ID, NAME, TYPE],
            TableKind::Final => &[
                CLAIM_ID,
                STATUS,
                HOUR,
                PROVIDER_ID,
                PROVIDER_NAME,
                PROVIDER_TYPE,
                PROVIDER_CITY,
                RECEIVER_NAME,
                RECEIVER_TYPE,
                FOOD_NAME,
                MEAL_TYPE,
                QUANTITY,
                DAYS_TO_EXPIRY,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_requires_filter_columns() {
        let required = TableKind::Final.required_columns();
        for col in [PROVIDER_TYPE, RECEIVER_TYPE, STATUS, MEAL_TYPE, PROVIDER_CITY] {
            assert!(required.contains(&col), "{} should be required", col);
        }
    }

    #[test]
    fn test_default_files_are_distinct() {
        let mut names: Vec<&str> = TableKind::ALL.iter().map(|k| k.default_file()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
    }
}
