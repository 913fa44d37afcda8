//! The five tables of one dashboard session

use std::path::{Path, PathBuf};

use super::schema::TableKind;
use super::source::Table;
use crate::error::Result;

/// Where each input file lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub claims: PathBuf,
    pub foods: PathBuf,
    pub providers: PathBuf,
    pub receivers: PathBuf,
    pub final_data: PathBuf,
}

impl DataPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            claims: dir.join(TableKind::Claims.default_file()),
            foods: dir.join(TableKind::Foods.default_file()),
            providers: dir.join(TableKind::Providers.default_file()),
            receivers: dir.join(TableKind::Receivers.default_file()),
            final_data: dir.join(TableKind::Final.default_file()),
        }
    }

    pub fn get(&self, kind: TableKind) -> &Path {
        match kind {
            TableKind::Claims => &self.claims,
            TableKind::Foods => &self.foods,
            TableKind::Providers => &self.providers,
            TableKind::Receivers => &self.receivers,
            TableKind::Final => &self.final_data,
        }
    }
}

/// Read-only snapshot of all five tables
#[derive(Clone)]
pub struct Dataset {
    pub claims: Table,
    pub foods: Table,
    pub providers: Table,
    pub receivers: Table,
    pub final_data: Table,
}

impl Dataset {
    /// Load every table; the first failure aborts the load
    pub fn load(paths: &DataPaths) -> Result<Self> {
        profiling::scope!("Dataset::load");

        let dataset = Self {
            claims: Table::load(TableKind::Claims, paths.get(TableKind::Claims))?,
            foods: Table::load(TableKind::Foods, paths.get(TableKind::Foods))?,
            providers: Table::load(TableKind::Providers, paths.get(TableKind::Providers))?,
            receivers: Table::load(TableKind::Receivers, paths.get(TableKind::Receivers))?,
            final_data: Table::load(TableKind::Final, paths.get(TableKind::Final))?,
        };

        tracing::info!(
            claims = dataset.claims.height(),
            foods = dataset.foods.height(),
            providers = dataset.providers.height(),
            receivers = dataset.receivers.height(),
            final_rows = dataset.final_data.height(),
            "dataset loaded"
        );

        Ok(dataset)
    }

    pub fn table(&self, kind: TableKind) -> &Table {
        match kind {
            TableKind::Claims => &self.claims,
            TableKind::Foods => &self.foods,
            TableKind::Providers => &self.providers,
            TableKind::Receivers => &self.receivers,
            TableKind::Final => &self.final_data,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;

    /// Write a small but complete data directory
    pub(crate) fn write_fixture_dir(dir: &Path) {
        fs::write(
            dir.join("claims_data.csv"),
            "Claim_ID,Food_ID,Receiver_ID,Status,Timestamp\n\
             1,10,100,Completed,2025-03-05 05:43:00\n\
             2,11,101,Pending,2025-03-06 17:10:00\n\
             3,12,100,Cancelled,2025-03-07 09:00:00\n",
        )
        .unwrap();
        fs::write(
            dir.join("food_listings_data.csv"),
            "Food_ID,Food_Name,Quantity,Food_Type,Meal_Type\n\
             10,Rice,5,Vegetarian,Lunch\n\
             11,Bread,3,Vegan,Breakfast\n\
             12,Chicken,8,Non-Vegetarian,Dinner\n",
        )
        .unwrap();
        fs::write(
            dir.join("providers_data2.csv"),
            "Provider_ID,Name,Type,City\n\
             1,Acme Diner,Restaurant,Springfield\n\
             2,Fresh Mart,Supermarket,Shelbyville\n",
        )
        .unwrap();
        fs::write(
            dir.join("receivers_data.csv"),
            "Receiver_ID,Name,Type,City\n\
             100,Ann Lee,NGO,Springfield\n\
             101,Bob Roy,Shelter,Shelbyville\n",
        )
        .unwrap();
        fs::write(
            dir.join("full_data.csv"),
            "Claim_ID,Status,Hour,Provider_ID,Provider_Name,Provider_Type,Provider_City,Receiver_Name,Receiver_Type,Food_Name,Meal_Type,Quantity,Days_To_Expiry\n\
             1,Completed,5,1,Acme Diner,Restaurant,Springfield,Ann Lee,NGO,Rice,Lunch,5,2\n\
             2,Pending,17,1,Acme Diner,Restaurant,Springfield,Bob Roy,Shelter,Bread,Breakfast,3,-1\n\
             3,Cancelled,9,2,Fresh Mart,Supermarket,Shelbyville,Ann Lee,NGO,Chicken,Dinner,8,0\n",
        )
        .unwrap();
    }

    #[test]
    fn test_dataset_loads_all_tables() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_dir(dir.path());

        let dataset = Dataset::load(&DataPaths::in_dir(dir.path())).unwrap();
        assert_eq!(dataset.claims.height(), 3);
        assert_eq!(dataset.foods.height(), 3);
        assert_eq!(dataset.providers.height(), 2);
        assert_eq!(dataset.receivers.height(), 2);
        assert_eq!(dataset.final_data.height(), 3);
        assert_eq!(dataset.table(TableKind::Final).kind(), TableKind::Final);
    }

    #[test]
    fn test_dataset_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_dir(dir.path());
        fs::remove_file(dir.path().join("receivers_data.csv")).unwrap();

        assert!(Dataset::load(&DataPaths::in_dir(dir.path())).is_err());
    }
}
