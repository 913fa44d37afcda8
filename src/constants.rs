//! Application-wide constants and default values
//!
//! Column names, file names and layout numbers live here so the data,
//! analysis and UI layers agree on them.

/// Default input file names, relative to the data directory
pub mod files {
    pub const CLAIMS: &str = "claims_data.csv";
    pub const FOODS: &str = "food_listings_data.csv";
    pub const PROVIDERS: &str = "providers_data2.csv";
    pub const RECEIVERS: &str = "receivers_data.csv";
    pub const FINAL: &str = "full_data.csv";
}

/// Column names used by the panels
pub mod columns {
    pub const CLAIM_ID: &str = "Claim_ID";
    pub const STATUS: &str = "Status";
    pub const HOUR: &str = "Hour";
    pub const TIMESTAMP: &str = "Timestamp";
    pub const TYPE: &str = "Type";
    pub const NAME: &str = "Name";
    pub const CITY: &str = "City";
    pub const PROVIDER_ID: &str = "Provider_ID";
    pub const RECEIVER_ID: &str = "Receiver_ID";
    pub const PROVIDER_NAME: &str = "Provider_Name";
    pub const PROVIDER_TYPE: &str = "Provider_Type";
    pub const PROVIDER_CITY: &str = "Provider_City";
    pub const RECEIVER_NAME: &str = "Receiver_Name";
    pub const RECEIVER_TYPE: &str = "Receiver_Type";
    pub const FOOD_NAME: &str = "Food_Name";
    pub const FOOD_TYPE: &str = "Food_Type";
    pub const MEAL_TYPE: &str = "Meal_Type";
    pub const QUANTITY: &str = "Quantity";
    pub const DAYS_TO_EXPIRY: &str = "Days_To_Expiry";
    pub const TOTAL_QUANTITY: &str = "Total_Quantity";
    pub const COUNT: &str = "Count";
}

/// Status value counted by the "Completed Claims" indicator
pub const COMPLETED_STATUS: &str = "Completed";

/// Analysis defaults
pub mod analysis {
    /// Rows kept by the top provider / receiver heatmaps
    pub const DEFAULT_TOP_N: usize = 30;

    /// Rows shown in each table preview
    pub const DEFAULT_PREVIEW_ROWS: usize = 5;

    /// Rows scanned by the CSV reader to infer the schema
    pub const INFER_SCHEMA_ROWS: usize = 100;
}

/// UI layout defaults
pub mod layout {
    /// Left filter panel default width
    pub const FILTER_PANEL_WIDTH: f32 = 240.0;

    /// Height of a regular chart
    pub const CHART_HEIGHT: f32 = 360.0;

    /// Height of the tall top-N heatmaps
    pub const TALL_CHART_HEIGHT: f32 = 900.0;

    /// Height of one row in the data tables
    pub const TABLE_ROW_HEIGHT: f32 = 18.0;

    /// Table header row height
    pub const TABLE_HEADER_HEIGHT: f32 = 20.0;

    /// Maximum height of the scrollable filtered-dataset table
    pub const FILTERED_TABLE_HEIGHT: f32 = 320.0;

    /// Width reserved for row labels in heatmaps
    pub const HEATMAP_LABEL_WIDTH: f32 = 180.0;

    /// Diameter of the pie chart
    pub const PIE_DIAMETER: f32 = 280.0;
}

/// Configuration file defaults
pub mod config {
    /// Default file name offered when saving a filter selection
    pub const SELECTION_FILE: &str = "filter_selection.json";

    /// Default file name offered when exporting the filtered view
    pub const EXPORT_FILE: &str = "filtered_data.csv";
}
