pub mod dataset;
pub mod schema;
pub mod source;

// Re-export key types for convenience
pub use dataset::{DataPaths, Dataset};
pub use schema::TableKind;
pub use source::Table;
