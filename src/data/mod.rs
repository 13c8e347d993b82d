//! Data module - CSV loading and the record model

pub mod loader;
pub mod model;

pub use loader::{ColumnNames, DataLoader, RowPolicy};
pub use model::{Dataset, Field, LabelSet};
