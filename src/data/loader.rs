//! CSV Data Loader Module
//! Handles CSV file loading and record extraction using Polars.

use super::model::{Dataset, Record};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Row {row}: column '{column}' is missing or not a finite number")]
    InvalidValue { row: usize, column: String },
    #[error("No usable rows in CSV")]
    Empty,
}

/// What to do with rows whose numeric cells fail coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Drop the row and keep going.
    #[default]
    Skip,
    /// Abort the load at the first bad row.
    Fail,
}

/// Names of the columns a record is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub length: String,
    pub width: String,
    pub label: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            length: "PetalLength".to_string(),
            width: "PetalWidth".to_string(),
            label: "Species".to_string(),
        }
    }
}

/// Loads a CSV file into a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    columns: ColumnNames,
    policy: RowPolicy,
}

impl DataLoader {
    pub fn new(columns: ColumnNames, policy: RowPolicy) -> Self {
        Self { columns, policy }
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(&self, path: &Path) -> Result<Dataset, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        debug!(rows = df.height(), columns = df.width(), "CSV parsed");
        let dataset = self.dataset_from_frame(&df)?;
        info!(
            records = dataset.len(),
            labels = dataset.labels().len(),
            "Loaded {}",
            path.display()
        );
        Ok(dataset)
    }

    /// Build records from an already parsed frame.
    pub fn dataset_from_frame(&self, df: &DataFrame) -> Result<Dataset, LoaderError> {
        let length = Self::numeric_column(df, &self.columns.length)?;
        let width = Self::numeric_column(df, &self.columns.width)?;
        let length = length.f64()?;
        let width = width.f64()?;

        let labels = df
            .column(&self.columns.label)
            .map_err(|_| LoaderError::MissingColumn(self.columns.label.clone()))?
            .cast(&DataType::String)?;
        let labels = labels.as_materialized_series().str()?;

        let mut records = Vec::with_capacity(df.height());
        let mut skipped = 0usize;

        for i in 0..df.height() {
            let cells = (
                length.get(i).filter(|v| v.is_finite()),
                width.get(i).filter(|v| v.is_finite()),
                labels.get(i),
            );
            match cells {
                (Some(l), Some(w), Some(label)) => records.push(Record::new(l, w, label)),
                (l, w, _) => {
                    if self.policy == RowPolicy::Fail {
                        let column = if l.is_none() {
                            &self.columns.length
                        } else if w.is_none() {
                            &self.columns.width
                        } else {
                            &self.columns.label
                        };
                        // Header is line 1 of the file.
                        return Err(LoaderError::InvalidValue {
                            row: i + 2,
                            column: column.clone(),
                        });
                    }
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            warn!(skipped, "Dropped rows with missing or non-numeric values");
        }
        if records.is_empty() {
            return Err(LoaderError::Empty);
        }

        Ok(Dataset::from_records(records))
    }

    fn numeric_column(df: &DataFrame, name: &str) -> Result<Column, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        Ok(column.cast(&DataType::Float64)?)
    }
}
