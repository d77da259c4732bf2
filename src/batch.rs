//! Batch Input
//!
//! Loads measurement rows from CSV with Polars. Column names follow the public
//! crop recommendation dataset (`N`, `P`, `K`, `temperature`, `humidity`,
//! `ph`); other columns such as `rainfall` or `label` are ignored.

use crate::error::InputError;
use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// CSV column for each feature, in pipeline order
pub const CSV_COLUMNS: [&str; FEATURE_COUNT] = ["N", "P", "K", "temperature", "humidity", "ph"];

/// Read every row of a measurements CSV
///
/// A row with an empty or non-finite cell yields an `InputError` for that row
/// only; structural problems (unreadable file, missing column) fail the whole
/// load.
pub fn load_measurements(path: &Path) -> Result<Vec<Result<FeatureVector, InputError>>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load measurements CSV: {:?}", path))?;

    measurements_from_frame(&df)
}

/// Extract feature vectors from an already-loaded frame
pub fn measurements_from_frame(df: &DataFrame) -> Result<Vec<Result<FeatureVector, InputError>>> {
    let mut columns: Vec<Float64Chunked> = Vec::with_capacity(FEATURE_COUNT);
    for name in CSV_COLUMNS {
        let column = df
            .column(name)
            .with_context(|| format!("Column '{}' not found", name))?
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' is not numeric", name))?;
        let values = column
            .f64()
            .with_context(|| format!("Column '{}' is not numeric", name))?
            .clone();
        columns.push(values);
    }

    let rows = (0..df.height())
        .map(|idx| {
            let mut values = [0.0; FEATURE_COUNT];
            for (i, column) in columns.iter().enumerate() {
                values[i] = column
                    .get(idx)
                    .ok_or(InputError::MissingField(FEATURE_NAMES[i]))?;
            }
            FeatureVector::from_array(values)
        })
        .collect();

    Ok(rows)
}
