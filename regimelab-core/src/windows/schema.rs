//! Input-table contract for the windowing engine.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Names of the four required input columns.
///
/// Defaults match the panel simulator's output; callers windowing a
/// foreign table can rename without reshaping it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowColumns {
    pub id: String,
    pub time: String,
    pub price: String,
    pub regime: String,
}

impl Default for WindowColumns {
    fn default() -> Self {
        Self {
            id: "market_id".to_string(),
            time: "t".to_string(),
            price: "price".to_string(),
            regime: "regime".to_string(),
        }
    }
}

impl WindowColumns {
    pub fn required(&self) -> [&str; 4] {
        [&self.id, &self.time, &self.price, &self.regime]
    }
}

/// Errors at the windowing boundary. All fail fast; none are retried.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("column {column} has an incompatible type: {source}")]
    ColumnType {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("window length must be positive")]
    ZeroWindowLength,

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Check that every required column is present, reporting all absentees
/// at once rather than the first.
pub fn validate_columns(df: &DataFrame, columns: &WindowColumns) -> Result<(), WindowError> {
    let schema = df.schema();
    let missing: Vec<String> = columns
        .required()
        .into_iter()
        .filter(|name| !schema.contains(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(WindowError::MissingColumns(missing))
    }
}
