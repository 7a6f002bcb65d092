//! Measurement store access
//!
//! This module describes the single read the pipeline issues against the
//! benchmark store and the adapters that can answer it.

pub mod json;
pub mod query;
pub mod sqlite;

use crate::config::Config;
use crate::core::error::{BenchvizError, Result};
use crate::core::types::MeasurementRow;

// Re-export commonly used items
pub use json::JsonFileStore;
pub use query::RowFilterQuery;
pub use sqlite::SqliteStore;

/// A source able to answer a [`RowFilterQuery`] with measurement rows.
pub trait MeasurementSource {
    /// Fetch every row matching the query. An empty result is not an error.
    fn fetch(&self, query: &RowFilterQuery) -> Result<Vec<MeasurementRow>>;

    /// Short human-readable description of where rows come from
    fn describe(&self) -> String;
}

/// Rows held in memory, filtered like any other store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Vec<MeasurementRow>,
}

impl MemoryStore {
    pub fn new(rows: Vec<MeasurementRow>) -> Self {
        Self { rows }
    }
}

impl MeasurementSource for MemoryStore {
    fn fetch(&self, query: &RowFilterQuery) -> Result<Vec<MeasurementRow>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| query.matches(row.position_id))
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        format!("memory:{} rows", self.rows.len())
    }
}

/// Build the source named by the configuration
pub fn source_from_config(config: &Config) -> Result<Box<dyn MeasurementSource>> {
    match (&config.database, &config.input_json) {
        (Some(_), Some(_)) => Err(BenchvizError::Config(
            "Both a database and a JSON export are configured. Expected only one data source."
                .to_string(),
        )),
        (Some(database), None) => Ok(Box::new(SqliteStore::new(database))),
        (None, Some(input_json)) => Ok(Box::new(JsonFileStore::new(input_json))),
        (None, None) => Err(BenchvizError::Config(
            "No data source configured. Use --db <FILE> or --json <FILE>.".to_string(),
        )),
    }
}
