use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::core::error::{BenchvizError, Result};
use crate::core::types::MeasurementRow;
use crate::store::MeasurementSource;
use crate::store::query::RowFilterQuery;

/// Measurement rows exported to a JSON array.
///
/// Each element carries the measurement schema in snake case. Numeric fields
/// that are absent, `null`, or hold a non-numeric value are kept as missing so
/// that aggregation can report the row as malformed.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    #[serde(default)]
    searcher_id: Option<Value>,
    #[serde(default)]
    engine_name: Option<Value>,
    position_id: i64,
    #[serde(default)]
    depth: Option<Value>,
    #[serde(default)]
    entry_count: Option<Value>,
    #[serde(default)]
    avg_duration_nanos: Option<Value>,
}

impl From<JsonRow> for MeasurementRow {
    fn from(row: JsonRow) -> Self {
        MeasurementRow {
            searcher_id: row.searcher_id.as_ref().and_then(Value::as_i64),
            engine_name: row
                .engine_name
                .as_ref()
                .and_then(Value::as_str)
                .map(str::to_string),
            position_id: row.position_id,
            depth: row.depth.as_ref().and_then(Value::as_i64),
            entry_count: row.entry_count.as_ref().and_then(Value::as_i64),
            avg_duration_nanos: row.avg_duration_nanos.as_ref().and_then(Value::as_f64),
        }
    }
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MeasurementSource for JsonFileStore {
    fn fetch(&self, query: &RowFilterQuery) -> Result<Vec<MeasurementRow>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            BenchvizError::store(format!("could not read '{}': {e}", self.path.display()))
        })?;

        let rows: Vec<JsonRow> = serde_json::from_str(&content).map_err(|e| {
            BenchvizError::store(format!(
                "'{}' is not a measurement export: {e}",
                self.path.display()
            ))
        })?;

        Ok(rows
            .into_iter()
            .filter(|row| query.matches(row.position_id))
            .map(MeasurementRow::from)
            .collect())
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
