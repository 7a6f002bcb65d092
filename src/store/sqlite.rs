use std::path::{Path, PathBuf};

use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};

use crate::core::error::{BenchvizError, Result};
use crate::core::types::MeasurementRow;
use crate::store::MeasurementSource;
use crate::store::query::RowFilterQuery;

/// Read-only access to the SQLite database written by the benchmark runner.
///
/// The connection is opened inside [`MeasurementSource::fetch`] and closed
/// when the fetch returns, on success and on error alike.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection> {
        if !self.path.exists() {
            return Err(BenchvizError::store(format!(
                "database '{}' does not exist",
                self.path.display()
            )));
        }

        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| BenchvizError::StoreUnavailable {
            message: format!("could not open '{}'", self.path.display()),
            source: Some(e),
        })
    }
}

impl MeasurementSource for SqliteStore {
    fn fetch(&self, query: &RowFilterQuery) -> Result<Vec<MeasurementRow>> {
        let conn = self.open()?;
        let sql = query.sql();
        debug!("Executing: {sql}");

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| BenchvizError::StoreUnavailable {
                message: "could not prepare measurement query".to_string(),
                source: Some(e),
            })?;

        let rows = stmt
            .query_map([], read_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}

// The position column is the filter column, so it is read strictly; every
// other column is read leniently and checked by aggregation.
fn read_row(row: &Row<'_>) -> rusqlite::Result<MeasurementRow> {
    Ok(MeasurementRow {
        searcher_id: integer_value(row.get_ref(0)?),
        engine_name: text_value(row.get_ref(1)?),
        position_id: row.get(2)?,
        depth: integer_value(row.get_ref(3)?),
        entry_count: integer_value(row.get_ref(4)?),
        avg_duration_nanos: real_value(row.get_ref(5)?),
    })
}

/// Integer stored in a column, or `None` for NULL, non-numeric values and
/// reals that are fractional or outside the `i64` range
fn integer_value(value: ValueRef<'_>) -> Option<i64> {
    // 2^63 as f64; i64::MAX itself is not representable
    const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
    match value {
        ValueRef::Integer(i) => Some(i),
        ValueRef::Real(f) if f.fract() == 0.0 && f >= -I64_UPPER && f < I64_UPPER => {
            Some(f as i64)
        }
        _ => None,
    }
}

/// UTF-8 text stored in a column, or `None` for NULL and non-text values
fn text_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().map(str::to_string),
        _ => None,
    }
}

/// Number stored in a column, or `None` for NULL and non-numeric values
fn real_value(value: ValueRef<'_>) -> Option<f64> {
    match value {
        ValueRef::Integer(i) => Some(i as f64),
        ValueRef::Real(f) => Some(f),
        _ => None,
    }
}
