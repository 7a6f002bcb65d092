use std::fmt;
use std::str::FromStr;

use crate::core::constants::grouping_names;
use crate::core::error::{BenchvizError, Result};

/// One row as answered by the measurement store.
///
/// Every field the aggregation reads is optional because the store may hold
/// NULL or wrongly typed values there; [`MeasurementRow::validate`] turns a row
/// into a [`Measurement`] or reports it as malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    /// Identity of a concrete engine configuration
    pub searcher_id: Option<i64>,
    /// Display name, shared by every configuration of one engine
    pub engine_name: Option<String>,
    /// Board position the search ran on
    pub position_id: i64,
    /// Search depth
    pub depth: Option<i64>,
    /// Number of table entries produced (informational)
    pub entry_count: Option<i64>,
    /// Average search duration in nanoseconds
    pub avg_duration_nanos: Option<f64>,
}

/// A validated benchmark measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub searcher_id: i64,
    pub engine_name: String,
    pub position_id: i64,
    pub depth: i64,
    pub entry_count: i64,
    pub avg_duration_nanos: f64,
}

/// Stands in for an unreadable searcher id or engine name in error messages
const UNKNOWN_FIELD: &str = "?";

impl MeasurementRow {
    /// Create a row with every field present.
    pub fn new(
        searcher_id: i64,
        engine_name: impl Into<String>,
        position_id: i64,
        depth: i64,
        entry_count: i64,
        avg_duration_nanos: f64,
    ) -> Self {
        Self {
            searcher_id: Some(searcher_id),
            engine_name: Some(engine_name.into()),
            position_id,
            depth: Some(depth),
            entry_count: Some(entry_count),
            avg_duration_nanos: Some(avg_duration_nanos),
        }
    }

    /// Row key as it would be displayed, with `?` for unreadable parts
    pub fn label(&self, mode: GroupingMode) -> String {
        let name = self.engine_name.as_deref().unwrap_or(UNKNOWN_FIELD);
        match mode {
            GroupingMode::ByEngineName => name.to_string(),
            GroupingMode::ByEngineIdentityAndName => match self.searcher_id {
                Some(id) => format!("{id}: {name}"),
                None => format!("{UNKNOWN_FIELD}: {name}"),
            },
        }
    }

    /// Check the fields and produce a [`Measurement`].
    ///
    /// A missing searcher id, engine name, depth, entry count or duration, or
    /// a duration that is not a finite number, yields
    /// [`BenchvizError::MalformedRow`] naming the row key under `mode` and the
    /// depth when it is known.
    pub fn validate(&self, mode: GroupingMode) -> Result<Measurement> {
        let malformed = || BenchvizError::MalformedRow {
            row_key: self.label(mode),
            depth: self.depth,
        };

        let searcher_id = self.searcher_id.ok_or_else(malformed)?;
        let engine_name = self.engine_name.clone().ok_or_else(malformed)?;
        let depth = self.depth.ok_or_else(malformed)?;
        let entry_count = self.entry_count.ok_or_else(malformed)?;
        let avg_duration_nanos = self
            .avg_duration_nanos
            .filter(|nanos| nanos.is_finite())
            .ok_or_else(malformed)?;

        Ok(Measurement {
            searcher_id,
            engine_name,
            position_id: self.position_id,
            depth,
            entry_count,
            avg_duration_nanos,
        })
    }
}

impl Measurement {
    /// Key this measurement aggregates under for the given grouping mode
    pub fn row_key(&self, mode: GroupingMode) -> RowKey {
        match mode {
            GroupingMode::ByEngineName => RowKey::Engine(self.engine_name.clone()),
            GroupingMode::ByEngineIdentityAndName => RowKey::Searcher {
                searcher_id: self.searcher_id,
                engine_name: self.engine_name.clone(),
            },
        }
    }
}

/// How measurement rows are keyed in a pivot table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroupingMode {
    /// One row per engine name; searchers sharing a name are averaged together
    #[default]
    ByEngineName,
    /// One row per (searcher id, engine name) pair
    ByEngineIdentityAndName,
}

impl GroupingMode {
    /// Name used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingMode::ByEngineName => grouping_names::ENGINE,
            GroupingMode::ByEngineIdentityAndName => grouping_names::SEARCHER,
        }
    }
}

impl FromStr for GroupingMode {
    type Err = BenchvizError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            grouping_names::ENGINE => Ok(GroupingMode::ByEngineName),
            grouping_names::SEARCHER => Ok(GroupingMode::ByEngineIdentityAndName),
            other => Err(BenchvizError::InvalidArgument(format!(
                "Unknown grouping '{other}'. Expected one of: {}, {}.",
                grouping_names::ENGINE,
                grouping_names::SEARCHER
            ))),
        }
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row key of a pivot table.
///
/// Ordering is lexicographic: by engine name, or by searcher id then engine
/// name. A single table only ever holds one of the two variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowKey {
    Engine(String),
    Searcher { searcher_id: i64, engine_name: String },
}

impl RowKey {
    pub fn engine_name(&self) -> &str {
        match self {
            RowKey::Engine(name) => name,
            RowKey::Searcher { engine_name, .. } => engine_name,
        }
    }

    pub fn searcher_id(&self) -> Option<i64> {
        match self {
            RowKey::Engine(_) => None,
            RowKey::Searcher { searcher_id, .. } => Some(*searcher_id),
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Engine(name) => write!(f, "{name}"),
            RowKey::Searcher {
                searcher_id,
                engine_name,
            } => write!(f, "{searcher_id}: {engine_name}"),
        }
    }
}
