//! Aggregation and presentation of search benchmark measurements.
//!
//! Rows are fetched for one board position from a measurement store,
//! averaged into a pivot table keyed by searcher and depth, then shown as a
//! textual report and optionally as a grouped bar chart on a logarithmic
//! duration axis.
//!
//! ```
//! use benchviz::{GroupingMode, MeasurementRow, PivotAggregator, format_duration};
//!
//! let rows = vec![
//!     MeasurementRow::new(1, "alpha", 1, 3, 100, 1000.0),
//!     MeasurementRow::new(1, "alpha", 1, 3, 100, 3000.0),
//! ];
//! let table = PivotAggregator::new(GroupingMode::ByEngineName)
//!     .aggregate(&rows)
//!     .unwrap();
//! let key = table.row_keys().next().unwrap();
//! assert_eq!(format_duration(table.get(key, 3).unwrap()).unwrap(), "2.00 µs");
//! ```

pub mod aggregate;
pub mod config;
pub mod core;
pub mod reporting;
pub mod store;
pub mod ui;

pub use aggregate::{PivotAggregator, PivotTable};
pub use config::{CliConfig, Config};
pub use crate::core::{BenchvizError, GroupingMode, Measurement, MeasurementRow, Result, RowKey};
pub use reporting::{ChartLayout, GroupedChartLayout, format_duration, render_chart};
pub use store::{JsonFileStore, MeasurementSource, RowFilterQuery, SqliteStore};
