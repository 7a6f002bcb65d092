//! Analysis and reporting
//!
//! This module turns a pivot table into human-facing reports: formatted
//! durations, grouped chart geometry, rendered charts, and structured
//! logging for the application.

pub mod chart;
pub mod duration;
pub mod layout;
pub mod logging;

// Re-export commonly used items
pub use chart::{ChartKind, ChartOptions, render_chart};
pub use duration::{DurationUnit, format_duration};
pub use layout::{AxisTick, BarGeometry, ChartLayout, GroupedChartLayout, LegendEntry};
