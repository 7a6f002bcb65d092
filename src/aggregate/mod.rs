//! Measurement aggregation
//!
//! This module folds flat measurement rows into the (row key × depth)
//! pivot table shared by every report.

pub mod pivot;

// Re-export commonly used items
pub use pivot::{PivotAggregator, PivotTable};
