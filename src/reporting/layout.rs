//! Grouped bar chart geometry
//!
//! Each depth gets an integer slot. Within a slot the bars of the row keys
//! sit side by side, centers offset by the bar width, in the row keys' lexicographic
//! order (the same order the legend uses). Tick `x` positions depend only on
//! the slot and the number of row keys.

use log::debug;

use crate::aggregate::PivotTable;
use crate::core::constants::defaults;
use crate::core::error::{BenchvizError, Result};
use crate::core::types::RowKey;
use crate::reporting::logging::log_warning;

/// One bar of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub row_key: RowKey,
    /// Enumeration index of the row key, shared with the legend
    pub series: usize,
    pub depth: i64,
    /// Center of the bar in slot units
    pub x: f64,
    /// Mean duration in nanoseconds
    pub height: f64,
}

/// A labeled tick on the horizontal axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub x: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub series: usize,
    pub label: String,
}

/// Everything a renderer needs to draw the grouped chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub bars: Vec<BarGeometry>,
    pub ticks: Vec<AxisTick>,
    pub legend: Vec<LegendEntry>,
    pub bar_width: f64,
}

impl ChartLayout {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Number of depth slots
    pub fn slot_count(&self) -> usize {
        self.ticks.len()
    }

    pub fn max_height(&self) -> Option<f64> {
        self.bars.iter().map(|bar| bar.height).reduce(f64::max)
    }

    pub fn min_height(&self) -> Option<f64> {
        self.bars.iter().map(|bar| bar.height).reduce(f64::min)
    }

    /// Horizontal extent covered by the bars, from the left edge of the first
    /// bar to the right edge of the last one
    pub fn x_extent(&self) -> (f64, f64) {
        if self.legend.is_empty() {
            return (0.0, 0.0);
        }
        let half = self.bar_width / 2.0;
        let last_slot = self.slot_count().saturating_sub(1) as f64;
        let last_offset = (self.legend.len() - 1) as f64 * self.bar_width;
        (-half, last_slot + last_offset + half)
    }

    /// Bars belonging to one legend entry
    pub fn series_bars(&self, series: usize) -> impl Iterator<Item = &BarGeometry> {
        self.bars.iter().filter(move |bar| bar.series == series)
    }
}

/// Lays out a [`PivotTable`] as a grouped, log-scaled bar chart.
#[derive(Debug, Clone, Copy)]
pub struct GroupedChartLayout {
    bar_width: f64,
}

impl Default for GroupedChartLayout {
    fn default() -> Self {
        Self {
            bar_width: defaults::BAR_WIDTH,
        }
    }
}

impl GroupedChartLayout {
    pub fn new(bar_width: f64) -> Result<Self> {
        if !bar_width.is_finite() || bar_width <= 0.0 {
            return Err(BenchvizError::InvalidArgument(format!(
                "Bar width {bar_width} is invalid. Expected a positive number."
            )));
        }
        Ok(Self { bar_width })
    }

    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    /// Compute bar and tick geometry.
    ///
    /// Absent cells produce no bar. A cell that is zero or negative cannot be
    /// drawn on a logarithmic axis and fails with
    /// [`BenchvizError::NonPositiveDuration`].
    pub fn layout(&self, table: &PivotTable) -> Result<ChartLayout> {
        let depths = table.depths();
        let keys: Vec<&RowKey> = table.row_keys().collect();
        let key_count = keys.len();

        if key_count as f64 * self.bar_width > 1.0 {
            log_warning(&format!(
                "{key_count} bars of width {} overflow a depth slot; groups will overlap",
                self.bar_width
            ));
        }

        let mut bars = Vec::with_capacity(table.cell_count());
        for (series, key) in keys.iter().enumerate() {
            for (slot, &depth) in depths.iter().enumerate() {
                let Some(height) = table.get(key, depth) else {
                    continue;
                };
                if height <= 0.0 {
                    return Err(BenchvizError::NonPositiveDuration {
                        row_key: key.to_string(),
                        depth,
                        value: height,
                    });
                }
                bars.push(BarGeometry {
                    row_key: (*key).clone(),
                    series,
                    depth,
                    x: slot as f64 + series as f64 * self.bar_width,
                    height,
                });
            }
        }

        let group_center = key_count.saturating_sub(1) as f64 * self.bar_width / 2.0;
        let ticks = depths
            .iter()
            .enumerate()
            .map(|(slot, depth)| AxisTick {
                x: slot as f64 + group_center,
                label: depth.to_string(),
            })
            .collect();

        let legend = keys
            .iter()
            .enumerate()
            .map(|(series, key)| LegendEntry {
                series,
                label: key.to_string(),
            })
            .collect();

        debug!(
            "Laid out {} bar(s) over {} depth slot(s)",
            bars.len(),
            depths.len()
        );

        Ok(ChartLayout {
            bars,
            ticks,
            legend,
            bar_width: self.bar_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::PivotAggregator;
    use crate::core::types::{GroupingMode, MeasurementRow};

    const EPSILON: f64 = 1e-12;

    fn table(rows: &[(&str, i64, f64)]) -> PivotTable {
        let rows: Vec<MeasurementRow> = rows
            .iter()
            .map(|&(name, depth, nanos)| MeasurementRow::new(1, name, 1, depth, 0, nanos))
            .collect();
        PivotAggregator::new(GroupingMode::ByEngineName)
            .aggregate(&rows)
            .unwrap()
    }

    #[test]
    fn test_bar_positions() {
        let table = table(&[
            ("bogo", 3, 10.0),
            ("bogo", 5, 20.0),
            ("flop", 3, 30.0),
            ("flop", 5, 40.0),
        ]);
        let layout = GroupedChartLayout::new(0.2).unwrap().layout(&table).unwrap();

        let positions: Vec<(usize, i64, f64)> = layout
            .bars
            .iter()
            .map(|bar| (bar.series, bar.depth, bar.x))
            .collect();
        let expected = [(0, 3, 0.0), (0, 5, 1.0), (1, 3, 0.2), (1, 5, 1.2)];
        assert_eq!(positions.len(), expected.len());
        for ((series, depth, x), (e_series, e_depth, e_x)) in positions.iter().zip(expected) {
            assert_eq!(*series, e_series);
            assert_eq!(*depth, e_depth);
            assert!((x - e_x).abs() < EPSILON, "bar at {x}, expected {e_x}");
        }
        assert_eq!(layout.bars[3].height, 40.0);
    }

    #[test]
    fn test_ticks_centered_under_groups() {
        let table = table(&[("a", 2, 1.0), ("b", 2, 1.0), ("c", 7, 1.0)]);
        let layout = GroupedChartLayout::new(0.2).unwrap().layout(&table).unwrap();

        assert_eq!(layout.ticks.len(), 2);
        assert!((layout.ticks[0].x - 0.2).abs() < EPSILON);
        assert!((layout.ticks[1].x - 1.2).abs() < EPSILON);
        assert_eq!(layout.ticks[0].label, "2");
        assert_eq!(layout.ticks[1].label, "7");
    }

    #[test]
    fn test_overlapping_groups_still_lay_out() {
        let table = table(&[("a", 1, 1.0), ("b", 1, 2.0), ("c", 1, 3.0)]);
        let layout = GroupedChartLayout::new(0.5).unwrap().layout(&table).unwrap();

        assert_eq!(layout.bars.len(), 3);
        assert!((layout.bars[2].x - 1.0).abs() < EPSILON);
        assert!((layout.ticks[0].x - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_absent_cells_produce_no_bar() {
        let table = table(&[("bogo", 1, 5.0), ("flop", 2, 6.0), ("flop", 3, 7.0)]);
        let layout = GroupedChartLayout::default().layout(&table).unwrap();

        assert_eq!(layout.bars.len(), table.cell_count());
        assert!(
            !layout
                .bars
                .iter()
                .any(|bar| bar.row_key.engine_name() == "bogo" && bar.depth != 1)
        );
        assert_eq!(layout.series_bars(1).count(), 2);
    }

    #[test]
    fn test_legend_matches_series_order() {
        let table = table(&[("strange", 1, 1.0), ("bogo", 1, 2.0), ("flop", 1, 3.0)]);
        let layout = GroupedChartLayout::default().layout(&table).unwrap();

        let labels: Vec<&str> = layout.legend.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["bogo", "flop", "strange"]);
        for bar in &layout.bars {
            assert_eq!(layout.legend[bar.series].label, bar.row_key.to_string());
        }
    }

    #[test]
    fn test_empty_table_gives_empty_layout() {
        let layout = GroupedChartLayout::default()
            .layout(&PivotTable::empty(GroupingMode::ByEngineName))
            .unwrap();

        assert!(layout.is_empty());
        assert!(layout.ticks.is_empty());
        assert!(layout.legend.is_empty());
        assert_eq!(layout.max_height(), None);
        assert_eq!(layout.x_extent(), (0.0, 0.0));
    }

    #[test]
    fn test_zero_cell_is_rejected() {
        let table = table(&[("bogo", 1, 5.0), ("flop", 4, 0.0)]);

        match GroupedChartLayout::default().layout(&table) {
            Err(BenchvizError::NonPositiveDuration {
                row_key,
                depth,
                value,
            }) => {
                assert_eq!(row_key, "flop");
                assert_eq!(depth, 4);
                assert_eq!(value, 0.0);
            }
            other => panic!("Expected NonPositiveDuration, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_cell_is_rejected() {
        let table = table(&[("bogo", 1, -5.0)]);
        assert!(matches!(
            GroupedChartLayout::default().layout(&table),
            Err(BenchvizError::NonPositiveDuration { .. })
        ));
    }

    #[test]
    fn test_invalid_bar_width() {
        assert!(GroupedChartLayout::new(0.0).is_err());
        assert!(GroupedChartLayout::new(-0.1).is_err());
        assert!(GroupedChartLayout::new(f64::NAN).is_err());
        assert_eq!(GroupedChartLayout::new(0.1).unwrap().bar_width(), 0.1);
    }

    #[test]
    fn test_extent_and_heights() {
        let table = table(&[("a", 1, 3.0), ("b", 1, 9.0), ("a", 2, 1.0)]);
        let layout = GroupedChartLayout::new(0.25).unwrap().layout(&table).unwrap();

        assert_eq!(layout.slot_count(), 2);
        assert_eq!(layout.x_extent(), (-0.125, 1.375));
        assert_eq!(layout.max_height(), Some(9.0));
        assert_eq!(layout.min_height(), Some(1.0));
    }
}
