use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use rustc_hash::FxHashMap;

use crate::core::error::Result;
use crate::core::types::{GroupingMode, MeasurementRow, RowKey};

/// Mean search duration per (row key, depth).
///
/// A cell exists only if at least one measurement contributed to it; lookups
/// for anything else return `None`, never zero. Row keys iterate in their
/// lexicographic order.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    grouping: GroupingMode,
    rows: BTreeMap<RowKey, BTreeMap<i64, f64>>,
}

impl PivotTable {
    pub fn empty(grouping: GroupingMode) -> Self {
        Self {
            grouping,
            rows: BTreeMap::new(),
        }
    }

    pub fn grouping(&self) -> GroupingMode {
        self.grouping
    }

    /// Mean duration in nanoseconds, or `None` if nothing was measured there
    pub fn get(&self, key: &RowKey, depth: i64) -> Option<f64> {
        self.rows.get(key)?.get(&depth).copied()
    }

    pub fn row_keys(&self) -> impl Iterator<Item = &RowKey> {
        self.rows.keys()
    }

    /// Cells of one row key, by ascending depth
    pub fn row(&self, key: &RowKey) -> Option<&BTreeMap<i64, f64>> {
        self.rows.get(key)
    }

    /// Distinct depths present anywhere in the table, ascending
    pub fn depths(&self) -> Vec<i64> {
        self.rows
            .values()
            .flat_map(|cells| cells.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every present cell as `(row key, depth, mean nanoseconds)`
    pub fn cells(&self) -> impl Iterator<Item = (&RowKey, i64, f64)> {
        self.rows.iter().flat_map(|(key, cells)| {
            cells
                .iter()
                .map(move |(&depth, &nanos)| (key, depth, nanos))
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest cell value, if any
    pub fn max_value(&self) -> Option<f64> {
        self.cells().map(|(_, _, nanos)| nanos).reduce(f64::max)
    }
}

/// Contributions to one cell.
///
/// Values are summed in ascending order so the mean does not depend on the
/// order rows arrived in.
#[derive(Debug, Default)]
struct CellAccumulator {
    values: Vec<f64>,
}

impl CellAccumulator {
    fn push(&mut self, nanos: f64) {
        self.values.push(nanos);
    }

    fn mean(mut self) -> f64 {
        self.values.sort_by(f64::total_cmp);
        let sum: f64 = self.values.iter().sum();
        sum / self.values.len() as f64
    }
}

/// Folds measurement rows into a [`PivotTable`] for one grouping mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct PivotAggregator {
    grouping: GroupingMode,
}

impl PivotAggregator {
    pub fn new(grouping: GroupingMode) -> Self {
        Self { grouping }
    }

    pub fn grouping(&self) -> GroupingMode {
        self.grouping
    }

    /// Aggregate rows into a pivot table.
    ///
    /// Any malformed row fails the whole aggregation; no partial table is
    /// returned.
    pub fn aggregate<'a, I>(&self, rows: I) -> Result<PivotTable>
    where
        I: IntoIterator<Item = &'a MeasurementRow>,
    {
        let mut cells: FxHashMap<(RowKey, i64), CellAccumulator> = FxHashMap::default();
        let mut consumed = 0usize;

        for row in rows {
            let measurement = row.validate(self.grouping)?;
            cells
                .entry((measurement.row_key(self.grouping), measurement.depth))
                .or_default()
                .push(measurement.avg_duration_nanos);
            consumed += 1;
        }

        let mut table = PivotTable::empty(self.grouping);
        for ((key, depth), accumulator) in cells {
            table
                .rows
                .entry(key)
                .or_default()
                .insert(depth, accumulator.mean());
        }

        debug!(
            "Aggregated {consumed} row(s) into {} cell(s) across {} {} key(s)",
            table.cell_count(),
            table.row_count(),
            self.grouping
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BenchvizError;

    fn engine(name: &str) -> RowKey {
        RowKey::Engine(name.to_string())
    }

    fn row(searcher_id: i64, name: &str, depth: i64, nanos: f64) -> MeasurementRow {
        MeasurementRow::new(searcher_id, name, 1, depth, 100, nanos)
    }

    #[test]
    fn test_collisions_average_to_mean() {
        let rows = vec![row(1, "A", 3, 1000.0), row(1, "A", 3, 3000.0)];
        let table = PivotAggregator::new(GroupingMode::ByEngineName)
            .aggregate(&rows)
            .unwrap();

        assert_eq!(table.get(&engine("A"), 3), Some(2000.0));
        assert_eq!(table.cell_count(), 1);
    }

    #[test]
    fn test_mean_of_three_values() {
        let rows = vec![
            row(1, "flop", 5, 10.0),
            row(2, "flop", 5, 20.0),
            row(3, "flop", 5, 60.0),
        ];
        let table = PivotAggregator::new(GroupingMode::ByEngineName)
            .aggregate(&rows)
            .unwrap();

        assert_eq!(table.get(&engine("flop"), 5), Some(30.0));
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let rows: Vec<MeasurementRow> = Vec::new();
        let table = PivotAggregator::new(GroupingMode::ByEngineName)
            .aggregate(&rows)
            .unwrap();

        assert!(table.is_empty());
        assert_eq!(table.cell_count(), 0);
        assert!(table.depths().is_empty());
        assert_eq!(table.row_keys().count(), 0);
        assert_eq!(table.max_value(), None);
    }

    #[test]
    fn test_absent_cells_are_none() {
        let rows = vec![row(1, "bogo", 2, 500.0), row(2, "strange", 3, 700.0)];
        let table = PivotAggregator::new(GroupingMode::ByEngineName)
            .aggregate(&rows)
            .unwrap();

        assert_eq!(table.get(&engine("bogo"), 3), None);
        assert_eq!(table.get(&engine("strange"), 2), None);
        assert_eq!(table.get(&engine("missing"), 2), None);
        assert_eq!(table.cell_count(), 2);
        assert_eq!(table.depths(), vec![2, 3]);
    }

    #[test]
    fn test_zero_duration_is_a_present_cell() {
        let rows = vec![row(1, "bogo", 1, 0.0)];
        let table = PivotAggregator::new(GroupingMode::ByEngineName)
            .aggregate(&rows)
            .unwrap();

        assert_eq!(table.get(&engine("bogo"), 1), Some(0.0));
    }

    #[test]
    fn test_grouping_by_identity_keeps_searchers_apart() {
        let rows = vec![
            row(1, "minimax", 4, 100.0),
            row(2, "minimax", 4, 300.0),
            row(1, "minimax", 4, 200.0),
        ];

        let by_name = PivotAggregator::new(GroupingMode::ByEngineName)
            .aggregate(&rows)
            .unwrap();
        assert_eq!(by_name.row_count(), 1);
        assert_eq!(by_name.get(&engine("minimax"), 4), Some(200.0));

        let by_identity = PivotAggregator::new(GroupingMode::ByEngineIdentityAndName)
            .aggregate(&rows)
            .unwrap();
        assert_eq!(by_identity.grouping(), GroupingMode::ByEngineIdentityAndName);
        assert_eq!(by_identity.row_count(), 2);

        let first = RowKey::Searcher {
            searcher_id: 1,
            engine_name: "minimax".to_string(),
        };
        let second = RowKey::Searcher {
            searcher_id: 2,
            engine_name: "minimax".to_string(),
        };
        assert_eq!(by_identity.get(&first, 4), Some(150.0));
        assert_eq!(by_identity.get(&second, 4), Some(300.0));
    }

    #[test]
    fn test_result_is_independent_of_row_order() {
        let rows: Vec<MeasurementRow> = (0..12)
            .map(|i| {
                let name = if i % 2 == 0 { "bogo" } else { "flop" };
                row(i % 3, name, i % 4, 0.1 + i as f64 * 1.7e6)
            })
            .collect();
        let mut reversed = rows.clone();
        reversed.reverse();
        let mut rotated = rows.clone();
        rotated.rotate_left(5);

        let aggregator = PivotAggregator::new(GroupingMode::ByEngineName);
        let expected = aggregator.aggregate(&rows).unwrap();
        assert_eq!(aggregator.aggregate(&reversed).unwrap(), expected);
        assert_eq!(aggregator.aggregate(&rotated).unwrap(), expected);
    }

    #[test]
    fn test_malformed_row_fails_whole_batch() {
        let mut rows: Vec<MeasurementRow> =
            (0..10).map(|depth| row(1, "negamax", depth, 1000.0)).collect();
        rows[5].avg_duration_nanos = None;

        match PivotAggregator::new(GroupingMode::ByEngineName).aggregate(&rows) {
            Err(BenchvizError::MalformedRow { row_key, depth }) => {
                assert_eq!(row_key, "negamax");
                assert_eq!(depth, Some(5));
            }
            other => panic!("Expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_cells_iterate_in_key_then_depth_order() {
        let rows = vec![
            row(1, "strange", 3, 3.0),
            row(1, "bogo", 4, 2.0),
            row(1, "bogo", 2, 1.0),
        ];
        let table = PivotAggregator::new(GroupingMode::ByEngineName)
            .aggregate(&rows)
            .unwrap();

        let cells: Vec<(String, i64, f64)> = table
            .cells()
            .map(|(key, depth, nanos)| (key.to_string(), depth, nanos))
            .collect();
        assert_eq!(
            cells,
            vec![
                ("bogo".to_string(), 2, 1.0),
                ("bogo".to_string(), 4, 2.0),
                ("strange".to_string(), 3, 3.0),
            ]
        );
        assert_eq!(table.max_value(), Some(3.0));
    }
}
