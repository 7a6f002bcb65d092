use crate::core::constants::schema;

/// Request for the measurement rows of one board position.
///
/// A position nobody benchmarked is a valid request; the store answers it
/// with an empty row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFilterQuery {
    position_id: i64,
}

impl RowFilterQuery {
    pub fn for_position(position_id: i64) -> Self {
        Self { position_id }
    }

    pub fn position_id(&self) -> i64 {
        self.position_id
    }

    /// Literal filter predicate handed to the store
    pub fn predicate(&self) -> String {
        format!("{} = {}", schema::POSITION_COLUMN, self.position_id)
    }

    /// Full statement selecting the measurement schema for this position
    pub fn sql(&self) -> String {
        format!(
            "SELECT s.id_searcher, s.nm_engine, sr.id_position, sr.vl_depth, \
             sr.total_entries, sr.avg_search_duration \
             FROM {searchers} s \
             JOIN {summary} sr ON s.id_searcher = sr.id_searcher \
             WHERE {predicate}",
            searchers = schema::SEARCHER_TABLE,
            summary = schema::SUMMARY_VIEW,
            predicate = self.predicate()
        )
    }

    /// Whether a row belongs to the requested position
    pub fn matches(&self, position_id: i64) -> bool {
        self.position_id == position_id
    }
}
