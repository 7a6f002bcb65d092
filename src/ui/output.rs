//! Textual reports of a pivot table
//!
//! Every present cell is shown through the duration formatter. Absent cells
//! are rendered as a placeholder (text, minimal) or `null` (JSON), never as a
//! zero duration.

use serde::Serialize;

use crate::aggregate::PivotTable;
use crate::core::constants::{chart, display, output_formats};
use crate::core::error::{BenchvizError, Result};
use crate::core::types::GroupingMode;
use crate::reporting::duration::format_duration;
use crate::ui::color::{Colors, colorize, header};

/// Metadata for displaying results
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    pub position_id: i64,
    pub source: String,
    pub rows_fetched: usize,
    pub grouping: GroupingMode,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    position_id: i64,
    source: &'a str,
    grouping: &'static str,
    generated_at: String,
    rows_fetched: usize,
    depths: Vec<i64>,
    rows: Vec<JsonRow<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    label: String,
    engine_name: &'a str,
    searcher_id: Option<i64>,
    cells: Vec<JsonCell>,
}

#[derive(Debug, Serialize)]
struct JsonCell {
    depth: i64,
    avg_duration_nanos: Option<f64>,
    formatted: Option<String>,
}

/// Render the report in the requested format
pub fn render_report(table: &PivotTable, metadata: &ReportMetadata, format: &str) -> Result<String> {
    match format {
        output_formats::JSON => json_report(table, metadata),
        output_formats::MINIMAL => minimal_report(table),
        output_formats::TEXT => text_report(table, metadata),
        other => Err(BenchvizError::InvalidArgument(format!(
            "Invalid output format '{other}'. Expected one of: {}.",
            output_formats::ALL.join(", ")
        ))),
    }
}

/// Print the report to stdout
pub fn display_report(table: &PivotTable, metadata: &ReportMetadata, format: &str) -> Result<()> {
    let report = render_report(table, metadata, format)?;
    if !report.is_empty() {
        println!("{report}");
    }
    Ok(())
}

/// Formatted cells of every row, in depth order; `None` marks an absent cell
fn formatted_rows(table: &PivotTable, depths: &[i64]) -> Result<Vec<(String, Vec<Option<String>>)>> {
    table
        .row_keys()
        .map(|key| {
            let cells = depths
                .iter()
                .map(|&depth| table.get(key, depth).map(format_duration).transpose())
                .collect::<Result<Vec<_>>>()?;
            Ok((key.to_string(), cells))
        })
        .collect()
}

fn text_report(table: &PivotTable, metadata: &ReportMetadata) -> Result<String> {
    if table.is_empty() {
        return Ok(format!(
            "{} {}",
            display::EMPTY_EMOJI,
            colorize(
                &format!(
                    "No measurements found for position {}",
                    metadata.position_id
                ),
                Colors::BRIGHT_YELLOW
            )
        ));
    }

    let depths = table.depths();
    let rows = formatted_rows(table, &depths)?;

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .chain(std::iter::once(chart::LEGEND_TITLE.len()))
        .max()
        .unwrap_or(0);
    let column_widths: Vec<usize> = depths
        .iter()
        .enumerate()
        .map(|(column, depth)| {
            rows.iter()
                .filter_map(|(_, cells)| cells[column].as_ref())
                .map(|cell| cell.chars().count())
                .chain([depth.to_string().len(), display::MISSING_CELL.len()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(format!(
        "{} {} for position {} ({} row(s) from {})",
        display::SUCCESS_EMOJI,
        header("Average search duration"),
        metadata.position_id,
        metadata.rows_fetched,
        metadata.source
    ));
    lines.push(String::new());

    let mut header_line = header(&format!("{:<label_width$}", chart::LEGEND_TITLE));
    for (depth, width) in depths.iter().zip(&column_widths) {
        header_line.push_str("  ");
        header_line.push_str(&header(&format!("{depth:>width$}")));
    }
    lines.push(header_line);

    for (label, cells) in &rows {
        let mut line = format!("{label:<label_width$}");
        for (cell, width) in cells.iter().zip(&column_widths) {
            line.push_str("  ");
            match cell {
                Some(value) => line.push_str(&colorize(
                    &format!("{value:>width$}"),
                    Colors::BRIGHT_WHITE,
                )),
                None => line.push_str(&colorize(
                    &format!("{:>width$}", display::MISSING_CELL),
                    Colors::DIM,
                )),
            }
        }
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

fn minimal_report(table: &PivotTable) -> Result<String> {
    if table.is_empty() {
        return Ok(String::new());
    }

    let depths = table.depths();
    let mut lines = Vec::with_capacity(table.row_count() + 1);

    let mut header_line = chart::LEGEND_TITLE.to_string();
    for depth in &depths {
        header_line.push('\t');
        header_line.push_str(&depth.to_string());
    }
    lines.push(header_line);

    for (label, cells) in formatted_rows(table, &depths)? {
        let mut line = label;
        for cell in cells {
            line.push('\t');
            line.push_str(cell.as_deref().unwrap_or(display::MISSING_CELL));
        }
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

fn json_report(table: &PivotTable, metadata: &ReportMetadata) -> Result<String> {
    let depths = table.depths();
    let rows = table
        .row_keys()
        .map(|key| {
            let cells = depths
                .iter()
                .map(|&depth| {
                    let nanos = table.get(key, depth);
                    Ok(JsonCell {
                        depth,
                        avg_duration_nanos: nanos,
                        formatted: nanos.map(format_duration).transpose()?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(JsonRow {
                label: key.to_string(),
                engine_name: key.engine_name(),
                searcher_id: key.searcher_id(),
                cells,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let report = JsonReport {
        position_id: metadata.position_id,
        source: &metadata.source,
        grouping: metadata.grouping.as_str(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        rows_fetched: metadata.rows_fetched,
        depths,
        rows,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::PivotAggregator;
    use crate::core::types::MeasurementRow;
    use serde_json::Value;

    fn metadata(grouping: GroupingMode) -> ReportMetadata {
        ReportMetadata {
            position_id: 1,
            source: "memory:test".to_string(),
            rows_fetched: 4,
            grouping,
        }
    }

    fn sample_table(grouping: GroupingMode) -> PivotTable {
        let rows = vec![
            MeasurementRow::new(1, "A", 1, 3, 10, 1000.0),
            MeasurementRow::new(1, "A", 1, 3, 10, 3000.0),
            MeasurementRow::new(2, "B", 1, 3, 10, 2_500_000_000.0),
            MeasurementRow::new(2, "B", 1, 4, 10, 60_000_000_000.0),
        ];
        PivotAggregator::new(grouping).aggregate(&rows).unwrap()
    }

    #[test]
    fn test_text_report_layout() {
        let table = sample_table(GroupingMode::ByEngineName);
        let report = render_report(&table, &metadata(GroupingMode::ByEngineName), "text").unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert!(lines[0].contains("position 1"));
        assert_eq!(lines[2], "Searcher        3         4");
        assert_eq!(lines[3], "A         2.00 µs         -");
        assert_eq!(lines[4], "B          2.50 s  1.00 min");
    }

    #[test]
    fn test_text_report_never_prints_zero_for_absent_cells() {
        let table = sample_table(GroupingMode::ByEngineName);
        let report = render_report(&table, &metadata(GroupingMode::ByEngineName), "text").unwrap();
        assert!(!report.contains("0.00 ns"));
    }

    #[test]
    fn test_text_report_empty() {
        let table = PivotTable::empty(GroupingMode::ByEngineName);
        let report = render_report(&table, &metadata(GroupingMode::ByEngineName), "text").unwrap();
        assert!(report.contains("No measurements found for position 1"));
    }

    #[test]
    fn test_minimal_report() {
        let table = sample_table(GroupingMode::ByEngineName);
        let report = render_report(&table, &metadata(GroupingMode::ByEngineName), "minimal").unwrap();

        assert_eq!(
            report,
            "Searcher\t3\t4\nA\t2.00 µs\t-\nB\t2.50 s\t1.00 min"
        );
    }

    #[test]
    fn test_minimal_report_empty() {
        let table = PivotTable::empty(GroupingMode::ByEngineName);
        let report =
            render_report(&table, &metadata(GroupingMode::ByEngineName), "minimal").unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_json_report() {
        let table = sample_table(GroupingMode::ByEngineIdentityAndName);
        let report = render_report(
            &table,
            &metadata(GroupingMode::ByEngineIdentityAndName),
            "json",
        )
        .unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["position_id"], 1);
        assert_eq!(json["grouping"], "searcher");
        assert_eq!(json["depths"], serde_json::json!([3, 4]));

        let first = &json["rows"][0];
        assert_eq!(first["label"], "1: A");
        assert_eq!(first["searcher_id"], 1);
        assert_eq!(first["cells"][0]["avg_duration_nanos"], 2000.0);
        assert_eq!(first["cells"][0]["formatted"], "2.00 µs");
        assert!(first["cells"][1]["avg_duration_nanos"].is_null());
        assert!(first["cells"][1]["formatted"].is_null());
    }

    #[test]
    fn test_json_report_empty() {
        let table = PivotTable::empty(GroupingMode::ByEngineName);
        let report = render_report(&table, &metadata(GroupingMode::ByEngineName), "json").unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["rows"], serde_json::json!([]));
        assert_eq!(json["depths"], serde_json::json!([]));
    }

    #[test]
    fn test_negative_cell_is_an_error() {
        let rows = vec![MeasurementRow::new(1, "A", 1, 3, 10, -5.0)];
        let table = PivotAggregator::new(GroupingMode::ByEngineName)
            .aggregate(&rows)
            .unwrap();

        assert!(matches!(
            render_report(&table, &metadata(GroupingMode::ByEngineName), "text"),
            Err(BenchvizError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_unknown_format() {
        let table = PivotTable::empty(GroupingMode::ByEngineName);
        assert!(render_report(&table, &metadata(GroupingMode::ByEngineName), "yaml").is_err());
    }
}
