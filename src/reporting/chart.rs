//! Chart rendering
//!
//! Draws a [`ChartLayout`] with plotters. The vertical axis is logarithmic and
//! expressed in the unit the duration formatter picks for the tallest bar.

use std::path::Path;

use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::core::constants::chart::{TITLE_PREFIX, X_AXIS_LABEL, Y_AXIS_LABEL};
use crate::core::error::{BenchvizError, Result};
use crate::reporting::duration::DurationUnit;
use crate::reporting::layout::ChartLayout;

/// Image format, picked from the output file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Svg,
    Png,
}

impl ChartKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("svg") => Ok(ChartKind::Svg),
            Some("png") => Ok(ChartKind::Png),
            _ => Err(BenchvizError::InvalidArgument(format!(
                "Chart path '{}' must end in .svg or .png",
                path.display()
            ))),
        }
    }
}

/// Options for one rendered chart
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl ChartOptions {
    pub fn for_position(position_id: i64, width: u32, height: u32) -> Self {
        Self {
            title: format!("{TITLE_PREFIX} {position_id}"),
            width,
            height,
        }
    }
}

/// Axis label for the vertical axis in a given unit
pub fn y_axis_label(unit: DurationUnit) -> String {
    format!("{Y_AXIS_LABEL} ({})", unit.name())
}

/// Vertical range for the log axis, padded to leave room around the bars
fn y_range(layout: &ChartLayout, unit: DurationUnit) -> (f64, f64) {
    match (layout.min_height(), layout.max_height()) {
        (Some(min), Some(max)) => (unit.scale(min) / 2.0, unit.scale(max) * 2.0),
        _ => (1.0, 10.0),
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> BenchvizError {
    BenchvizError::Render(err.to_string())
}

/// Render the layout to an SVG or PNG file
pub fn render_chart(layout: &ChartLayout, path: &Path, options: &ChartOptions) -> Result<()> {
    let kind = ChartKind::from_path(path)?;
    let size = (options.width, options.height);

    match kind {
        ChartKind::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_chart(root, layout, options)?;
        }
        ChartKind::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_chart(root, layout, options)?;
        }
    }

    info!(
        "Rendered {} bar(s) to {}",
        layout.bars.len(),
        path.display()
    );
    Ok(())
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    layout: &ChartLayout,
    options: &ChartOptions,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(render_err)?;

    let unit = DurationUnit::for_nanos(layout.max_height().unwrap_or(0.0));
    let (y_min, y_max) = y_range(layout, unit);
    let (x_start, x_end) = layout.x_extent();
    let padding = 0.25;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            &options.title,
            FontDesc::new(FontFamily::SansSerif, 24.0, FontStyle::Normal),
        )
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(
            (x_start - padding)..(x_end + padding),
            (y_min..y_max).log_scale(),
        )
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .x_desc(X_AXIS_LABEL)
        .y_desc(y_axis_label(unit))
        .y_label_formatter(&|v| format!("{v:.1e}"))
        .label_style(FontDesc::new(FontFamily::SansSerif, 16.0, FontStyle::Normal))
        .draw()
        .map_err(render_err)?;

    for entry in &layout.legend {
        let color = Palette99::pick(entry.series).to_rgba();
        let half = layout.bar_width / 2.0;
        chart
            .draw_series(layout.series_bars(entry.series).map(|bar| {
                Rectangle::new(
                    [(bar.x - half, y_min), (bar.x + half, unit.scale(bar.height))],
                    color.filled(),
                )
            }))
            .map_err(render_err)?
            .label(entry.label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    // Depth ticks sit at positions the mesh cannot produce on its own
    let tick_style = FontDesc::new(FontFamily::SansSerif, 16.0, FontStyle::Normal)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for tick in &layout.ticks {
        let (px, py) = chart.backend_coord(&(tick.x, y_min));
        root.draw(&Text::new(tick.label.clone(), (px, py + 8), tick_style.clone()))
            .map_err(render_err)?;
    }

    if !layout.legend.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FontDesc::new(FontFamily::SansSerif, 14.0, FontStyle::Normal))
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::PivotAggregator;
    use crate::core::types::{GroupingMode, MeasurementRow};
    use crate::reporting::layout::GroupedChartLayout;

    #[test]
    fn test_chart_kind_from_path() {
        assert_eq!(
            ChartKind::from_path(Path::new("out/chart.svg")).unwrap(),
            ChartKind::Svg
        );
        assert_eq!(
            ChartKind::from_path(Path::new("chart.PNG")).unwrap(),
            ChartKind::Png
        );
        assert!(ChartKind::from_path(Path::new("chart.pdf")).is_err());
        assert!(ChartKind::from_path(Path::new("chart")).is_err());
    }

    #[test]
    fn test_chart_options_for_position() {
        let options = ChartOptions::for_position(4, 800, 600);
        assert_eq!(options.title, "Performance Comparison of Searchers in Position 4");
        assert_eq!((options.width, options.height), (800, 600));
    }

    #[test]
    fn test_y_axis_label() {
        assert_eq!(
            y_axis_label(DurationUnit::Seconds),
            "Average Search Duration (seconds)"
        );
    }

    #[test]
    fn test_y_range_pads_bars() {
        let rows = vec![
            MeasurementRow::new(1, "bogo", 1, 3, 0, 2e9),
            MeasurementRow::new(1, "bogo", 1, 4, 0, 8e9),
        ];
        let table = PivotAggregator::new(GroupingMode::ByEngineName)
            .aggregate(&rows)
            .unwrap();
        let layout = GroupedChartLayout::default().layout(&table).unwrap();

        let (low, high) = y_range(&layout, DurationUnit::Seconds);
        assert_eq!(low, 1.0);
        assert_eq!(high, 16.0);
    }

    #[test]
    fn test_y_range_of_empty_layout() {
        let layout = GroupedChartLayout::default()
            .layout(&crate::aggregate::PivotTable::empty(GroupingMode::ByEngineName))
            .unwrap();
        assert_eq!(y_range(&layout, DurationUnit::Nanos), (1.0, 10.0));
    }
}
