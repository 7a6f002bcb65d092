use benchviz::aggregate::{PivotAggregator, PivotTable};
use benchviz::config::{CliConfig, Config};
use benchviz::core::constants::{display, output_formats};
use benchviz::reporting::logging;
use benchviz::reporting::{ChartLayout, ChartOptions, GroupedChartLayout, render_chart};
use benchviz::store::{MeasurementSource, RowFilterQuery, source_from_config};
use benchviz::ui::output::{self, ReportMetadata};
use benchviz::ui::{Cli, ProgressReporter, cli_to_config};
use benchviz::MeasurementRow;

use clap::Parser;
use std::path::Path;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();

    match run_benchviz_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main report logic extracted from main() for testing
pub fn run_benchviz_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);

    // Load and merge configuration
    let config = load_and_merge_config(&cli_config)?;

    // Setup logging and output settings
    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);

    let source = source_from_config(&config)?;
    logging::log_config_info(&config, &source.describe());

    let grouping = config.grouping_mode()?;
    let query = RowFilterQuery::for_position(config.position_id_or_default());

    let mut progress = create_progress_reporter(&output_settings);
    let rows = fetch_rows(source.as_ref(), &query, progress.as_mut())?;

    let table = PivotAggregator::new(grouping)
        .aggregate(&rows)
        .inspect_err(|e| logging::log_error("Could not aggregate measurements", Some(e)))?;
    logging::log_pivot_summary(&table);

    // Validate chart cells before anything is printed
    let layout = match config.chart_path {
        Some(_) => Some(build_layout(&table, &config)?),
        None => None,
    };

    let metadata = ReportMetadata {
        position_id: query.position_id(),
        source: source.describe(),
        rows_fetched: rows.len(),
        grouping,
    };
    output::display_report(&table, &metadata, &output_settings.output_format)?;

    if let (Some(layout), Some(chart_path)) = (layout, config.chart_path.as_deref()) {
        write_chart(&layout, &config, chart_path, progress.as_mut())?;
        if output_settings.should_show_chart_info() {
            println!("{} Chart written: {chart_path}", display::CHART_EMOJI);
        }
    }

    Ok(0)
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

impl OutputSettings {
    pub fn should_show_chart_info(&self) -> bool {
        !self.quiet && self.output_format == output_formats::TEXT
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let output_format = config.output_format_or_default().to_string();
    let show_progress = !quiet && !cli_config.no_progress;

    OutputSettings {
        quiet,
        verbose,
        output_format,
        show_progress,
    }
}

/// Create progress reporter if progress display is enabled
pub fn create_progress_reporter(output_settings: &OutputSettings) -> Option<ProgressReporter> {
    output_settings
        .show_progress
        .then(|| ProgressReporter::new(true))
}

/// Issue the single store read for the configured position
pub fn fetch_rows(
    source: &dyn MeasurementSource,
    query: &RowFilterQuery,
    mut progress: Option<&mut ProgressReporter>,
) -> Result<Vec<MeasurementRow>, Box<dyn std::error::Error>> {
    if let Some(progress) = progress.as_deref_mut() {
        progress.start_fetch(&source.describe(), query.position_id());
    }

    let started = Instant::now();
    let rows = source.fetch(query).inspect_err(|e| {
        logging::log_error("Could not fetch measurements", Some(e));
    });

    match rows {
        Ok(rows) => {
            if let Some(progress) = progress {
                progress.finish_fetch(rows.len());
            }
            logging::log_fetch_complete(
                query.position_id(),
                rows.len(),
                started.elapsed().as_millis(),
            );
            Ok(rows)
        }
        Err(e) => {
            if let Some(progress) = progress {
                progress.abandon();
            }
            Err(e.into())
        }
    }
}

/// Lay out the pivot table with the configured bar width
pub fn build_layout(
    table: &PivotTable,
    config: &Config,
) -> Result<ChartLayout, Box<dyn std::error::Error>> {
    let layout = GroupedChartLayout::new(config.bar_width_or_default())?
        .layout(table)
        .inspect_err(|e| logging::log_error("Could not lay out chart", Some(e)))?;
    logging::log_layout_summary(&layout);
    Ok(layout)
}

/// Render a laid out chart to the configured chart path
pub fn write_chart(
    layout: &ChartLayout,
    config: &Config,
    chart_path: &str,
    mut progress: Option<&mut ProgressReporter>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = config.chart_size();
    let options = ChartOptions::for_position(config.position_id_or_default(), width, height);

    if let Some(progress) = progress.as_deref_mut() {
        progress.start_render(chart_path);
    }
    let rendered = render_chart(layout, Path::new(chart_path), &options);
    if let Some(progress) = progress {
        progress.finish_render();
    }

    rendered.inspect_err(|e| logging::log_error("Could not render chart", Some(e)))?;
    Ok(())
}
