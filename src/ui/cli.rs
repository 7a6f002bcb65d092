// Command-line interface definitions and parsing for benchviz

use crate::config::CliConfig;
use crate::core::constants::{grouping_names, output_formats};
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // Data Source
    /// SQLite database written by the benchmark runner
    #[arg(long = "db", value_name = "FILE", help_heading = "Data Source")]
    pub database: Option<String>,

    /// JSON export of measurement rows (instead of a database)
    #[arg(long = "json", value_name = "FILE", help_heading = "Data Source")]
    pub input_json: Option<String>,

    // Report Scope
    /// Board position to report on (default: 1)
    #[arg(short = 'p', long, value_name = "ID", help_heading = "Report Scope")]
    pub position: Option<i64>,

    /// Row grouping: one row per engine name, or per searcher identity (default: engine)
    #[arg(short = 'g', long, value_name = "MODE", value_parser = grouping_names::ALL, help_heading = "Report Scope")]
    pub group_by: Option<String>,

    // Chart
    /// Render a grouped bar chart to this path (.svg or .png)
    #[arg(long, value_name = "PATH", help_heading = "Chart")]
    pub chart: Option<String>,

    /// Bar width as a fraction of a depth slot (default: 0.2)
    #[arg(long, value_name = "FRACTION", help_heading = "Chart")]
    pub bar_width: Option<f64>,

    /// Chart width in pixels (default: 1280)
    #[arg(long, value_name = "PIXELS", help_heading = "Chart")]
    pub width: Option<u32>,

    /// Chart height in pixels (default: 760)
    #[arg(long, value_name = "PIXELS", help_heading = "Chart")]
    pub height: Option<u32>,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Disable progress spinners
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert parsed CLI arguments into CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        database: cli.database.clone(),
        input_json: cli.input_json.clone(),
        position_id: cli.position,
        grouping: cli.group_by.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        no_progress: cli.no_progress,
        chart_path: cli.chart.clone(),
        bar_width: cli.bar_width,
        chart_width: cli.width,
        chart_height: cli.height,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
