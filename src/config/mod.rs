//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::constants::{defaults, grouping_names, output_formats};
use crate::core::error::{BenchvizError, Result};
use crate::core::types::GroupingMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database written by the benchmark runner
    pub database: Option<String>,

    /// JSON export of measurement rows, used instead of a database
    pub input_json: Option<String>,

    /// Board position to report on
    pub position_id: Option<i64>,

    /// Row grouping (engine, searcher)
    pub grouping: Option<String>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Width of one bar as a fraction of a depth slot
    pub bar_width: Option<f64>,

    /// Where to render the chart (.svg or .png); no chart when unset
    pub chart_path: Option<String>,

    /// Rendered chart width in pixels
    pub chart_width: Option<u32>,

    /// Rendered chart height in pixels
    pub chart_height: Option<u32>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            input_json: None,
            position_id: Some(defaults::POSITION_ID),
            grouping: Some(grouping_names::ENGINE.to_string()),
            output_format: Some(output_formats::DEFAULT.to_string()),
            bar_width: Some(defaults::BAR_WIDTH),
            chart_path: None, // Textual report only by default
            chart_width: Some(defaults::CHART_WIDTH),
            chart_height: Some(defaults::CHART_HEIGHT),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BenchvizError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            BenchvizError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        // Validate the loaded configuration
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Data source; naming one on the command line replaces the other
        if let Some(ref database) = cli_config.database {
            self.database = Some(database.clone());
            self.input_json = None;
        }
        if let Some(ref input_json) = cli_config.input_json {
            self.input_json = Some(input_json.clone());
            if cli_config.database.is_none() {
                self.database = None;
            }
        }

        // Report scope
        if let Some(position_id) = cli_config.position_id {
            self.position_id = Some(position_id);
        }
        if let Some(ref grouping) = cli_config.grouping {
            self.grouping = Some(grouping.clone());
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }

        // Chart
        if let Some(ref chart_path) = cli_config.chart_path {
            self.chart_path = Some(chart_path.clone());
        }
        if let Some(bar_width) = cli_config.bar_width {
            self.bar_width = Some(bar_width);
        }
        if let Some(width) = cli_config.chart_width {
            self.chart_width = Some(width);
        }
        if let Some(height) = cli_config.chart_height {
            self.chart_height = Some(height);
        }
    }

    pub fn position_id_or_default(&self) -> i64 {
        self.position_id.unwrap_or(defaults::POSITION_ID)
    }

    pub fn grouping_or_default(&self) -> &str {
        self.grouping.as_deref().unwrap_or(grouping_names::ENGINE)
    }

    /// Parse the configured grouping
    pub fn grouping_mode(&self) -> Result<GroupingMode> {
        self.grouping_or_default()
            .parse()
            .map_err(|e: BenchvizError| BenchvizError::Config(e.to_string()))
    }

    pub fn output_format_or_default(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    pub fn bar_width_or_default(&self) -> f64 {
        self.bar_width.unwrap_or(defaults::BAR_WIDTH)
    }

    /// Chart size in pixels
    pub fn chart_size(&self) -> (u32, u32) {
        (
            self.chart_width.unwrap_or(defaults::CHART_WIDTH),
            self.chart_height.unwrap_or(defaults::CHART_HEIGHT),
        )
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.database.is_some() && self.input_json.is_some() {
            return Err(BenchvizError::Config(
                "Both a database and a JSON export are configured. Expected only one data source."
                    .to_string(),
            ));
        }

        // Validate grouping
        self.grouping_mode()?;

        // Validate output format
        if let Some(ref format) = self.output_format {
            match format.as_str() {
                f if output_formats::ALL.contains(&f) => {}
                _ => {
                    return Err(BenchvizError::Config(format!(
                        "Invalid output format '{format}'. Expected one of: {}.",
                        output_formats::ALL.join(", ")
                    )));
                }
            }
        }

        // Validate bar width
        if let Some(width) = self.bar_width
            && (!width.is_finite() || width <= 0.0)
        {
            return Err(BenchvizError::Config(format!(
                "Bar width {width} is invalid. Expected a positive fraction of a depth slot."
            )));
        }

        // Validate chart size
        let (width, height) = self.chart_size();
        if width == 0 || height == 0 {
            return Err(BenchvizError::Config(format!(
                "Chart size {width}x{height} is invalid. Expected positive pixel dimensions."
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Data source
    pub database: Option<String>,   // --db
    pub input_json: Option<String>, // --json

    // Report scope
    pub position_id: Option<i64>,  // --position
    pub grouping: Option<String>, // --group-by

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub no_progress: bool,             // --no-progress

    // Chart
    pub chart_path: Option<String>, // --chart
    pub bar_width: Option<f64>,     // --bar-width
    pub chart_width: Option<u32>,   // --width
    pub chart_height: Option<u32>,  // --height

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
