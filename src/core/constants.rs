/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes all magic strings, numbers, and other literal values
/// used across the application, making them easier to maintain and modify.
/// Output format constants
pub mod output_formats {
    /// Text output format - aligned, colored pivot table
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - tab-separated, no colors
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Grouping mode names accepted in config files and on the command line
pub mod grouping_names {
    /// Group rows by engine name only
    pub const ENGINE: &str = "engine";
    /// Group rows by searcher id and engine name
    pub const SEARCHER: &str = "searcher";

    /// All valid grouping names
    pub const ALL: [&str; 2] = [ENGINE, SEARCHER];
}

/// Benchmark database schema
pub mod schema {
    /// Table holding one row per configured searcher
    pub const SEARCHER_TABLE: &str = "TB_SEARCHER_INFO";
    /// View averaging raw search results per searcher, position and depth
    pub const SUMMARY_VIEW: &str = "vw_search_results_summary";
    /// Column the position filter is applied to
    pub const POSITION_COLUMN: &str = "sr.id_position";
}

/// Duration unit thresholds, in nanoseconds
pub mod durations {
    pub const NANOS_PER_MICRO: f64 = 1e3;
    pub const NANOS_PER_MILLI: f64 = 1e6;
    pub const NANOS_PER_SECOND: f64 = 1e9;
    pub const NANOS_PER_MINUTE: f64 = 60e9;
    pub const NANOS_PER_HOUR: f64 = 3600e9;
}

/// Default configuration values
pub mod defaults {
    /// Position benchmarked by the runner out of the box
    pub const POSITION_ID: i64 = 1;
    /// Width of one bar, as a fraction of a depth slot
    pub const BAR_WIDTH: f64 = 0.2;
    /// Rendered chart width in pixels
    pub const CHART_WIDTH: u32 = 1280;
    /// Rendered chart height in pixels
    pub const CHART_HEIGHT: u32 = 760;
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".benchviz.toml";
}

/// Chart labels
pub mod chart {
    /// Horizontal axis label
    pub const X_AXIS_LABEL: &str = "Depth";
    /// Vertical axis label prefix, completed with the unit name
    pub const Y_AXIS_LABEL: &str = "Average Search Duration";
    /// Legend title, also the first column of the textual report
    pub const LEGEND_TITLE: &str = "Searcher";
    /// Chart title prefix, completed with the position id
    pub const TITLE_PREFIX: &str = "Performance Comparison of Searchers in Position";
}

/// Display and formatting constants
pub mod display {
    /// Placeholder printed for a depth an engine was never measured at
    pub const MISSING_CELL: &str = "-";
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for empty results
    pub const EMPTY_EMOJI: &str = "📭";
    /// Emoji for chart output
    pub const CHART_EMOJI: &str = "📊";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_formats_constants() {
        assert_eq!(output_formats::TEXT, "text");
        assert_eq!(output_formats::JSON, "json");
        assert_eq!(output_formats::MINIMAL, "minimal");
        assert_eq!(output_formats::DEFAULT, "text");
        assert_eq!(output_formats::ALL.len(), 3);
    }

    #[test]
    fn test_duration_thresholds_ascend() {
        let thresholds = [
            durations::NANOS_PER_MICRO,
            durations::NANOS_PER_MILLI,
            durations::NANOS_PER_SECOND,
            durations::NANOS_PER_MINUTE,
            durations::NANOS_PER_HOUR,
        ];
        assert!(thresholds.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_default_bar_width_is_a_fraction_of_a_slot() {
        assert!(defaults::BAR_WIDTH > 0.0);
        assert!(defaults::BAR_WIDTH < 1.0);
    }
}
