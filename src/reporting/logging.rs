use crate::aggregate::PivotTable;
use crate::config::Config;
use crate::reporting::layout::ChartLayout;
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config, source: &str) {
    let position = config.position_id_or_default();
    let grouping = config.grouping_or_default();
    let bar_width = config.bar_width_or_default();

    info!("Configuration: source={source}, position={position}, grouping={grouping}");
    info!(
        "Output: format={}, chart={}, bar_width={bar_width}",
        config.output_format_or_default(),
        config.chart_path.as_deref().unwrap_or("none")
    );
}

/// Log the result of the store fetch
pub fn log_fetch_complete(position_id: i64, row_count: usize, duration_ms: u128) {
    if row_count == 0 {
        warn!("No measurements stored for position {position_id} ({duration_ms}ms)");
    } else {
        info!("Fetched {row_count} row(s) for position {position_id} ({duration_ms}ms)");
    }
}

/// Log the shape of the aggregated table
pub fn log_pivot_summary(table: &PivotTable) {
    info!(
        "Pivot table: {} {} key(s), {} depth(s), {} cell(s)",
        table.row_count(),
        table.grouping(),
        table.depths().len(),
        table.cell_count()
    );
    for key in table.row_keys() {
        debug!("  {key}");
    }
}

/// Log the shape of the chart layout
pub fn log_layout_summary(layout: &ChartLayout) {
    info!(
        "Chart layout: {} bar(s), {} tick(s), bar width {}",
        layout.bars.len(),
        layout.ticks.len(),
        layout.bar_width
    );
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
