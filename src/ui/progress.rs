use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner feedback for the pipeline stages that can take a while
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            spinner: None,
            enabled,
        }
    }

    fn start(&mut self, message: String) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(120));
        self.spinner = Some(pb);
    }

    pub fn start_fetch(&mut self, source: &str, position_id: i64) {
        self.start(format!(
            "Fetching measurements for position {position_id} from {source}"
        ));
    }

    pub fn finish_fetch(&mut self, row_count: usize) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
            if row_count == 0 {
                eprintln!("⚠ No measurement rows fetched");
            } else {
                eprintln!("✓ Fetched {row_count} measurement row(s)");
            }
        }
    }

    pub fn start_render(&mut self, path: &str) {
        self.start(format!("Rendering chart to {path}"));
    }

    pub fn finish_render(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    /// Drop any running spinner without a completion message
    pub fn abandon(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.abandon();
        }
    }

    pub fn is_active(&self) -> bool {
        self.spinner.is_some()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if self.is_active() {
            self.abandon();
        }
    }
}
