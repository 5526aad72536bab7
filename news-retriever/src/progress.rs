//! Progress reporting for the one-time embed-and-index build.
//!
//! `load_or_build` announces the batch count once via `set_total`, then
//! advances one step per embedded batch. Servers pass `NoopProgress`;
//! interactive runs pass `IndicatifProgress`.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Sink for build-pipeline progress events.
pub trait Progress: Send + Sync {
    /// Announce the number of embedding batches about to run.
    fn set_total(&self, _batches: u64) {}
    /// One batch embedded.
    fn step(&self, _msg: &str) {}
    /// Replace the current message without advancing.
    fn message(&self, _msg: &str) {}
    /// The index is built and persisted.
    fn finish(&self, _msg: &str) {}
}

/// Silent sink for servers/headless runs.
#[derive(Default, Clone, Copy)]
pub struct NoopProgress;
impl Progress for NoopProgress {}

/// Terminal reporter.
///
/// Starts as a spinner while the corpus is read and the cache checked; the
/// first `set_total` turns it into a bounded bar sized by the batch count.
pub struct IndicatifProgress {
    pb: ProgressBar,
}

impl IndicatifProgress {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap()
                .tick_chars("-\\|/ "),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        Self { pb }
    }
}

impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for IndicatifProgress {
    fn set_total(&self, batches: u64) {
        self.pb.disable_steady_tick();
        self.pb.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}/{len:3} {msg}").unwrap(),
        );
        self.pb.set_length(batches);
        self.pb.set_position(0);
    }

    fn step(&self, msg: &str) {
        self.pb.inc(1);
        self.pb.set_message(msg.to_string());
    }

    fn message(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
    }

    fn finish(&self, msg: &str) {
        self.pb.finish_with_message(msg.to_string());
    }
}
