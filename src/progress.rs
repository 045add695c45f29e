//! Progress reporting for archive exports.
//!
//! A single reporter spans one export invocation (which may emit several
//! archives) and throttles callback emission so a tight per-entry loop does
//! not spam the consumer.

use std::time::{Duration, Instant};

/// A snapshot handed to the progress callback.
#[derive(Debug, Clone)]
pub struct ProgressState {
    /// Entries written so far across all archives of this export.
    pub current: u64,
    /// Total entries the export will write.
    pub total: u64,
    /// The entry or archive currently being processed.
    pub label: String,
    pub percent: f32,
}

/// Progress callback function type.
pub type ProgressCallback = dyn Fn(ProgressState) + Send + Sync;

/// Tracks per-entry progress and emits throttled callback updates.
pub struct ProgressReporter {
    total: u64,
    current: u64,
    last_emit: Instant,
    emit_interval: Duration,
    callback: Option<Box<ProgressCallback>>,
}

impl ProgressReporter {
    pub fn new(callback: Option<Box<ProgressCallback>>) -> Self {
        Self::with_interval(callback, Duration::from_millis(100))
    }

    pub fn with_interval(callback: Option<Box<ProgressCallback>>, emit_interval: Duration) -> Self {
        ProgressReporter {
            total: 0,
            current: 0,
            last_emit: Instant::now(),
            emit_interval,
            callback,
        }
    }

    /// Set the total entry count before any work starts.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// Record one finished entry; emits when the throttle interval passed.
    pub fn advance(&mut self, label: &str) {
        self.current += 1;
        if self.callback.is_none() {
            return;
        }
        let now = Instant::now();
        if now.duration_since(self.last_emit) >= self.emit_interval {
            self.last_emit = now;
            self.emit(label);
        }
    }

    /// Emit a final 100% state regardless of throttling.
    pub fn force_completion(&mut self, label: &str) {
        self.current = self.total;
        self.emit(label);
    }

    fn emit(&self, label: &str) {
        if let Some(ref callback) = self.callback {
            let percent = if self.total > 0 {
                (self.current as f32 / self.total as f32) * 100.0
            } else {
                0.0
            };
            callback(ProgressState {
                current: self.current,
                total: self.total,
                label: label.to_string(),
                percent: percent.min(100.0),
            });
        }
    }
}
