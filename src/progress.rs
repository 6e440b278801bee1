//! Coarse scan progress sink.
//!
//! The catalog pipeline reports `(percent, message)` pairs while it walks and
//! builds. Whatever receives them (a status line, the log, nothing) is up to
//! the host.

/// Receives scan progress. Implementations must not block.
pub trait ProgressReporter {
    fn report(&self, percent: f64, message: &str);
}

impl<F> ProgressReporter for F
where
    F: Fn(f64, &str),
{
    fn report(&self, percent: f64, message: &str) {
        self(percent, message)
    }
}

/// Discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl ProgressReporter for Silent {
    fn report(&self, _percent: f64, _message: &str) {}
}

/// Forwards updates to the `tracing` log at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&self, percent: f64, message: &str) {
        tracing::info!(percent = percent.round() as u8, "{message}");
    }
}

/// Clamp a raw percentage into `0..=100`.
pub(crate) fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}
