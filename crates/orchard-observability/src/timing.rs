//! Per-phase timings for a command run.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Duration of one named phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseTiming {
    pub name: String,
    pub duration_us: u64,
}

/// Collector for the phases of one run (load, facets, filter, price...).
///
/// Phases keep the order they were recorded in.
#[derive(Debug)]
pub struct PhaseTimings {
    start: Instant,
    phases: Vec<PhaseTiming>,
}

/// Serialized view of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct TimingReport {
    pub phases: Vec<PhaseTiming>,
    pub total_us: u64,
}

impl PhaseTimings {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            phases: Vec::new(),
        }
    }

    /// Run `f` and record how long it took under `name`.
    pub fn time<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let value = f();
        self.record(name, started.elapsed());
        value
    }

    /// Record an already measured phase.
    pub fn record(&mut self, name: &str, duration: Duration) {
        let duration_us = duration.as_micros() as u64;
        tracing::trace!(phase = name, duration_us, "phase finished");
        self.phases.push(PhaseTiming {
            name: name.to_string(),
            duration_us,
        });
    }

    pub fn phases(&self) -> &[PhaseTiming] {
        &self.phases
    }

    /// Get total elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Finalize and return the report.
    pub fn finish(self) -> TimingReport {
        TimingReport {
            total_us: self.start.elapsed().as_micros() as u64,
            phases: self.phases,
        }
    }
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingReport {
    /// Format as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Format as human-readable summary.
    pub fn to_summary(&self) -> String {
        let mut lines = Vec::with_capacity(self.phases.len() + 1);
        lines.push(format!(
            "Total: {}us ({:.2}ms)",
            self.total_us,
            self.total_us as f64 / 1000.0
        ));
        for phase in &self.phases {
            lines.push(format!(
                "  {}: {}us ({:.2}ms)",
                phase.name,
                phase.duration_us,
                phase.duration_us as f64 / 1000.0
            ));
        }
        lines.join("\n")
    }
}
