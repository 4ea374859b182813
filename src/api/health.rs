//! Service counters for the health endpoints.
//! Updated by the signal handlers, read by `/api/health`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::Serialize;

pub struct HealthState {
    started_at: Instant,
    /// Signals produced by the generator (direct inserts excluded).
    signals_generated: AtomicU64,
    results_recorded: AtomicU64,
    feedback_recorded: AtomicU64,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_signals_generated(&self) {
        self.signals_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_results_recorded(&self) {
        self.results_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_feedback_recorded(&self) {
        self.feedback_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn snapshot(&self, games: usize, signals_stored: usize) -> HealthResponse {
        HealthResponse {
            status: "ok",
            uptime_secs: self.uptime_secs(),
            games,
            signals_stored,
            signals_generated: self.signals_generated.load(Ordering::Relaxed),
            results_recorded: self.results_recorded.load(Ordering::Relaxed),
            feedback_recorded: self.feedback_recorded.load(Ordering::Relaxed),
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            started_at: Instant::now(),
            signals_generated: AtomicU64::new(0),
            results_recorded: AtomicU64::new(0),
            feedback_recorded: AtomicU64::new(0),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub games: usize,
    pub signals_stored: usize,
    pub signals_generated: u64,
    pub results_recorded: u64,
    pub feedback_recorded: u64,
}
