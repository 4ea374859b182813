//! In-memory latency histogram for API requests, plus the middleware that
//! feeds it and writes the one-line request log.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use tracing::info;

use crate::api::routes::ApiState;
use crate::config::latency_bounds;
use crate::error::Result;

/// Shared latency stats. Middleware records, API reads.
/// Values stored in microseconds.
pub struct LatencyStats {
    inner: Mutex<hdrhistogram::Histogram<u64>>,
}

impl LatencyStats {
    pub fn new() -> Result<Self> {
        let histogram = hdrhistogram::Histogram::new_with_bounds(
            latency_bounds::LOW_US,
            latency_bounds::HIGH_US,
            latency_bounds::SIGFIG,
        )?;
        Ok(Self {
            inner: Mutex::new(histogram),
        })
    }

    /// Values above the upper bound are clamped rather than dropped.
    pub fn record(&self, d: Duration) {
        let us = (d.as_micros().min(u128::from(u64::MAX)) as u64)
            .clamp(latency_bounds::LOW_US, latency_bounds::HIGH_US);
        let mut h = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let _ = h.record(us);
    }

    pub fn snapshot(&self) -> LatencyResponse {
        let h = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if h.is_empty() {
            return LatencyResponse::default();
        }
        let ms = |q: f64| Some(h.value_at_quantile(q) as f64 / 1000.0);
        LatencyResponse {
            p50_ms: ms(0.5),
            p95_ms: ms(0.95),
            p99_ms: ms(0.99),
            sample_count: h.len(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct LatencyResponse {
    pub p50_ms: Option<f64>,
    pub p95_ms: Option<f64>,
    pub p99_ms: Option<f64>,
    pub sample_count: u64,
}

/// Times every `/api` request, records it, and logs
/// `METHOD /path STATUS in Nms`.
pub async fn track_requests(State(state): State<ApiState>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    if path.starts_with("/api") {
        let elapsed = started.elapsed();
        state.latency.record(elapsed);
        let status = response.status().as_u16();
        let duration_ms = elapsed.as_millis() as u64;
        info!(
            method = %method,
            path = %path,
            status,
            duration_ms,
            "{method} {path} {status} in {duration_ms}ms"
        );
    }
    response
}
