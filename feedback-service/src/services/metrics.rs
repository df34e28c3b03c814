//! Prometheus metrics for feedback-service.
//!
//! HTTP request metrics come from `service_core::middleware::metrics`; this
//! module adds feedback outcomes and completion latency.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Calling it again is a no-op.
pub fn init_metrics() -> Result<(), BuildError> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            metrics_exporter_prometheus::Matcher::Full("completion_latency_seconds".to_string()),
            &[0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0],
        )?
        .install_recorder()?;

    let _ = METRICS_HANDLE.set(handle);
    Ok(())
}

/// Get metrics output in Prometheus text format.
pub fn render() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Outcome label values for `feedback_requests_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackOutcome {
    Success,
    UpstreamError,
    UnexpectedError,
}

impl FeedbackOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackOutcome::Success => "success",
            FeedbackOutcome::UpstreamError => "upstream_error",
            FeedbackOutcome::UnexpectedError => "unexpected_error",
        }
    }
}

pub fn record_feedback(outcome: FeedbackOutcome) {
    counter!("feedback_requests_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_completion_latency(provider: &'static str, model: &str, elapsed: Duration) {
    histogram!(
        "completion_latency_seconds",
        "provider" => provider,
        "model" => model.to_string()
    )
    .record(elapsed.as_secs_f64());
}
