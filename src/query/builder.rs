use super::duration::validate_rate_window;
use crate::datamodel::{MetricKind, Scope};
use crate::error::MetricError;
use std::fmt;

pub const SVC_LATENCY_SUM: &str = "turbo_service_latency_time_ms_sum";
pub const SVC_LATENCY_COUNT: &str = "turbo_service_latency_time_ms_count";
pub const SVC_REQUEST_COUNT: &str = "turbo_service_request_count";

pub const POD_LATENCY_SUM: &str = "turbo_pod_latency_time_ms_sum";
pub const POD_LATENCY_COUNT: &str = "turbo_pod_latency_time_ms_count";
pub const POD_REQUEST_COUNT: &str = "turbo_pod_request_count";

pub const DEFAULT_RATE_WINDOW: &str = "3m";

/// Builds the PromQL expressions for the four metric kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricQuery {
    rate_window: String,
}

impl Default for MetricQuery {
    fn default() -> Self {
        Self {
            rate_window: DEFAULT_RATE_WINDOW.to_string(),
        }
    }
}

impl MetricQuery {
    pub fn new(rate_window: impl Into<String>) -> Result<Self, MetricError> {
        let rate_window = rate_window.into();
        validate_rate_window(&rate_window)?;
        Ok(Self { rate_window })
    }

    pub fn rate_window(&self) -> &str {
        &self.rate_window
    }

    pub fn expression(&self, kind: MetricKind) -> String {
        match kind {
            MetricKind::PodThroughput | MetricKind::ServiceThroughput => {
                rps_expression(request_count_metric(kind.scope()), &self.rate_window)
            }
            MetricKind::PodLatency | MetricKind::ServiceLatency => {
                let (sum, count) = latency_metrics(kind.scope());
                latency_expression(sum, count, &self.rate_window)
            }
        }
    }
}

impl fmt::Display for MetricQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in MetricKind::ALL {
            writeln!(f, "{}: {}", kind, self.expression(kind))?;
        }
        Ok(())
    }
}

fn request_count_metric(scope: Scope) -> &'static str {
    match scope {
        Scope::Pod => POD_REQUEST_COUNT,
        Scope::Service => SVC_REQUEST_COUNT,
    }
}

fn latency_metrics(scope: Scope) -> (&'static str, &'static str) {
    match scope {
        Scope::Pod => (POD_LATENCY_SUM, POD_LATENCY_COUNT),
        Scope::Service => (SVC_LATENCY_SUM, SVC_LATENCY_COUNT),
    }
}

// rate(turbo_pod_request_count{response_code="200"}[3m])
fn rps_expression(request_count: &str, window: &str) -> String {
    format!("rate({}{{response_code=\"200\"}}[{}])", request_count, window)
}

fn latency_expression(sum: &str, count: &str, window: &str) -> String {
    format!(
        "rate({}{{response_code=\"200\"}}[{}]) / rate({}{{response_code=\"200\"}}[{}])",
        sum, window, count, window
    )
}
