use super::metric_kind::MetricKind;
use std::collections::HashMap;

/// One instant sample read from the backend, before any normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    pub kind: MetricKind,
    /// Backend-native identifier (container URI or service FQDN)
    pub identifier: String,
    pub value: f64,
    pub labels: HashMap<String, String>,
}

impl RawSeries {
    pub fn new(kind: MetricKind, identifier: impl Into<String>, value: f64) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            value,
            labels: HashMap::new(),
        }
    }

    pub fn with_labels(mut self, labels: HashMap<String, String>) -> Self {
        self.labels = labels;
        self
    }
}
