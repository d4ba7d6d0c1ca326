use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const LABEL_NAME: &str = "name";
pub const LABEL_IP: &str = "ip";
pub const LABEL_CATEGORY: &str = "metric.category";

pub const METRIC_TPS: &str = "tps";
pub const METRIC_LATENCY: &str = "latency";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Application,
    VirtualApplication,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityType::Application => "Application",
            EntityType::VirtualApplication => "VirtualApplication",
        };
        write!(f, "{}", s)
    }
}

/// One entity with its labels and named metric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetric {
    pub uid: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
}

impl EntityMetric {
    pub fn new(uid: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            uid: uid.into(),
            entity_type,
            labels: HashMap::new(),
            metrics: HashMap::new(),
        }
    }

    pub fn set_label(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.labels.insert(name.into(), value.into());
    }

    pub fn set_metric(&mut self, name: impl Into<String>, value: f64) {
        self.metrics.insert(name.into(), value);
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }
}

/// Envelope returned by the entity endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricResponse {
    pub status: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Vec<EntityMetric>,
}

impl MetricResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: i32, message: impl Into<String>) {
        self.status = status;
        self.message = message.into();
    }

    pub fn add_metric(&mut self, metric: EntityMetric) {
        self.data.push(metric);
    }
}
