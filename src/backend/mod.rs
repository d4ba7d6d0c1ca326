use crate::error::MetricError;
use crate::parsing::prometheus::QueryData;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod prometheus_client;

pub use prometheus_client::PrometheusClient;

/// Runs one instant query against a Prometheus-compatible backend.
#[async_trait]
pub trait QueryExecutor: Send + Sync + Debug {
    async fn query(&self, expression: &str) -> Result<QueryData, MetricError>;
}
