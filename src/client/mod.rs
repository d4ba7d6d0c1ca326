//! Consumer side of the metric server.

use crate::acquisition::ScopedMetrics;
use crate::datamodel::MetricSet;
use crate::error::MetricError;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, error, trace};
use url::Url;

pub const API_PATH_POD: &str = "/pod/metrics";
pub const API_PATH_SERVICE: &str = "/service/metrics";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct AppMetricClient {
    client: reqwest::Client,
    host: String,
}

impl AppMetricClient {
    /// `host` includes scheme and port, e.g. `http://localhost:8081`.
    pub fn new(host: &str) -> Result<Self, MetricError> {
        Self::with_timeout(host, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(host: &str, timeout: Duration) -> Result<Self, MetricError> {
        let address = Url::parse(host).map_err(|e| {
            MetricError::Configuration(format!("Invalid server url {}: {}", host, e))
        })?;

        let mut builder = reqwest::Client::builder().timeout(timeout);
        if address.scheme() == "https" {
            builder = builder.danger_accept_invalid_certs(true);
        }

        debug!("AppMetrics server address is: {}", host);
        Ok(Self {
            client: builder.build()?,
            host: host.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_metrics(&self, path: &str) -> Result<MetricSet, MetricError> {
        let url = format!("{}{}", self.host, path);
        debug!("path={}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .inspect_err(|e| error!("Failed to send http request: {}", e))?;

        if response.status() != StatusCode::OK {
            error!("response code != 200: {}", response.status());
            return Err(MetricError::HttpStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        let set: MetricSet = serde_json::from_slice(&body)?;
        debug!("Get {} metrics for {}", set.len(), path);
        trace!("{}", set);
        Ok(set)
    }

    /// Pod and service sets, fetched concurrently. A failing side comes
    /// back empty; the call fails only when both sides fail.
    pub async fn get_pod_app_metrics(&self) -> Result<ScopedMetrics, MetricError> {
        let pods = tokio::spawn({
            let client = self.clone();
            async move { client.get_metrics(API_PATH_POD).await }
        });
        let services = tokio::spawn({
            let client = self.clone();
            async move { client.get_metrics(API_PATH_SERVICE).await }
        });

        let pods = pods.await.map_err(MetricError::from).and_then(|r| r);
        let services = services.await.map_err(MetricError::from).and_then(|r| r);

        match (pods, services) {
            (Err(pod_err), Err(svc_err)) => {
                error!("Failed to get Pod metrics: {}", pod_err);
                error!("Failed to get Service metrics: {}", svc_err);
                Err(MetricError::AllFetchesFailed(
                    "Pod metrics, nor Service metrics".to_string(),
                ))
            }
            (pods, services) => Ok(ScopedMetrics {
                pods: pods.unwrap_or_else(|err| {
                    error!("Failed to get Pod metrics: {}", err);
                    MetricSet::new()
                }),
                services: services.unwrap_or_else(|err| {
                    error!("Failed to get Service metrics: {}", err);
                    MetricSet::new()
                }),
            }),
        }
    }
}
