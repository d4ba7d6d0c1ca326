use super::QueryExecutor;
use crate::error::MetricError;
use crate::parsing::prometheus::QueryData;
use crate::parsing::prometheus::response_models::{LabelValuesResponse, PromResponse};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, error, trace};
use url::Url;

pub const API_PATH: &str = "/api/v1/";
pub const API_QUERY_PATH: &str = "/api/v1/query";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the Prometheus query API.
#[derive(Debug, Clone)]
pub struct PrometheusClient {
    client: reqwest::Client,
    host: String,
}

impl PrometheusClient {
    /// Certificate verification is disabled when `host` uses `https`.
    pub fn new(host: &str, timeout: Duration) -> Result<Self, MetricError> {
        let address = Url::parse(host).map_err(|e| {
            error!("Invalid url: {}, {}", host, e);
            MetricError::Configuration(format!("Invalid Prometheus url {}: {}", host, e))
        })?;

        let mut builder = reqwest::Client::builder().timeout(timeout);
        if address.scheme() == "https" {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build()?;

        debug!("Prometheus server address is: {}", host);
        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Lists the values of one label, e.g. the scrape jobs with `"job"`.
    pub async fn label_values(&self, label: &str) -> Result<Vec<String>, MetricError> {
        let url = format!("{}{}label/{}/values", self.host, API_PATH, label);
        debug!("path={}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<LabelValuesResponse>(&body) {
            Ok(envelope) => envelope.into_values(),
            Err(_) if !status.is_success() => Err(MetricError::HttpStatus {
                status: status.as_u16(),
                url,
            }),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl QueryExecutor for PrometheusClient {
    async fn query(&self, expression: &str) -> Result<QueryData, MetricError> {
        let url = format!("{}{}", self.host, API_QUERY_PATH);
        debug!("path={}, query={}", url, expression);

        let response = self
            .client
            .get(&url)
            .query(&[("query", expression)])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .inspect_err(|e| error!("Failed to send http request: {}", e))?;

        let status = response.status();
        let body = response.bytes().await?;
        trace!("resp: status={}, {} bytes", status, body.len());

        // Prometheus answers bad queries with 4xx and an error envelope,
        // so the body is decoded before looking at the status.
        match serde_json::from_slice::<PromResponse>(&body) {
            Ok(envelope) => envelope.into_data(),
            Err(_) if !status.is_success() => Err(MetricError::HttpStatus {
                status: status.as_u16(),
                url,
            }),
            Err(err) => {
                error!("Failed to unmarshal response: {}", err);
                Err(err.into())
            }
        }
    }
}
