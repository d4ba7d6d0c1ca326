/// HTTP testing utilities
use anyhow::Result;
use appmetric::acquisition::{Aggregator, IstioEntityGetter, MetricsAcquirer};
use appmetric::backend::QueryExecutor;
use appmetric::http::server::router;
use appmetric::http::state::HttpServerState;
use appmetric::query::MetricQuery;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt; // for `oneshot`

/// HTTP test client for making requests to our app
pub struct TestApp {
    app: axum::Router,
}

impl TestApp {
    /// App with both Istio entity getters, backed by `executor`.
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self::with_favicon(executor, "/nonexistent/favicon.jpg")
    }

    pub fn with_favicon(executor: Arc<dyn QueryExecutor>, favicon_path: &str) -> Self {
        let query = MetricQuery::default();
        let mut aggregator = Aggregator::new(executor.clone());
        aggregator.add_getter(Box::new(IstioEntityGetter::pods("Istio", query.clone())));
        aggregator.add_getter(Box::new(IstioEntityGetter::services(
            "Istio.VApp",
            query.clone(),
        )));

        let state = HttpServerState::new(
            MetricsAcquirer::new(executor, query),
            aggregator,
            "10.0.0.5:8081".parse().expect("valid address"),
            favicon_path,
        );

        Self {
            app: router(state, Duration::from_secs(10)),
        }
    }

    /// Send a GET request
    pub async fn get(&self, path: &str) -> Result<TestResponse> {
        self.get_with_headers(path, &[]).await
    }

    pub async fn get_with_headers(
        &self,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method("GET").uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty())?;

        let response = self.app.clone().oneshot(request).await?;
        Ok(TestResponse::new(response).await)
    }
}

/// Test response wrapper for easier assertions
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl TestResponse {
    async fn new(response: axum::response::Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default()
            .to_vec();
        let body = String::from_utf8_lossy(&body_bytes).to_string();

        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse response body as JSON
    pub fn json<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {}. Body: {}",
            expected, self.status, self.body
        );
        self
    }

    /// Assert response body contains text
    pub fn assert_body_contains(&self, text: &str) -> &Self {
        assert!(
            self.body.contains(text),
            "Expected body to contain '{}', but body was: {}",
            text,
            self.body
        );
        self
    }

    /// Assert content-type header
    pub fn assert_content_type(&self, expected: &str) -> &Self {
        let actual = self
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("<missing>");
        assert!(
            actual.starts_with(expected),
            "Expected content-type '{}', but was '{}'",
            expected,
            actual
        );
        self
    }
}
