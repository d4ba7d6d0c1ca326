#![allow(dead_code)]

pub mod fixtures;
pub mod http;

use anyhow::Result;
use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned answer of the Prometheus stub for one query expression.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Canned {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
            delay: None,
        }
    }

    pub fn with_status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    /// Answers only after `delay`, to trip client timeouts.
    pub fn slow(body: impl Into<String>, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::ok(body)
        }
    }
}

#[derive(Debug, Default)]
struct StubState {
    answers: HashMap<String, Canned>,
    jobs: Vec<String>,
    hits: AtomicUsize,
}

/// Throwaway Prometheus query API on an ephemeral local port.
pub struct PrometheusStub {
    pub address: SocketAddr,
    state: Arc<StubState>,
}

impl PrometheusStub {
    /// Unknown expressions are answered with an empty instant vector.
    pub async fn start(answers: HashMap<String, Canned>) -> Result<Self> {
        let state = Arc::new(StubState {
            answers,
            jobs: vec!["istio-mesh".to_string(), "kubernetes-pods".to_string()],
            hits: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/api/v1/query", get(query))
            .route("/api/v1/label/{label}/values", get(label_values))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { address, state })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.address)
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

async fn query(
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let expression = params.get("query").cloned().unwrap_or_default();
    match state.answers.get(&expression) {
        Some(canned) => {
            if let Some(delay) = canned.delay {
                tokio::time::sleep(delay).await;
            }
            (canned.status, canned.body.clone())
        }
        None => (StatusCode::OK, fixtures::vector_envelope(&[])),
    }
}

async fn label_values(
    State(state): State<Arc<StubState>>,
    Path(label): Path<String>,
) -> impl IntoResponse {
    if label != "job" {
        return Json(serde_json::json!({ "status": "success", "data": [] }));
    }
    Json(serde_json::json!({ "status": "success", "data": state.jobs }))
}
