//! Test utilities for appmetric tests
//!
//! Provides an in-memory [`QueryExecutor`] that answers each PromQL
//! expression with a scripted reply, so acquisition code can be tested
//! without a Prometheus server.

use crate::backend::QueryExecutor;
use crate::datamodel::MetricKind;
use crate::error::MetricError;
use crate::parsing::prometheus::QueryData;
use crate::query::MetricQuery;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What the scripted backend answers for one expression.
#[derive(Debug, Clone)]
pub enum Reply {
    Vector(Value),
    Matrix,
    Backend(String),
    Malformed,
}

#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    query: MetricQuery,
    replies: HashMap<String, Reply>,
    calls: AtomicUsize,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the reply for the expression of `kind`.
    pub fn reply(mut self, kind: MetricKind, reply: Reply) -> Self {
        self.replies.insert(self.query.expression(kind), reply);
        self
    }

    pub fn vector(self, kind: MetricKind, samples: Vec<(&str, &str)>) -> Self {
        self.reply(kind, Reply::Vector(vector_result(samples)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn query(&self, expression: &str) -> Result<QueryData, MetricError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.replies.get(expression) {
            Some(Reply::Vector(result)) => Ok(QueryData::vector(result.clone())),
            Some(Reply::Matrix) => Ok(QueryData {
                result_type: "matrix".to_string(),
                result: json!([]),
            }),
            Some(Reply::Backend(message)) => Err(MetricError::BackendError {
                error_type: "execution".to_string(),
                message: message.clone(),
            }),
            Some(Reply::Malformed) => Ok(QueryData::vector(json!({"unexpected": true}))),
            None => Err(MetricError::BackendError {
                error_type: "bad_data".to_string(),
                message: format!("nothing scripted for {}", expression),
            }),
        }
    }
}

/// Instant vector payload with one `destination_uid` series per sample.
pub fn vector_result(samples: Vec<(&str, &str)>) -> Value {
    Value::Array(
        samples
            .into_iter()
            .map(|(uid, value)| {
                json!({
                    "metric": { "destination_uid": uid, "response_code": "200" },
                    "value": [1516310400.0, value]
                })
            })
            .collect(),
    )
}
