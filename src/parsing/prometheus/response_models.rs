use crate::error::MetricError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";
pub const RESULT_TYPE_VECTOR: &str = "vector";

/// Envelope of the Prometheus HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<QueryData>,
    #[serde(rename = "errorType", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PromResponse {
    pub fn success(data: QueryData) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data: Some(data),
            error_type: None,
            error: None,
        }
    }

    pub fn error(error_type: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            data: None,
            error_type: Some(error_type.into()),
            error: Some(error.into()),
        }
    }

    /// Surfaces error envelopes as [`MetricError::BackendError`].
    pub fn into_data(self) -> Result<QueryData, MetricError> {
        if self.status == STATUS_ERROR {
            return Err(MetricError::BackendError {
                error_type: self.error_type.unwrap_or_default(),
                message: self.error.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        self.data.ok_or_else(|| {
            MetricError::DecodeError(<serde_json::Error as serde::de::Error>::custom(
                "missing data in success response",
            ))
        })
    }
}

/// The `data` part of a query response. `result` is decoded once the
/// result type is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryData {
    #[serde(rename = "resultType")]
    pub result_type: String,
    pub result: serde_json::Value,
}

impl QueryData {
    pub fn vector(result: serde_json::Value) -> Self {
        Self {
            result_type: RESULT_TYPE_VECTOR.to_string(),
            result,
        }
    }
}

/// Response of `/api/v1/label/<name>/values`.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelValuesResponse {
    pub status: String,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(rename = "errorType", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LabelValuesResponse {
    pub fn into_values(self) -> Result<Vec<String>, MetricError> {
        if self.status == STATUS_ERROR {
            return Err(MetricError::BackendError {
                error_type: self.error_type.unwrap_or_default(),
                message: self.error.unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        Ok(self.data)
    }
}

/// One element of an instant vector result.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorSample {
    #[serde(default)]
    pub metric: HashMap<String, String>,
    pub value: SamplePair,
}

/// `[<unix timestamp>, "<float as string>"]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "(f64, String)")]
pub struct SamplePair {
    pub timestamp: f64,
    pub value: f64,
}

impl TryFrom<(f64, String)> for SamplePair {
    type Error = String;

    fn try_from((timestamp, value): (f64, String)) -> Result<Self, Self::Error> {
        let value = value
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid sample value {:?}: {}", value, e))?;
        Ok(Self { timestamp, value })
    }
}
