/// Prometheus envelopes used across the integration tests
use appmetric::datamodel::MetricKind;
use appmetric::query::MetricQuery;
use serde_json::json;

pub const POD_UID: &str = "kubernetes://video-671194421-vpxkh.default";
pub const POD_KEY: &str = "default/video-671194421-vpxkh";

pub const SERVICE_UID: &str = "productpage.default.svc.cluster.local";
pub const SERVICE_KEY: &str = "default/productpage";

/// Success envelope with one `destination_uid` series per sample.
pub fn vector_envelope(samples: &[(&str, &str)]) -> String {
    let result: Vec<_> = samples
        .iter()
        .map(|(uid, value)| {
            json!({
                "metric": {
                    "destination_uid": uid,
                    "destination_ip": "[0 0 0 0 0 0 0 0 0 0 255 255 10 2 1 84]",
                    "response_code": "200"
                },
                "value": [1516310400.123, value]
            })
        })
        .collect();
    json!({
        "status": "success",
        "data": { "resultType": "vector", "result": result }
    })
    .to_string()
}

pub fn matrix_envelope() -> String {
    json!({
        "status": "success",
        "data": { "resultType": "matrix", "result": [] }
    })
    .to_string()
}

pub fn error_envelope(error_type: &str, message: &str) -> String {
    json!({
        "status": "error",
        "errorType": error_type,
        "error": message
    })
    .to_string()
}

pub fn expression(kind: MetricKind) -> String {
    MetricQuery::default().expression(kind)
}
