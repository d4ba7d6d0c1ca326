mod common;

use anyhow::Result;
use appmetric::client::{API_PATH_POD, AppMetricClient};
use appmetric::datamodel::MetricKind;
use appmetric::error::MetricError;
use appmetric::http::server::router;
use appmetric::http::state::HttpServerState;
use appmetric::acquisition::{Aggregator, MetricsAcquirer};
use appmetric::query::MetricQuery;
use appmetric::test_utils::ScriptedExecutor;
use common::fixtures::{POD_KEY, POD_UID};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the metric server on an ephemeral port and returns its url.
async fn serve(executor: ScriptedExecutor) -> Result<String> {
    let executor = Arc::new(executor);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;

    let state = HttpServerState::new(
        MetricsAcquirer::new(executor.clone(), MetricQuery::default()),
        Aggregator::new(executor),
        address,
        "/nonexistent/favicon.jpg",
    );
    let app = router(state, Duration::from_secs(5));
    tokio::spawn(async move {
        let _ = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await;
    });

    Ok(format!("http://{}", address))
}

#[tokio::test]
async fn test_get_metrics() -> Result<()> {
    let url = serve(
        ScriptedExecutor::new().vector(MetricKind::PodLatency, vec![(POD_UID, "0.112")]),
    )
    .await?;
    let client = AppMetricClient::new(&url)?;

    let set = client.get_metrics(API_PATH_POD).await?;
    assert_eq!(set.get(POD_KEY).map(|m| m.latency), Some(0.112));
    Ok(())
}

#[tokio::test]
async fn test_service_side_failing() -> Result<()> {
    let url = serve(
        ScriptedExecutor::new().vector(MetricKind::PodLatency, vec![(POD_UID, "0.112")]),
    )
    .await?;
    let client = AppMetricClient::new(&url)?;

    let metrics = client.get_pod_app_metrics().await?;
    assert_eq!(metrics.pods.len(), 1);
    assert!(metrics.services.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_both_sides_failing() -> Result<()> {
    let url = serve(ScriptedExecutor::new()).await?;
    let client = AppMetricClient::new(&url)?;

    let err = client.get_pod_app_metrics().await.unwrap_err();
    assert!(matches!(err, MetricError::AllFetchesFailed(_)));
    Ok(())
}

#[tokio::test]
async fn test_non_200_status() -> Result<()> {
    let url = serve(ScriptedExecutor::new()).await?;
    let client = AppMetricClient::new(&url)?;

    let err = client.get_metrics("/service/metrics").await.unwrap_err();
    assert!(matches!(err, MetricError::HttpStatus { status: 502, .. }));
    Ok(())
}
