use crate::aggregation::{merge_series, normalize_metric_set};
use crate::backend::QueryExecutor;
use crate::datamodel::{MetricKind, MetricSet, RawSeries, Scope};
use crate::error::MetricError;
use crate::parsing::prometheus::parse_vector;
use crate::query::MetricQuery;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Pod and service metric sets of one acquisition cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopedMetrics {
    pub pods: MetricSet,
    pub services: MetricSet,
}

/// Queries one metric kind and decodes its series.
pub async fn fetch_series(
    executor: &dyn QueryExecutor,
    query: &MetricQuery,
    kind: MetricKind,
) -> Result<Vec<RawSeries>, MetricError> {
    let expression = query.expression(kind);
    debug!("{} exp={}", kind, expression);

    let data = executor.query(&expression).await?;
    let series: Vec<RawSeries> = parse_vector(data, kind)?.collect();
    debug!("len({})={}", kind, series.len());
    Ok(series)
}

/// Throughput and latency series of one scope.
///
/// A failed query contributes no series. The scope fails only when both
/// queries fail, with the throughput error.
pub async fn fetch_scope_series(
    executor: &dyn QueryExecutor,
    query: &MetricQuery,
    scope: Scope,
) -> Result<(Vec<RawSeries>, Vec<RawSeries>), MetricError> {
    let (tps, latency) = tokio::join!(
        fetch_series(executor, query, scope.throughput()),
        fetch_series(executor, query, scope.latency()),
    );

    match (tps, latency) {
        (Ok(tps), Ok(latency)) => Ok((tps, latency)),
        (Ok(tps), Err(err)) => {
            error!("Failed to get {}: {}", scope.latency(), err);
            Ok((tps, Vec::new()))
        }
        (Err(err), Ok(latency)) => {
            error!("Failed to get {}: {}", scope.throughput(), err);
            Ok((Vec::new(), latency))
        }
        (Err(tps_err), Err(latency_err)) => {
            error!("Failed to get {}: {}", scope.throughput(), tps_err);
            error!("Failed to get {}: {}", scope.latency(), latency_err);
            Err(tps_err)
        }
    }
}

/// Builds the [`MetricSet`] of each scope from the backend.
///
/// Nothing is cached: every call runs the queries again.
#[derive(Debug, Clone)]
pub struct MetricsAcquirer {
    executor: Arc<dyn QueryExecutor>,
    query: MetricQuery,
}

impl MetricsAcquirer {
    pub fn new(executor: Arc<dyn QueryExecutor>, query: MetricQuery) -> Self {
        Self { executor, query }
    }

    pub fn executor(&self) -> Arc<dyn QueryExecutor> {
        self.executor.clone()
    }

    pub fn query(&self) -> &MetricQuery {
        &self.query
    }

    pub async fn fetch_scope(&self, scope: Scope) -> Result<MetricSet, MetricError> {
        let (tps, latency) = fetch_scope_series(self.executor.as_ref(), &self.query, scope).await?;

        let mut raw = MetricSet::new();
        merge_series(&mut raw, latency);
        merge_series(&mut raw, tps);
        debug!("Get {} {} metrics", raw.len(), scope);

        let result = normalize_metric_set(scope, raw);
        debug!("Get {} {} metrics in the end", result.len(), scope);
        Ok(result)
    }

    pub async fn pod_metrics(&self) -> Result<MetricSet, MetricError> {
        self.fetch_scope(Scope::Pod).await
    }

    pub async fn service_metrics(&self) -> Result<MetricSet, MetricError> {
        self.fetch_scope(Scope::Service).await
    }

    /// Fetches both scopes in parallel tasks.
    ///
    /// A failed scope is returned as an empty set. The call fails only if
    /// both scopes fail.
    pub async fn fetch_all(&self) -> Result<ScopedMetrics, MetricError> {
        let pods = tokio::spawn({
            let acquirer = self.clone();
            async move { acquirer.pod_metrics().await }
        });
        let services = tokio::spawn({
            let acquirer = self.clone();
            async move { acquirer.service_metrics().await }
        });

        let pods = flatten(pods.await);
        let services = flatten(services.await);

        match (pods, services) {
            (Err(pod_err), Err(svc_err)) => {
                error!("Failed to get pod metrics: {}", pod_err);
                error!("Failed to get service metrics: {}", svc_err);
                Err(MetricError::AllFetchesFailed(
                    "Pod metrics, nor Service metrics".to_string(),
                ))
            }
            (pods, services) => Ok(ScopedMetrics {
                pods: or_empty(Scope::Pod, pods),
                services: or_empty(Scope::Service, services),
            }),
        }
    }
}

fn flatten(
    joined: Result<Result<MetricSet, MetricError>, tokio::task::JoinError>,
) -> Result<MetricSet, MetricError> {
    joined.map_err(MetricError::from).and_then(|result| result)
}

fn or_empty(scope: Scope, result: Result<MetricSet, MetricError>) -> MetricSet {
    result.unwrap_or_else(|err| {
        warn!("Failed to get {} metrics: {}", scope, err);
        MetricSet::new()
    })
}
