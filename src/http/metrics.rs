use super::app_error::AppError;
use super::state::HttpServerState;
use crate::datamodel::{MetricResponse, MetricSet, Scope};
use axum::Json;
use axum::extract::State;
use tracing::{debug, error};

async fn scope_metrics(
    state: &HttpServerState,
    scope: Scope,
) -> Result<Json<MetricSet>, AppError> {
    match state.acquirer.fetch_scope(scope).await {
        Ok(set) => {
            debug!("Serving {} {} metrics", set.len(), scope);
            Ok(Json(set))
        }
        Err(err) => {
            error!("Failed to get {} Metrics: {}", scope, err);
            Err(AppError::bad_gateway(err))
        }
    }
}

pub async fn pod_metrics(
    State(state): State<HttpServerState>,
) -> Result<Json<MetricSet>, AppError> {
    scope_metrics(&state, Scope::Pod).await
}

pub async fn service_metrics(
    State(state): State<HttpServerState>,
) -> Result<Json<MetricSet>, AppError> {
    scope_metrics(&state, Scope::Service).await
}

pub async fn entity_metrics(
    State(state): State<HttpServerState>,
) -> Result<Json<MetricResponse>, AppError> {
    let entities = state.aggregator.entity_metrics().await.map_err(|err| {
        error!("Failed to get entity Metrics: {}", err);
        AppError::bad_gateway(err)
    })?;

    let mut response = MetricResponse::new();
    for entity in entities {
        response.add_metric(entity);
    }
    Ok(Json(response))
}
