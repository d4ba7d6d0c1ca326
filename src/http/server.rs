use super::favicon::favicon;
use super::metrics::{entity_metrics, pod_metrics, service_metrics};
use super::state::HttpServerState;
use super::welcome::welcome;
use crate::config;
use anyhow::Result;
use axum::Router;
use axum::http::header;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace;
use tower_http::{ServiceBuilderExt, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{Level, error, info};

/// Routes of the metric server. Unmatched paths get the welcome page.
pub fn router(state: HttpServerState, timeout: Duration) -> Router {
    // List of headers that shouldn't be logged
    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();

    let middleware = ServiceBuilder::new()
        .sensitive_request_headers(sensitive_headers.clone())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .sensitive_response_headers(sensitive_headers)
        .layer(TimeoutLayer::new(timeout))
        .into_inner();

    Router::new()
        .route("/pod/metrics", get(pod_metrics))
        .route("/service/metrics", get(service_metrics))
        .route("/entity/metrics", get(entity_metrics))
        .route("/favicon.ico", get(favicon))
        .fallback(welcome)
        .layer(middleware)
        .with_state(state)
}

pub async fn run_http_server(state: HttpServerState, address: SocketAddr) -> Result<()> {
    let config = config::get()?;
    let timeout = Duration::from_secs(config.http_server_timeout_seconds);

    let app = router(state, timeout);

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("HTTP server listens on: {}", listener.local_addr()?);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Wait for the CTRL+C signal
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to install shutdown CTRL+C signal handler: {}", err);
        std::future::pending::<()>().await;
    }
}
