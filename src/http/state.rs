use crate::acquisition::{Aggregator, MetricsAcquirer};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct HttpServerState {
    pub name: Arc<String>,
    pub acquirer: Arc<MetricsAcquirer>,
    pub aggregator: Arc<Aggregator>,
    pub host_name: Arc<String>,
    pub address: SocketAddr,
    pub favicon_path: Arc<PathBuf>,
}

impl HttpServerState {
    pub fn new(
        acquirer: MetricsAcquirer,
        aggregator: Aggregator,
        address: SocketAddr,
        favicon_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: Arc::new("AppMetric".to_string()),
            acquirer: Arc::new(acquirer),
            aggregator: Arc::new(aggregator),
            host_name: Arc::new(local_host_name()),
            address,
            favicon_path: Arc::new(favicon_path.into()),
        }
    }
}

pub fn local_host_name() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(err) => {
            tracing::error!("Failed to get hostname: {}", err);
            "localhost".to_string()
        }
    }
}
