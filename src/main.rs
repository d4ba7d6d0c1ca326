#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use appmetric::acquisition::{Aggregator, GetterFactory, MetricsAcquirer};
use appmetric::backend::PrometheusClient;
use appmetric::config::{self, AppMetricConfig};
use appmetric::http::server::run_http_server;
use appmetric::http::state::HttpServerState;
use appmetric::query::MetricQuery;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{Level, event, info, warn};

#[derive(Debug, Parser)]
#[command(name = "appmetric", about = "Application latency and throughput from Prometheus")]
struct Cli {
    /// Address of the Prometheus server, e.g. http://localhost:9090
    #[arg(long)]
    prom_url: Option<String>,

    /// Port the metric server listens on
    #[arg(long)]
    port: Option<u16>,
}

fn main() -> Result<()> {
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|e| anyhow::anyhow!("Failed to install CryptoProvider: {:?}", e))?;

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    // Load configuration, command-line flags win
    let config = AppMetricConfig::load()
        .context("Failed to load configuration")?
        .with_overrides(cli.prom_url, cli.port);
    config::set(config).context("Failed to store configuration")?;
    let config = config::get().context("Failed to get configuration")?;

    // Initialize Sentry if DSN is provided
    let _sentry = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let prometheus = PrometheusClient::new(&config.prometheus_url, config.query_timeout())
        .context("Failed to create Prometheus client")?;
    match prometheus.label_values("job").await {
        Ok(jobs) => info!("Prometheus at {} has {} jobs", prometheus.host(), jobs.len()),
        Err(err) => warn!("Prometheus at {} is not reachable yet: {}", prometheus.host(), err),
    }

    let query = MetricQuery::new(&config.rate_window).context("Invalid rate window")?;
    let executor = Arc::new(prometheus);
    let acquirer = MetricsAcquirer::new(executor.clone(), query.clone());

    let factory = GetterFactory::new(query);
    let mut aggregator = Aggregator::new(executor);
    for category in &config.entity_getters {
        let getter = factory
            .create(category, category)
            .with_context(|| format!("Failed to create entity getter {}", category))?;
        aggregator.add_getter(getter);
    }
    info!("Entity getters: {:?}", aggregator.getter_names());

    // Exit the program if a panic occurs
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_panic(info);
        std::process::exit(1);
    }));

    let address = SocketAddr::from((config.endpoint, config.port));
    let state = HttpServerState::new(acquirer, aggregator, address, &config.favicon_path);

    info!("Starting HTTP server on {}...", address);
    match run_http_server(state, address).await {
        Ok(_) => {
            event!(Level::INFO, "HTTP server stopped gracefully");
            Ok(())
        }
        Err(err) => {
            event!(Level::ERROR, "HTTP server failed to start: {}", err);
            Err(err)
        }
    }
}
