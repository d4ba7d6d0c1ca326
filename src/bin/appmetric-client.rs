use anyhow::{Context, Result};
use appmetric::client::AppMetricClient;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "appmetric-client",
    about = "Fetch pod and service metrics from an appmetric server"
)]
struct Cli {
    /// Address of the appmetric server
    #[arg(long, default_value = "http://localhost:8081")]
    server_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let client = AppMetricClient::new(&cli.server_url).context("Failed to create client")?;

    let metrics = client
        .get_pod_app_metrics()
        .await
        .context("Failed to get application metrics")?;

    println!("Pod metrics: {}", metrics.pods);
    println!("Service metrics: {}", metrics.services);
    Ok(())
}
