use crate::error::MetricError;
use crate::query::validate_rate_window;
use anyhow::Error;
use confique::Config;
use std::{
    net::IpAddr,
    sync::{Arc, OnceLock},
    time::Duration,
};

#[derive(Debug, Clone, Config)]
pub struct AppMetricConfig {
    #[config(env = "APPMETRIC_PROMETHEUS_URL", default = "http://localhost:9090")]
    pub prometheus_url: String,

    #[config(env = "APPMETRIC_PORT", default = 8081)]
    pub port: u16,
    #[config(env = "APPMETRIC_ENDPOINT", default = "0.0.0.0")]
    pub endpoint: IpAddr,

    #[config(env = "APPMETRIC_QUERY_TIMEOUT_SECONDS", default = 60)]
    pub query_timeout_seconds: u64,

    #[config(env = "APPMETRIC_RATE_WINDOW", default = "3m")]
    pub rate_window: String,

    #[config(env = "APPMETRIC_HTTP_SERVER_TIMEOUT_SECONDS", default = 90)]
    pub http_server_timeout_seconds: u64,

    #[config(env = "APPMETRIC_FAVICON_PATH", default = "/tmp/favicon.jpg")]
    pub favicon_path: String,

    /// Entity getter categories, comma separated in the environment.
    #[config(
        env = "APPMETRIC_ENTITY_GETTERS",
        parse_env = confique::env::parse::list_by_comma,
        default = ["Istio", "Istio.VApp"]
    )]
    pub entity_getters: Vec<String>,

    #[config(env = "APPMETRIC_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}

impl AppMetricConfig {
    pub fn load() -> Result<AppMetricConfig, Error> {
        let c = AppMetricConfig::builder()
            .env()
            .file("settings.toml")
            .load()?;

        c.validate()?;
        Ok(c)
    }

    pub fn validate(&self) -> Result<(), MetricError> {
        validate_rate_window(&self.rate_window)?;
        if self.query_timeout_seconds == 0 {
            return Err(MetricError::Configuration(
                "query timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_seconds)
    }

    /// Command-line values take precedence over the environment.
    pub fn with_overrides(mut self, prometheus_url: Option<String>, port: Option<u16>) -> Self {
        if let Some(url) = prometheus_url {
            self.prometheus_url = url;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

static APPMETRIC_CONFIG: OnceLock<Arc<AppMetricConfig>> = OnceLock::new();

pub fn get() -> Result<Arc<AppMetricConfig>, Error> {
    APPMETRIC_CONFIG.get().cloned().ok_or_else(|| {
        Error::msg(
            "Configuration not loaded. Please call load_configuration() before using the configuration",
        )
    })
}

pub fn load_configuration() -> Result<(), Error> {
    if APPMETRIC_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = AppMetricConfig::load()?;
    APPMETRIC_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}

/// Stores an already loaded configuration, typically with command-line
/// overrides applied.
pub fn set(config: AppMetricConfig) -> Result<(), Error> {
    config.validate()?;
    APPMETRIC_CONFIG
        .set(Arc::new(config))
        .map_err(|_| Error::msg("Configuration already loaded"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_load_config() {
        let config = AppMetricConfig::load().unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.endpoint, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.prometheus_url, "http://localhost:9090");
        assert_eq!(config.rate_window, "3m");
        assert_eq!(config.query_timeout(), Duration::from_secs(60));
        assert_eq!(config.http_server_timeout_seconds, 90);
        assert_eq!(config.entity_getters, vec!["Istio", "Istio.VApp"]);
        assert!(config.sentry_dsn.is_none());

        temp_env::with_var("APPMETRIC_PORT", Some("9000"), || {
            let config = AppMetricConfig::load().unwrap();
            assert_eq!(config.port, 9000);
        });
    }

    #[test]
    #[serial]
    fn test_entity_getters_from_env() {
        temp_env::with_var("APPMETRIC_ENTITY_GETTERS", Some("Istio"), || {
            let config = AppMetricConfig::load().unwrap();
            assert_eq!(config.entity_getters, vec!["Istio"]);
        });
    }

    #[test]
    #[serial]
    fn test_invalid_rate_window() {
        temp_env::with_var("APPMETRIC_RATE_WINDOW", Some("3 minutes"), || {
            assert!(AppMetricConfig::load().is_err());
        });

        temp_env::with_var("APPMETRIC_RATE_WINDOW", Some("1h30m"), || {
            let config = AppMetricConfig::load().unwrap();
            assert_eq!(config.rate_window, "1h30m");
        });
    }

    #[test]
    #[serial]
    fn test_overrides() {
        let config = AppMetricConfig::load()
            .unwrap()
            .with_overrides(Some("https://prometheus:9090".to_string()), None);
        assert_eq!(config.prometheus_url, "https://prometheus:9090");
        assert_eq!(config.port, 8081);
    }

    #[test]
    #[serial]
    fn test_load_configuration() {
        load_configuration().unwrap();
        assert!(APPMETRIC_CONFIG.get().is_some());

        let config = get().unwrap();
        assert_eq!(config.port, 8081);
        assert!(set(AppMetricConfig::load().unwrap()).is_err());
    }
}
