//! Logging and metrics bootstrap for the `vantage` binary.
//!
//! stdout is reserved for the JSON result, so every log line goes to stderr.

use std::net::SocketAddr;
use std::str::FromStr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

pub const LOG_ENV: &str = "VANTAGE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "unsupported log format: {other} (expected pretty | json)"
            )),
        }
    }
}

/// A non-blank `env_value` (from `VANTAGE_LOG`) overrides `default_directive`.
pub fn log_filter(env_value: Option<&str>, default_directive: &str) -> Result<EnvFilter, String> {
    let directive = env_value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default_directive);
    EnvFilter::try_new(directive).map_err(|err| format!("invalid log filter {directive:?}: {err}"))
}

pub fn init_tracing(default_directive: &str, format: LogFormat) -> Result<(), String> {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = log_filter(env_value.as_deref(), default_directive)?;

    let output = match format {
        LogFormat::Pretty => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
        .map_err(|err| format!("failed to install tracing subscriber: {err}"))
}

/// Exporter listen address; `None` or blank leaves metrics unexported.
pub fn metrics_listen_addr(raw: Option<&str>) -> Result<Option<SocketAddr>, String> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<SocketAddr>()
        .map(Some)
        .map_err(|err| format!("invalid metrics address {raw:?} (expected host:port): {err}"))
}

#[cfg(feature = "prometheus")]
pub fn init_metrics(addr: Option<SocketAddr>) -> Result<(), String> {
    let Some(addr) = addr else {
        return Ok(());
    };
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|err| format!("failed to start prometheus exporter on {addr}: {err}"))?;
    tracing::info!(metrics_addr = %addr, "serving prometheus metrics");
    Ok(())
}

#[cfg(not(feature = "prometheus"))]
pub fn init_metrics(addr: Option<SocketAddr>) -> Result<(), String> {
    match addr {
        Some(addr) => Err(format!(
            "cannot export metrics on {addr}: vantage was built without feature `prometheus`"
        )),
        None => Ok(()),
    }
}
