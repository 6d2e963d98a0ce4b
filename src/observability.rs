use anyhow::Result;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Environment, LogFormat, LoggingConfig};

/// Initialize tracing and logging
///
/// This sets up:
/// - Structured JSON logging (production, or `logging.format = "json"`)
/// - Console logging (development)
/// - Level filtering from `RUST_LOG`, falling back to `logging.level`
pub fn init_observability(
    service_name: &str,
    service_version: &str,
    logging: &LoggingConfig,
    environment: Environment,
) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let use_json = logging.format == LogFormat::Json || environment == Environment::Production;

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_filter(env_filter))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_filter(env_filter),
            )
            .try_init()?;
    }

    tracing::info!(
        service.name = service_name,
        service.version = service_version,
        environment = ?environment,
        json = use_json,
        "Logging initialized"
    );

    Ok(())
}
