//! Telemetry and observability setup.
//!
//! Structured logging through `tracing`, filtered by `RUST_LOG` when set and
//! by the configured log level otherwise.

use crate::config::TelemetrySettings;
use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Initialize the global tracing subscriber.
///
/// Fails if a global subscriber was already installed.
///
/// # Examples
///
/// ```no_run
/// use postboard_common::{config::TelemetrySettings, telemetry::init_tracing};
///
/// init_tracing(&TelemetrySettings::default()).expect("Failed to initialize tracing");
/// ```
pub fn init_tracing(settings: &TelemetrySettings) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    let registry = Registry::default().with(env_filter);

    if settings.json_logging {
        registry
            .with(json_layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    } else {
        registry
            .with(pretty_layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    }

    tracing::info!(service = %settings.service_name, "Tracing initialized");
    Ok(())
}

/// Create a JSON logging layer
fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_target(true)
        .with_level(true)
}

/// Create a pretty-formatted logging layer
fn pretty_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .pretty()
        .with_thread_ids(true)
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let settings = TelemetrySettings::default();
        // Only one global subscriber can exist per process; whichever call
        // comes second must report an error instead of panicking.
        let first = init_tracing(&settings);
        let second = init_tracing(&settings);
        assert!(first.is_err() || second.is_err());
    }
}
