//! Logging setup
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a `fmt`
//! layer in text or JSON form.

use faultline_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber from configuration
///
/// `RUST_LOG` takes precedence over the configured filter. An unparsable
/// filter falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), &config.log_filter);

    tracing_subscriber::registry()
        .with(fmt_layer(config.format))
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

fn build_filter(env_override: Option<&str>, configured: &str) -> EnvFilter {
    let directive = env_override.filter(|d| !d.trim().is_empty()).unwrap_or(configured);
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn fmt_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().with_current_span(false).boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_is_used() {
        let filter = build_filter(None, "warn,faultline_http=debug").to_string();
        assert!(filter.contains("faultline_http=debug"));
        assert!(filter.contains("warn"));
    }

    #[test]
    fn env_override_wins() {
        let filter = build_filter(Some("trace"), "warn");
        assert_eq!(filter.to_string(), "trace");
    }

    #[test]
    fn blank_override_is_ignored() {
        let filter = build_filter(Some("  "), "error");
        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn invalid_filter_falls_back_to_info() {
        let filter = build_filter(None, "faultline=loudest");
        assert_eq!(filter.to_string(), "info");
    }
}
