#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;
pub mod validation;

use serde::Deserialize;

pub use health::*;
pub use server::*;
pub use telemetry::{LogFormat, TelemetryConfig};
pub use validation::*;

/// Top-level configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Overrides for the custom validation rules
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
