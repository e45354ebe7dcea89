//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use faultline_config::Config;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder bound to loopback
    pub fn new() -> Self {
        let mut config = Config::default();
        config.server.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));
        Self { config }
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Use a different correlation header
    pub fn with_request_id_header(mut self, header: &str) -> Self {
        self.config.server.request_id_header = header.to_owned();
        self
    }

    /// Require longer passwords
    pub fn with_password_min_length(mut self, min_length: usize) -> Self {
        self.config.validation.password_min_length = Some(min_length);
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
