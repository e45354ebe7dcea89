use std::net::SocketAddr;

use serde::Deserialize;

use crate::health::HealthConfig;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Header carrying the correlation id, stamped into error bodies
    #[serde(default = "default_request_id_header")]
    pub request_id_header: String,
    #[serde(default)]
    pub health: HealthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            request_id_header: default_request_id_header(),
            health: HealthConfig::default(),
        }
    }
}

fn default_request_id_header() -> String {
    "x-request-id".to_string()
}
