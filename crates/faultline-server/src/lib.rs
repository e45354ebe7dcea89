//! HTTP service demonstrating the faultline error and validation stack

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod accounts;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use faultline_config::{Config, ValidationConfig};
use faultline_validate::{PIN_PATTERN, PHONE_PATTERN, PasswordPolicy, Rules, Validator};
use http::{HeaderName, StatusCode};
use tower_http::trace::TraceLayer;

pub use accounts::{Account, AccountStore, SignUp};
pub use state::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a validation override does not compile or the
    /// request-id header name is invalid
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let state = AppState {
            validator: Arc::new(Validator::new(build_rules(&config.validation)?)),
            accounts: AccountStore::default(),
        };

        let mut app = Router::new();

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(|| async { (StatusCode::OK, "ok") }));
        }

        let app = app
            .merge(accounts::router())
            .merge(session::router())
            .fallback(faultline_http::route_not_found)
            .method_not_allowed_fallback(faultline_http::route_method_not_allowed)
            .with_state(state);

        let header = HeaderName::try_from(config.server.request_id_header.as_str())
            .map_err(|e| anyhow::anyhow!("invalid request id header: {e}"))?;

        let router = faultline_http::with_request_id(app, header).layer(TraceLayer::new_for_http());

        Ok(Self { router, listen_address })
    }

    /// Get the configured listen address
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

fn build_rules(config: &ValidationConfig) -> anyhow::Result<Rules> {
    let mut policy = PasswordPolicy::default();
    if let Some(min_length) = config.password_min_length {
        policy.min_length = min_length;
    }
    if let Some(symbols) = &config.password_symbols {
        policy.symbols.clone_from(symbols);
    }

    Rules::new(
        config.phone_pattern.as_deref().unwrap_or(PHONE_PATTERN),
        config.pin_pattern.as_deref().unwrap_or(PIN_PATTERN),
        &policy,
    )
    .map_err(|e| anyhow::anyhow!("invalid validation rule: {e}"))
}
