use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// nslink HTTP server.
pub struct NslinkServer {
    state: AppState,
}

impl NslinkServer {
    /// Server over a fresh in-memory namespace holding the configured
    /// startup domains.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        Ok(Self {
            state: AppState::new(config)?,
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.state.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let bind_addr = self.config().bind_addr;
        let max_connections = self.config().max_connections.max(1);
        let app = self
            .router()
            .layer(ConcurrencyLimitLayer::new(max_connections));
        let listener = TcpListener::bind(bind_addr).await?;
        tracing::info!(%bind_addr, max_connections, "nslink server listening");
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
