use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// The facade server for one org.
pub struct MclServer {
    config: ServerConfig,
}

impl MclServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build state over a fresh standalone network and serve requests.
    pub async fn serve(self) -> ServerResult<()> {
        let state = AppState::standalone(&self.config)?;
        let app = build_router(state);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!(org = %self.config.org, "facade listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = MclServer::new(ServerConfig::default());
        assert_eq!(
            server.config().bind_addr,
            "127.0.0.1:3000".parse().unwrap()
        );
    }
}
