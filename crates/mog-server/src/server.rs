use std::sync::Arc;

use tokio::net::TcpListener;

use mog_engine::MotherEngine;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// MOG HTTP server: one engine behind one router.
pub struct MogServer {
    config: ServerConfig,
    engine: Arc<MotherEngine>,
}

impl MogServer {
    pub fn new(config: ServerConfig, engine: MotherEngine) -> Self {
        Self {
            config,
            engine: Arc::new(engine),
        }
    }

    /// Load the corpus named in the configuration and build the engine.
    pub fn from_config(config: ServerConfig) -> ServerResult<Self> {
        let engine = MotherEngine::open(&config.corpus_path, config.engine.clone())?;
        Ok(Self::new(config, engine))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn engine(&self) -> &MotherEngine {
        &self.engine
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.engine))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            corpus = %self.config.corpus_path.display(),
            "MOG server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
