//! # HTTP Server
//!
//! Wraps the cafe routes in CORS and request tracing and binds the listener.

use std::io;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::rest_api::{CafeHandler, CafeServer};
use crate::store::{CafeStore, InMemoryCafeStore, JsonFileCafeStore, StoreResult};

use super::config::HttpServerConfig;

/// HTTP server for the cafe directory
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Serve an existing store
    pub fn new<S: CafeStore + 'static>(config: HttpServerConfig, store: Arc<S>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Open the store named by `config.data_file`, or an in-memory one
    pub fn from_config(config: HttpServerConfig) -> StoreResult<Self> {
        match &config.data_file {
            Some(path) => {
                let store = Arc::new(JsonFileCafeStore::open(path)?);
                tracing::info!(path = %path.display(), "using JSON snapshot store");
                Ok(Self::new(config, store))
            }
            None => {
                tracing::info!("using in-memory store");
                Ok(Self::new(config, Arc::new(InMemoryCafeStore::new())))
            }
        }
    }

    fn build_router<S: CafeStore + 'static>(config: &HttpServerConfig, store: Arc<S>) -> Router {
        let handler = CafeHandler::new(store, config.api_key.clone());
        let cafes = CafeServer::new(handler, config.error_mode).router();

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(cafes)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured address. Host names are resolved.
    pub async fn bind(&self) -> io::Result<TcpListener> {
        TcpListener::bind(self.config.socket_addr()).await
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> io::Result<()> {
        let listener = self.bind().await?;
        let addr = listener.local_addr()?;
        tracing::info!(%addr, error_mode = ?self.config.error_mode, "cafe API listening");

        axum::serve(listener, self.router).await
    }
}
