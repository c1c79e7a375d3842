#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod asr;
mod docs;
mod error;
mod health;
mod request;
mod state;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use murmur_audio::AudioNormalizer;
use murmur_config::Config;
use murmur_engine::TranscriptionEngine;
use tower_http::trace::TraceLayer;

pub use error::{GatewayError, Result};

use state::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server and its engine from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be initialized
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let engine = murmur_engine::build_engine(config)?;

        Ok(Self::with_engine(config, engine))
    }

    /// Build the server around an already constructed engine
    pub fn with_engine(config: &Config, engine: Arc<dyn TranscriptionEngine>) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 9000)));

        tracing::debug!(engine = engine.name(), "building router");

        let state = Arc::new(AppState {
            engine,
            normalizer: AudioNormalizer::from_config(&config.audio),
            sample_rate: config.audio.sample_rate,
            docs_path: config.server.docs_path.clone(),
        });

        let mut app = Router::new()
            .route("/", get(docs::redirect_to_docs))
            .route(&config.server.docs_path, get(docs::docs_page))
            .route("/openapi.json", get(docs::openapi))
            .route("/asr", post(asr::asr))
            .route("/detect-language", post(asr::detect_language));

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        let router = app
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
            .layer(TraceLayer::new_for_http());

        Self { router, listen_address }
    }

    /// Get the configured listen address
    #[must_use]
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
