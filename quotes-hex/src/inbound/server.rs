//! HTTP Server configuration and startup.

use std::future::Future;
use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use quotes_types::{Configuration, LogSink};

use super::handlers::{self, AppState};
use super::logging::logging_middleware;
use crate::LoggingInterceptor;

/// HTTP Server for the Quote Editor API.
pub struct HttpServer {
    state: Arc<AppState>,
    interceptor: LoggingInterceptor,
}

impl HttpServer {
    /// Creates a new HTTP server that logs requests through `tracing`.
    pub fn new(config: Configuration) -> Self {
        Self {
            state: Arc::new(AppState { config }),
            interceptor: LoggingInterceptor::default(),
        }
    }

    /// Creates a new HTTP server that reports request logs to `sink`.
    pub fn with_sink(config: Configuration, sink: Arc<dyn LogSink>) -> Self {
        Self {
            state: Arc::new(AppState { config }),
            interceptor: LoggingInterceptor::new(sink),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::info))
            .route("/health", get(handlers::health))
            .layer(middleware::from_fn_with_state(
                self.interceptor.clone(),
                logging_middleware,
            ))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Binds `addr` and serves until Ctrl+C or SIGTERM.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` resolves, then
    /// lets in-flight requests finish.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        tracing::info!(
            %local_addr,
            environment = %self.state.config.node_env,
            "Quote editor API listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Resolves on the first of Ctrl+C or SIGTERM. A signal that cannot be
/// installed is logged and never fires.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Cannot listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "interrupt",
        _ = terminate => "terminate",
    };

    tracing::info!(signal = received, "Shutdown requested, draining in-flight requests");
}
