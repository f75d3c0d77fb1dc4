//! Axum HTTP server

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::core::dashboard::Dashboard;
use crate::core::ConfigProvider;
use crate::utils::error::{DashError, Result};

use super::routes::build_router;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }
}

/// Web server configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct WebServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

impl WebServerConfig {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    pub fn from_provider(config: &dyn ConfigProvider) -> Self {
        Self {
            host: config.host().to_string(),
            port: config.port(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Router with request tracing, ready to serve.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct WebServer {
    config: WebServerConfig,
    state: AppState,
}

impl WebServer {
    pub fn new(config: WebServerConfig, dashboard: Dashboard) -> Self {
        Self {
            config,
            state: AppState::new(dashboard),
        }
    }

    /// Run the web server until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let address = self.config.bind_address();
        let app = build_app(self.state);

        // 使用 ToSocketAddrs，讓 "localhost" 之類的主機名也能解析
        let listener = tokio::net::TcpListener::bind(address.as_str())
            .await
            .map_err(|e| DashError::ServerError {
                message: format!("Failed to bind {}: {}", address, e),
            })?;
        let addr: SocketAddr = listener.local_addr()?;

        tracing::info!("🚀 Dashboard listening on http://{}", addr);

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DashError::ServerError {
                message: format!("Server error: {}", e),
            })?;

        tracing::info!("Dashboard server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
