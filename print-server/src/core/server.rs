//! HTTP server startup and shutdown

use std::net::SocketAddr;

use anyhow::Context;
use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::core::{Config, ServerState};

/// HTTP request log middleware
async fn log_request(
    request: axum::extract::Request,
    next: middleware::Next,
) -> axum::response::Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await,
        };

        let app = crate::api::build_app()
            .with_state(state)
            // The web client may be served from any origin (file://, dev
            // server, kiosk shell), so cross-origin requests are allowed
            .layer(CorsLayer::permissive())
            .layer(middleware::from_fn(log_request));

        let addr: SocketAddr = format!("{}:{}", self.config.bind_addr, self.config.http_port)
            .parse()
            .with_context(|| {
                format!(
                    "Dirección inválida: {}:{}",
                    self.config.bind_addr, self.config.http_port
                )
            })?;

        tracing::info!("Plugin de impresión escuchando en http://{}", addr);
        tracing::info!("Endpoints: GET /status, GET /test, POST /imprimir, POST /imprimir-casino");

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("No se pudo abrir el puerto {}", addr))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Fallo del servidor HTTP")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Apagando servidor...");
}
