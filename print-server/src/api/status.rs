//! Service status routes
//!
//! # Routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /status | GET | Liveness, detected system, available printers |
//! | /test | GET | Quick connectivity test |
//!
//! # Response example
//!
//! ```json
//! {
//!   "status": "online",
//!   "sistema": "Linux/Mac",
//!   "impresoras_disponibles": ["Impresora USB", "Impresora Red"],
//!   "timestamp": "2026-08-06T12:34:56-04:00"
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use chrono::Local;
use serde::Serialize;

use crate::core::ServerState;

/// Status routes - public, no authentication
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/status", get(status))
        .route("/test", get(test))
}

/// Liveness response
#[derive(Serialize)]
pub struct StatusResponse {
    /// Always "online" while the process serves requests
    status: &'static str,
    /// Detected platform/driver mode
    sistema: &'static str,
    /// Best-effort printer enumeration
    impresoras_disponibles: Vec<String>,
    /// Destination used when requests do not name one
    #[serde(skip_serializing_if = "Option::is_none")]
    impresora_default: Option<String>,
    timestamp: String,
}

/// Quick test response
#[derive(Serialize)]
pub struct TestResponse {
    mensaje: &'static str,
    sistema: &'static str,
    puerto: u16,
}

/// Service liveness and printer discovery
pub async fn status(State(state): State<ServerState>) -> Json<StatusResponse> {
    let impresoras = state.driver().printers().await;

    Json(StatusResponse {
        status: "online",
        sistema: state.platform.as_str(),
        impresoras_disponibles: impresoras,
        impresora_default: state.driver().default_printer(),
        timestamp: Local::now().to_rfc3339(),
    })
}

/// Quick connectivity test for the web client
pub async fn test(State(state): State<ServerState>) -> Json<TestResponse> {
    Json(TestResponse {
        mensaje: "¡Plugin de impresión funcionando!",
        sistema: state.platform.as_str(),
        puerto: state.config.http_port,
    })
}
