//! Ticket printing routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /imprimir | POST | Print a general order ticket |
//! | /imprimir-casino | POST | Print a casino meal ticket (requires RUT + name) |

pub mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/imprimir", post(handler::imprimir))
        .route("/imprimir-casino", post(handler::imprimir_casino))
}
