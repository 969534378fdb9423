//! API route modules
//!
//! # Structure
//!
//! - [`status`] - service liveness and quick test
//! - [`tickets`] - ticket printing endpoints

pub mod status;
pub mod tickets;

use axum::Router;

use crate::core::ServerState;

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(status::router())
        .merge(tickets::router())
}
