//! Core module - server configuration, state and errors
//!
//! # Structure
//!
//! - [`Config`] - service configuration
//! - [`ServerState`] - immutable per-process state (platform + driver)
//! - [`Server`] - HTTP server
//! - [`ApiError`] - handler error type

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{Config, PrinterMode};
pub use error::{ApiError, ApiResult};
pub use server::Server;
pub use state::{PlatformMode, ServerState};
