//! Print Server - local printing plugin for the casino POS client
//!
//! A small loopback HTTP service that receives order payloads from the web
//! client and renders them on a receipt printer, so the browser never talks
//! to the OS printing subsystem directly.
//!
//! # Module structure
//!
//! ```text
//! print-server/src/
//! ├── core/          # Config, state, server, errors
//! ├── api/           # HTTP routes and handlers
//! ├── printing/      # Ticket types, renderer, print drivers
//! └── utils/         # Logging
//! ```

pub mod api;
pub mod core;
pub mod printing;
pub mod utils;

// Re-export public types
pub use crate::core::{ApiError, ApiResult, Config, PlatformMode, Server, ServerState};
pub use crate::printing::{Ticket, TicketDriver, TicketItem, TicketRenderer};

pub fn print_banner() {
    println!(
        r#"
  ______ _      __        __
 /_  __/(_)____/ /_____  / /_
  / /  / / ___/ //_/ _ \/ __/
 / /  / / /__/ ,< /  __/ /_
/_/  /_/\___/_/|_|\___/\__/
    ____  __            _
   / __ \/ /_  ______ _(_)___
  / /_/ / / / / / __ `/ / __ \
 / ____/ / /_/ / /_/ / / / / /
/_/   /_/\__,_/\__, /_/_/ /_/
              /____/
    "#
    );
}

/// Prepare the process environment: load `.env` and initialize logging
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").ok();
    let dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(level.as_deref(), dir.as_deref());
}
