//! Ticket printing module
//!
//! - [`types`] - the order payload as sent by the web client
//! - [`renderer`] - order → ESC/POS bytes / page document
//! - [`driver`] - driver capability trait and implementations

pub mod driver;
pub mod renderer;
pub mod types;

pub use driver::{EscposDriver, SimulationDriver, TicketDriver};
pub use renderer::{TicketRenderer, format_currency};
pub use types::{Ticket, TicketItem};

#[cfg(windows)]
pub use driver::GdiDriver;
