//! # ticket-printer
//!
//! Receipt printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Windows-1252 encoding for Spanish-market receipt printers
//! - Network printing (TCP port 9100)
//! - Device-file printing (`/dev/usb/lp0` style character devices)
//! - Windows spooler/GDI printing (optional)
//!
//! Business logic (WHAT to print) should stay in application code:
//! - Ticket rendering → print-server
//!
//! ## Example
//!
//! ```ignore
//! use ticket_printer::{EscPosBuilder, NetworkPrinter, Printer};
//!
//! // Build ESC/POS content
//! let mut builder = EscPosBuilder::new(32);
//! builder.bold();
//! builder.line("TICKET DE CASINO");
//! builder.bold_off();
//! builder.sep_double();
//! builder.line("Cafe");
//! builder.cut_feed(4);
//!
//! // Send to network printer
//! let printer = NetworkPrinter::new("192.168.1.100", 9100)?;
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod page;
mod printer;

#[cfg(windows)]
mod gdi;
#[cfg(windows)]
mod spooler;

// Re-exports
pub use encoding::{center_cp1252, convert_to_cp1252, cp1252_width, pad_cp1252, truncate_cp1252};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use page::{FontKind, PageDoc, PageLine};
pub use printer::{FilePrinter, NetworkPrinter, Printer};

#[cfg(windows)]
pub use gdi::GdiPrinter;
#[cfg(windows)]
pub use spooler::WindowsPrinter;
