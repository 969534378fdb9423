//! Server state - platform detection and driver injection
//!
//! The print driver is selected once at startup from the platform and the
//! configured destinations, then injected into the handlers through
//! [`ServerState`]. Requests never re-probe the environment.

use std::sync::Arc;

use crate::core::{Config, PrinterMode};
use crate::printing::{SimulationDriver, TicketDriver};

/// Detected platform / driver mode, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformMode {
    /// Printing through the Windows spooler or GDI
    Windows,
    /// ESC/POS to a device file or network socket
    Unix,
    /// No printer detected; simulation only
    None,
}

impl PlatformMode {
    /// Name reported on `/status` and `/test`, matching what the web
    /// client expects
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformMode::Windows => "Windows",
            PlatformMode::Unix => "Linux/Mac",
            PlatformMode::None => "Sin impresora",
        }
    }
}

/// Shared server state
///
/// Holds the immutable configuration, the detected platform and the
/// injected print driver. Cloning is shallow (`Arc`).
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub platform: PlatformMode,
    driver: Arc<dyn TicketDriver>,
}

impl ServerState {
    /// Probe the environment and build the state
    pub async fn initialize(config: &Config) -> Self {
        let (platform, driver) = select_driver(config);
        tracing::info!(
            sistema = platform.as_str(),
            "Driver de impresión seleccionado"
        );
        Self {
            config: Arc::new(config.clone()),
            platform,
            driver,
        }
    }

    /// Build a state around an explicit driver (tests and embedding)
    pub fn with_driver(
        config: &Config,
        platform: PlatformMode,
        driver: Arc<dyn TicketDriver>,
    ) -> Self {
        Self {
            config: Arc::new(config.clone()),
            platform,
            driver,
        }
    }

    /// The injected print driver
    pub fn driver(&self) -> &dyn TicketDriver {
        self.driver.as_ref()
    }
}

/// Pick the driver implementation for this process
fn select_driver(config: &Config) -> (PlatformMode, Arc<dyn TicketDriver>) {
    match config.printer_mode {
        PrinterMode::Simulacion => simulation_driver(),
        PrinterMode::Gdi => gdi_driver(config),
        PrinterMode::Escpos => escpos_driver(config),
        PrinterMode::Auto => auto_driver(config),
    }
}

fn simulation_driver() -> (PlatformMode, Arc<dyn TicketDriver>) {
    (PlatformMode::None, Arc::new(SimulationDriver::new()))
}

fn escpos_driver(config: &Config) -> (PlatformMode, Arc<dyn TicketDriver>) {
    let platform = if cfg!(windows) {
        PlatformMode::Windows
    } else {
        PlatformMode::Unix
    };
    let driver = crate::printing::EscposDriver::new(
        config.ticket_width(),
        config.printer_device.clone(),
        config.printer_addr.clone(),
    );
    (platform, Arc::new(driver))
}

#[cfg(windows)]
fn gdi_driver(config: &Config) -> (PlatformMode, Arc<dyn TicketDriver>) {
    let driver = crate::printing::GdiDriver::new(config.ticket_width());
    (PlatformMode::Windows, Arc::new(driver))
}

#[cfg(not(windows))]
fn gdi_driver(_config: &Config) -> (PlatformMode, Arc<dyn TicketDriver>) {
    tracing::warn!("GDI no disponible en esta plataforma, usando simulación");
    simulation_driver()
}

#[cfg(windows)]
fn auto_driver(config: &Config) -> (PlatformMode, Arc<dyn TicketDriver>) {
    gdi_driver(config)
}

#[cfg(not(windows))]
fn auto_driver(config: &Config) -> (PlatformMode, Arc<dyn TicketDriver>) {
    let has_device = std::path::Path::new(&config.printer_device).exists();
    if config.printer_addr.is_some() || has_device {
        escpos_driver(config)
    } else {
        tracing::warn!(
            device = %config.printer_device,
            "No se detectó impresora, modo simulación"
        );
        simulation_driver()
    }
}
