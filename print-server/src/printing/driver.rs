//! Print driver capability layer
//!
//! A [`TicketDriver`] turns a validated ticket into physical output. The
//! concrete driver is chosen once at startup and injected into the
//! handlers through `ServerState`; requests only pick a destination.

use async_trait::async_trait;
use ticket_printer::{FilePrinter, NetworkPrinter, PrintError, PrintResult, Printer};
use tracing::info;

use super::renderer::{TicketRenderer, format_currency};
use super::types::Ticket;

/// Capability interface for ticket printing
#[async_trait]
pub trait TicketDriver: Send + Sync {
    /// Render and deliver one ticket
    ///
    /// `destino` overrides the configured destination for this request
    /// only: a `host:port` network address, an absolute device path, or a
    /// spooler printer name (Windows).
    async fn print(&self, ticket: &Ticket, destino: Option<&str>) -> PrintResult<()>;

    /// Best-effort enumeration of available printer names
    async fn printers(&self) -> Vec<String>;

    /// The destination used when a request does not name one
    fn default_printer(&self) -> Option<String> {
        None
    }
}

#[cfg(windows)]
fn platform_printers() -> Vec<String> {
    ticket_printer::WindowsPrinter::list().unwrap_or_default()
}

#[cfg(not(windows))]
fn platform_printers() -> Vec<String> {
    // Enumeration would need CUPS; report the fixed placeholders the
    // client already knows how to display
    vec!["Impresora USB".to_string(), "Impresora Red".to_string()]
}

// ============================================================================
// ESC/POS driver
// ============================================================================

/// ESC/POS byte-stream driver
///
/// Renders the ticket with the line-printer layout and delivers the raw
/// buffer to a device file, a network socket or (on Windows) a spooler
/// printer with the RAW datatype.
pub struct EscposDriver {
    renderer: TicketRenderer,
    device: String,
    network: Option<String>,
}

impl EscposDriver {
    pub fn new(width: usize, device: String, network: Option<String>) -> Self {
        Self {
            renderer: TicketRenderer::new(width),
            device,
            network,
        }
    }

    async fn deliver(&self, destino: Option<&str>, data: &[u8]) -> PrintResult<()> {
        match destino {
            Some(d) if d.contains(':') => self.send_to_network(d, data).await,
            Some(d) if d.starts_with('/') => self.send_to_device(d, data).await,
            Some(d) => self.send_to_spooler(Some(d), data).await,
            None => {
                if let Some(addr) = &self.network {
                    self.send_to_network(addr, data).await
                } else if cfg!(windows) {
                    self.send_to_spooler(None, data).await
                } else {
                    self.send_to_device(&self.device, data).await
                }
            }
        }
    }

    async fn send_to_network(&self, addr: &str, data: &[u8]) -> PrintResult<()> {
        let printer = NetworkPrinter::from_addr(addr)?;
        printer.print(data).await
    }

    async fn send_to_device(&self, path: &str, data: &[u8]) -> PrintResult<()> {
        let printer = FilePrinter::new(path);
        printer.print(data).await
    }

    #[cfg(windows)]
    async fn send_to_spooler(&self, name: Option<&str>, data: &[u8]) -> PrintResult<()> {
        let name = ticket_printer::WindowsPrinter::resolve(name)?;
        let printer = ticket_printer::WindowsPrinter::new(&name);
        printer.print(data).await
    }

    #[cfg(not(windows))]
    async fn send_to_spooler(&self, name: Option<&str>, _data: &[u8]) -> PrintResult<()> {
        Err(PrintError::InvalidConfig(format!(
            "Impresora de spooler no soportada en esta plataforma: {}",
            name.unwrap_or("(por defecto)")
        )))
    }
}

#[async_trait]
impl TicketDriver for EscposDriver {
    async fn print(&self, ticket: &Ticket, destino: Option<&str>) -> PrintResult<()> {
        let data = self.renderer.render(ticket);
        self.deliver(destino, &data).await?;
        info!(bytes = data.len(), "Ticket impreso");
        Ok(())
    }

    async fn printers(&self) -> Vec<String> {
        platform_printers()
    }

    #[cfg(windows)]
    fn default_printer(&self) -> Option<String> {
        ticket_printer::WindowsPrinter::default_printer()
            .ok()
            .flatten()
    }

    #[cfg(not(windows))]
    fn default_printer(&self) -> Option<String> {
        self.network.clone().or_else(|| Some(self.device.clone()))
    }
}

// ============================================================================
// GDI driver (Windows)
// ============================================================================

/// Windows GDI driver
///
/// Renders the ticket as a page document and draws it through the
/// installed printer driver.
#[cfg(windows)]
pub struct GdiDriver {
    renderer: TicketRenderer,
}

#[cfg(windows)]
impl GdiDriver {
    pub fn new(width: usize) -> Self {
        Self {
            renderer: TicketRenderer::new(width),
        }
    }
}

#[cfg(windows)]
#[async_trait]
impl TicketDriver for GdiDriver {
    async fn print(&self, ticket: &Ticket, destino: Option<&str>) -> PrintResult<()> {
        let doc = self.renderer.render_page(ticket);
        let name = ticket_printer::WindowsPrinter::resolve(destino)?;

        // GDI calls are synchronous, run in a blocking task
        tokio::task::spawn_blocking(move || {
            let printer = ticket_printer::GdiPrinter::new(&name);
            printer.print_page(&doc)
        })
        .await
        .map_err(|e| PrintError::Gdi(format!("Task join failed: {}", e)))??;

        info!("Ticket impreso");
        Ok(())
    }

    async fn printers(&self) -> Vec<String> {
        platform_printers()
    }

    fn default_printer(&self) -> Option<String> {
        ticket_printer::WindowsPrinter::default_printer()
            .ok()
            .flatten()
    }
}

// ============================================================================
// Simulation driver
// ============================================================================

/// No-printer fallback: logs the ticket instead of printing it
#[derive(Debug, Default)]
pub struct SimulationDriver;

impl SimulationDriver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TicketDriver for SimulationDriver {
    async fn print(&self, ticket: &Ticket, _destino: Option<&str>) -> PrintResult<()> {
        info!(
            productos = ticket.productos.len(),
            total = %format!("${}", format_currency(ticket.total_amount())),
            cliente = ticket.nombre_cliente.as_deref().unwrap_or("-"),
            "MODO SIMULACIÓN - Ticket procesado"
        );
        Ok(())
    }

    async fn printers(&self) -> Vec<String> {
        platform_printers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printing::types::TicketItem;

    fn cafe_ticket() -> Ticket {
        Ticket {
            productos: vec![TicketItem {
                nombre: "Cafe".to_string(),
                cantidad: 2.0,
                precio: 1000.0,
            }],
            total: None,
            numero_pedido: None,
            rut: None,
            nombre_cliente: None,
            nombre_impresora: None,
            seleccion: None,
            para_llevar: None,
        }
    }

    #[tokio::test]
    async fn test_simulation_always_succeeds() {
        let driver = SimulationDriver::new();
        assert!(driver.print(&cafe_ticket(), None).await.is_ok());
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn test_escpos_missing_device_fails() {
        let driver = EscposDriver::new(32, "/definitely/not/a/printer".to_string(), None);
        let result = driver.print(&cafe_ticket(), None).await;
        assert!(result.is_err());
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn test_escpos_spooler_name_unsupported_off_windows() {
        let driver = EscposDriver::new(32, "/dev/usb/lp0".to_string(), None);
        let result = driver.print(&cafe_ticket(), Some("POS-58")).await;
        assert!(matches!(result, Err(PrintError::InvalidConfig(_))));
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn test_placeholder_printer_list() {
        let driver = SimulationDriver::new();
        let printers = driver.printers().await;
        assert_eq!(printers, vec!["Impresora USB", "Impresora Red"]);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_escpos_default_printer_prefers_network() {
        let driver = EscposDriver::new(
            32,
            "/dev/usb/lp0".to_string(),
            Some("192.168.1.50:9100".to_string()),
        );
        assert_eq!(
            driver.default_printer().as_deref(),
            Some("192.168.1.50:9100")
        );
    }
}
