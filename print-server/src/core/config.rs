/// Service configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | BIND_ADDR | 127.0.0.1 | Listen address (loopback only) |
/// | HTTP_PORT | 8000 | Listen port |
/// | PAPER_WIDTH | 58 | Paper width in mm (58 → 32 cols, 80 → 50 cols) |
/// | PRINTER_DEVICE | /dev/usb/lp0 | Default device path (Unix) |
/// | PRINTER_ADDR | *(unset)* | Default network printer, `host:port` |
/// | PRINTER_MODE | auto | auto \| escpos \| gdi \| simulacion |
/// | LOG_LEVEL | info | Log filter |
/// | LOG_DIR | *(unset)* | Optional rolling log file directory |
///
/// # Example
///
/// ```ignore
/// PAPER_WIDTH=80 PRINTER_ADDR=192.168.1.50:9100 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address; the plugin only serves the local web client
    pub bind_addr: String,
    /// HTTP service port
    pub http_port: u16,
    /// Paper width in millimeters (58 or 80)
    pub paper_width_mm: u16,
    /// Default printer device path for the ESC/POS driver
    pub printer_device: String,
    /// Default network printer address (`host:port`), if any
    pub printer_addr: Option<String>,
    /// Driver selection mode
    pub printer_mode: PrinterMode,
}

/// How the print driver is chosen at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrinterMode {
    /// Probe the platform and configured destinations
    #[default]
    Auto,
    /// Force the ESC/POS byte-stream driver
    Escpos,
    /// Force the Windows GDI driver
    Gdi,
    /// Force simulation (log only, no physical output)
    Simulacion,
}

impl PrinterMode {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "escpos" => PrinterMode::Escpos,
            "gdi" => PrinterMode::Gdi,
            "simulacion" | "simulation" => PrinterMode::Simulacion,
            _ => PrinterMode::Auto,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            paper_width_mm: std::env::var("PAPER_WIDTH")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(58),
            printer_device: std::env::var("PRINTER_DEVICE")
                .unwrap_or_else(|_| "/dev/usb/lp0".into()),
            printer_addr: std::env::var("PRINTER_ADDR").ok().filter(|s| !s.is_empty()),
            printer_mode: std::env::var("PRINTER_MODE")
                .map(|v| PrinterMode::parse(&v))
                .unwrap_or_default(),
        }
    }

    /// Override selected values
    ///
    /// Mostly used by tests.
    pub fn with_overrides(bind_addr: impl Into<String>, http_port: u16, paper_width_mm: u16) -> Self {
        let mut config = Self::from_env();
        config.bind_addr = bind_addr.into();
        config.http_port = http_port;
        config.paper_width_mm = paper_width_mm;
        config
    }

    /// Ticket width in characters for the configured paper
    pub fn ticket_width(&self) -> usize {
        if self.paper_width_mm >= 80 { 50 } else { 32 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_width() {
        let narrow = Config::with_overrides("127.0.0.1", 8000, 58);
        assert_eq!(narrow.ticket_width(), 32);

        let wide = Config::with_overrides("127.0.0.1", 8000, 80);
        assert_eq!(wide.ticket_width(), 50);
    }

    #[test]
    fn test_printer_mode_parse() {
        assert_eq!(PrinterMode::parse("escpos"), PrinterMode::Escpos);
        assert_eq!(PrinterMode::parse("GDI"), PrinterMode::Gdi);
        assert_eq!(PrinterMode::parse("simulacion"), PrinterMode::Simulacion);
        assert_eq!(PrinterMode::parse("whatever"), PrinterMode::Auto);
    }
}
