//! Ticket renderer
//!
//! Deterministically maps a [`Ticket`] into printable output: an ESC/POS
//! byte buffer for line printers, or a [`PageDoc`] for graphical drivers.

use chrono::Local;
use ticket_printer::{EscPosBuilder, FontKind, PageDoc, center_cp1252, pad_cp1252};

use super::types::Ticket;

/// Known meal categories, rendered as a checkbox block when the order's
/// `seleccion` matches one of them
const CATEGORIAS: [&str; 2] = ["DESAYUNO", "ALMUERZO"];

/// Separator width of the graphical page variant (fixed, font-sized)
const PAGE_RULE_WIDTH: usize = 32;

/// Ticket renderer
///
/// Width is the character count of one printed line: 32 for 58mm paper,
/// 50 for 80mm.
pub struct TicketRenderer {
    width: usize,
}

impl TicketRenderer {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    // === ESC/POS variant ===

    /// Render a ticket to ESC/POS bytes
    pub fn render(&self, ticket: &Ticket) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);
        b.line_spacing(60);

        // Header
        b.bold();
        b.line(&self.centered("TICKET DE CASINO"));
        b.bold_off();
        b.sep_double();

        // Date, order number, customer
        let fecha = Local::now().format("%d/%m/%Y %H:%M:%S");
        b.line(&self.left(&format!("Fecha: {}", fecha)));
        if let Some(numero) = &ticket.numero_pedido {
            b.line(&self.left(&format!("Ticket #: {}", numero)));
        }
        if let Some(rut) = &ticket.rut {
            b.line(&self.left(&format!("RUT: {}", rut)));
        }
        if let Some(nombre) = &ticket.nombre_cliente {
            b.line(&self.left(&format!("Nombre: {}", nombre)));
        }

        if let Some(seleccion) = &ticket.seleccion {
            for line in seleccion_lines(seleccion) {
                b.line(&self.left(&line));
            }
        }

        b.sep_single();

        // Items; price suffix only when the line has a price
        for item in &ticket.productos {
            b.line(&self.left(&item.nombre));
            if item.precio > 0.0 {
                b.line(&self.left(&format!(
                    "  {}x ${}",
                    format_cantidad(item.cantidad),
                    format_currency(item.precio)
                )));
            }
        }

        b.sep_double();

        let total = ticket.total_amount();
        if total > 0.0 {
            b.bold();
            b.double_height();
            b.line(&self.centered(&format!("TOTAL: ${}", format_currency(total))));
            b.reset_size();
            b.bold_off();
        }

        if let Some(para_llevar) = ticket.para_llevar {
            b.newline();
            b.bold();
            b.line(&self.centered(banner(para_llevar)));
            b.bold_off();
        }

        b.newline();
        b.line(&self.centered("¡Buen provecho!"));
        b.default_line_spacing();
        b.cut_feed(4);

        b.build()
    }

    // === Graphical page variant ===

    /// Render a ticket to a page document for driver-based printing
    pub fn render_page(&self, ticket: &Ticket) -> PageDoc {
        let mut doc = PageDoc::new();

        doc.push(FontKind::Title, "TICKET DE CASINO");
        doc.push(FontKind::Normal, "=".repeat(PAGE_RULE_WIDTH));

        let fecha = Local::now().format("%d/%m/%Y %H:%M:%S");
        doc.push(FontKind::Normal, format!("Fecha: {}", fecha));
        if let Some(numero) = &ticket.numero_pedido {
            doc.push(FontKind::Normal, format!("Ticket #: {}", numero));
        }
        if let Some(rut) = &ticket.rut {
            doc.push(FontKind::Normal, format!("RUT: {}", rut));
        }
        if let Some(nombre) = &ticket.nombre_cliente {
            doc.push(FontKind::Normal, format!("Nombre: {}", nombre));
        }

        if let Some(seleccion) = &ticket.seleccion {
            for line in seleccion_lines(seleccion) {
                doc.push(FontKind::Normal, line);
            }
        }

        doc.push(FontKind::Normal, "-".repeat(PAGE_RULE_WIDTH));

        for item in &ticket.productos {
            doc.push(FontKind::Normal, item.nombre.clone());
            if item.precio > 0.0 {
                doc.push(
                    FontKind::Normal,
                    format!(
                        "  {}x ${}",
                        format_cantidad(item.cantidad),
                        format_currency(item.precio)
                    ),
                );
            }
        }

        doc.push(FontKind::Normal, "=".repeat(PAGE_RULE_WIDTH));

        let total = ticket.total_amount();
        if total > 0.0 {
            doc.push(FontKind::Title, format!("TOTAL: ${}", format_currency(total)));
        }

        if let Some(para_llevar) = ticket.para_llevar {
            doc.push(FontKind::Title, banner(para_llevar));
        }

        doc.push(FontKind::Normal, "¡Buen provecho!");

        doc
    }

    // === Layout helpers ===

    /// Center text in the full line width (symmetric space padding,
    /// truncated to exactly the width when longer)
    fn centered(&self, text: &str) -> String {
        center_cp1252(text, self.width)
    }

    /// Left-align text: two-space prefix, then left-justify/truncate to
    /// the line width
    fn left(&self, text: &str) -> String {
        pad_cp1252(&format!("  {}", text), self.width, false)
    }
}

impl Default for TicketRenderer {
    fn default() -> Self {
        Self::new(32)
    }
}

/// Take-away / dine-in banner text
fn banner(para_llevar: bool) -> &'static str {
    if para_llevar {
        "*** PARA LLEVAR ***"
    } else {
        "*** PARA SERVIR ***"
    }
}

/// Render the selection block
///
/// A value matching a known category (case-insensitive) yields one
/// checkbox line per category with the matching one marked; any other
/// value yields a single literal label line.
fn seleccion_lines(seleccion: &str) -> Vec<String> {
    let lowered = seleccion.trim().to_lowercase();
    let known = CATEGORIAS.iter().any(|c| c.to_lowercase() == lowered);

    if known {
        CATEGORIAS
            .iter()
            .map(|categoria| {
                let marca = if categoria.to_lowercase() == lowered {
                    'X'
                } else {
                    ' '
                };
                format!("[{}] {}", marca, categoria)
            })
            .collect()
    } else {
        vec![format!("Seleccion: {}", seleccion)]
    }
}

/// Integer-rounded currency with `,` thousands separators (`1000` → `1,000`)
pub fn format_currency(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if rounded < 0 { format!("-{}", out) } else { out }
}

/// Quantity display: integral quantities bare, fractional with two decimals
fn format_cantidad(cantidad: f64) -> String {
    if cantidad.fract().abs() < 1e-6 {
        format!("{:.0}", cantidad)
    } else {
        format!("{:.2}", cantidad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printing::types::TicketItem;
    use ticket_printer::cp1252_width;

    fn item(nombre: &str, cantidad: f64, precio: f64) -> TicketItem {
        TicketItem {
            nombre: nombre.to_string(),
            cantidad,
            precio,
        }
    }

    fn base_ticket() -> Ticket {
        Ticket {
            productos: vec![item("Cafe", 2.0, 1000.0)],
            total: None,
            numero_pedido: Some("42".to_string()),
            rut: Some("12345678-9".to_string()),
            nombre_cliente: Some("JUAN PEREZ L.".to_string()),
            nombre_impresora: None,
            seleccion: None,
            para_llevar: None,
        }
    }

    fn rendered_text(ticket: &Ticket) -> String {
        let data = TicketRenderer::new(32).render(ticket);
        String::from_utf8_lossy(&data).to_string()
    }

    #[test]
    fn test_render_contains_order_fields() {
        let text = rendered_text(&base_ticket());

        assert!(text.contains("TICKET DE CASINO"));
        assert!(text.contains("Ticket #: 42"));
        assert!(text.contains("RUT: 12345678-9"));
        assert!(text.contains("Nombre: JUAN PEREZ L."));
        assert!(text.contains("Cafe"));
        assert!(text.contains("2x $1,000"));
        assert!(text.contains("TOTAL: $2,000"));
    }

    #[test]
    fn test_zero_price_item_has_no_price_suffix() {
        let mut ticket = base_ticket();
        ticket.productos = vec![item("Ticket de Almuerzo", 1.0, 0.0)];

        let text = rendered_text(&ticket);
        assert!(text.contains("Ticket de Almuerzo"));
        assert!(!text.contains("1x $"));
        // Zero total also suppresses the TOTAL line
        assert!(!text.contains("TOTAL:"));
    }

    #[test]
    fn test_seleccion_desayuno_marks_breakfast_only() {
        for valor in ["desayuno", "Desayuno", "DESAYUNO"] {
            let lines = seleccion_lines(valor);
            assert_eq!(lines, vec!["[X] DESAYUNO", "[ ] ALMUERZO"]);
        }
    }

    #[test]
    fn test_seleccion_almuerzo_is_inverse() {
        let lines = seleccion_lines("Almuerzo");
        assert_eq!(lines, vec!["[ ] DESAYUNO", "[X] ALMUERZO"]);
    }

    #[test]
    fn test_seleccion_unknown_falls_back_to_label() {
        let lines = seleccion_lines("Cena");
        assert_eq!(lines, vec!["Seleccion: Cena"]);
    }

    #[test]
    fn test_banner_rendered_only_when_flag_present() {
        let mut ticket = base_ticket();

        let text = rendered_text(&ticket);
        assert!(!text.contains("PARA LLEVAR"));
        assert!(!text.contains("PARA SERVIR"));

        ticket.para_llevar = Some(true);
        assert!(rendered_text(&ticket).contains("*** PARA LLEVAR ***"));

        ticket.para_llevar = Some(false);
        assert!(rendered_text(&ticket).contains("*** PARA SERVIR ***"));
    }

    #[test]
    fn test_centered_lines_have_exact_width() {
        let renderer = TicketRenderer::new(32);
        let centered = renderer.centered("TICKET DE CASINO");

        assert_eq!(cp1252_width(&centered), 32);
        let leading = centered.len() - centered.trim_start().len();
        let trailing = centered.len() - centered.trim_end().len();
        assert!(leading.abs_diff(trailing) <= 1);
    }

    #[test]
    fn test_left_truncates_to_width() {
        let renderer = TicketRenderer::new(32);
        let long = "Promocion especial del dia con acompañamiento incluido";

        let line = renderer.left(long);
        assert_eq!(cp1252_width(&line), 32);
        assert!(line.starts_with("  Promocion"));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "0");
        assert_eq!(format_currency(950.0), "950");
        assert_eq!(format_currency(1000.0), "1,000");
        assert_eq!(format_currency(2500.4), "2,500");
        assert_eq!(format_currency(1234567.0), "1,234,567");
    }

    #[test]
    fn test_format_cantidad() {
        assert_eq!(format_cantidad(2.0), "2");
        assert_eq!(format_cantidad(0.5), "0.50");
    }

    #[test]
    fn test_escpos_frame() {
        let data = TicketRenderer::new(32).render(&base_ticket());

        // Code page select, then printer init
        assert_eq!(&data[..5], &[0x1B, 0x74, 16, 0x1B, 0x40]);
        // Feed-and-cut trailer
        assert_eq!(&data[data.len() - 4..], &[0x1D, 0x56, 0x42, 4]);
    }

    #[test]
    fn test_page_doc_layout() {
        let mut ticket = base_ticket();
        ticket.para_llevar = Some(true);

        let doc = TicketRenderer::new(32).render_page(&ticket);

        assert_eq!(doc.lines[0].text, "TICKET DE CASINO");
        assert_eq!(doc.lines[0].font, FontKind::Title);
        assert!(doc.lines.iter().any(|l| l.text == "Cafe"));
        assert!(
            doc.lines
                .iter()
                .any(|l| l.text == "TOTAL: $2,000" && l.font == FontKind::Title)
        );
        assert!(doc.lines.iter().any(|l| l.text == "*** PARA LLEVAR ***"));
        assert_eq!(doc.lines.last().unwrap().text, "¡Buen provecho!");
    }
}
