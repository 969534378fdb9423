//! Ticket payload types
//!
//! Field names match the JSON the web client sends (Spanish, camelCase).

use serde::{Deserialize, Serialize};

/// One order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketItem {
    pub nombre: String,
    pub cantidad: f64,
    #[serde(default)]
    pub precio: f64,
}

impl TicketItem {
    /// Line subtotal (cantidad × precio)
    pub fn subtotal(&self) -> f64 {
        self.cantidad * self.precio
    }
}

/// A print request payload
///
/// Only `productos` is always required; `/imprimir-casino` additionally
/// requires `rut` and `nombreCliente`. Orders live for one request only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub productos: Vec<TicketItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_pedido: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_cliente: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_impresora: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seleccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub para_llevar: Option<bool>,
}

impl Ticket {
    /// Validate the invariants shared by every print route
    pub fn validate(&self) -> Result<(), String> {
        if self.productos.is_empty() {
            return Err("Datos inválidos. Se requiere campo \"productos\"".to_string());
        }
        for item in &self.productos {
            if item.nombre.trim().is_empty() {
                return Err("Datos inválidos. Producto sin nombre".to_string());
            }
            if item.cantidad <= 0.0 {
                return Err(format!(
                    "Datos inválidos. Cantidad inválida para \"{}\"",
                    item.nombre
                ));
            }
            if item.precio < 0.0 {
                return Err(format!(
                    "Datos inválidos. Precio negativo para \"{}\"",
                    item.nombre
                ));
            }
        }
        Ok(())
    }

    /// Sum of cantidad × precio over all lines
    pub fn items_total(&self) -> f64 {
        self.productos.iter().map(TicketItem::subtotal).sum()
    }

    /// Fill the derived total if the client did not send one
    pub fn normalize(&mut self) {
        if self.total.is_none() {
            self.total = Some(self.items_total());
        }
    }

    /// The total to print, derived when absent
    pub fn total_amount(&self) -> f64 {
        self.total.unwrap_or_else(|| self.items_total())
    }
}
